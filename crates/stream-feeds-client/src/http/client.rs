/*
[INPUT]:  Client configuration and request values
[OUTPUT]: Prepared, signed, executed API requests
[POS]:    HTTP layer - core request pipeline (prepare -> sign -> execute)
[UPDATE]: When pipeline stages or transport wiring change
*/

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;
use url::Url;

use crate::auth::{FeedScope, MessageSigner, token};
use crate::config::Config;
use crate::http::request::{ApiRequest, RequestAuth};
use crate::http::{Result, StreamError};

/// Header marking a request as token-authenticated
const AUTH_TYPE_HEADER: &str = "stream-auth-type";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main client for the feeds API
///
/// Owns a configured transport and the immutable [`Config`]. Cloning is
/// cheap and clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct StreamClient {
    http_client: Client,
    config: Config,
}

impl StreamClient {
    /// Create a client with default transport configuration
    pub fn new(config: Config) -> Result<Self> {
        Self::with_client_config(config, ClientConfig::default())
    }

    /// Create a client with custom transport configuration
    pub fn with_client_config(config: Config, client_config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(client_config.timeout)
            .connect_timeout(client_config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Finalize the request URL
    ///
    /// Merges `api_key` into the query parameters, serializes them sorted by
    /// key with standard query percent-encoding, and joins the result onto
    /// `base_url + path`. Pure apart from config reads.
    pub fn prepare_request(&self, req: ApiRequest) -> Result<ApiRequest> {
        let mut req = req;
        req.params
            .insert("api_key".to_string(), self.config.key().to_string());

        let base = self.config.base_url().as_str().trim_end_matches('/');
        let path = if req.path.starts_with('/') {
            req.path.clone()
        } else {
            format!("/{}", req.path)
        };

        let mut url = Url::parse(&format!("{base}{path}"))?;
        url.query_pairs_mut().extend_pairs(req.params.iter());
        req.url = url.to_string();

        debug!(method = %req.method, url = %req.url, "request prepared");
        Ok(req)
    }

    /// Attach authentication headers
    ///
    /// A token scope selects the JWT scheme; otherwise the request date is
    /// signed with the key/secret scheme. Newly added auth headers go in
    /// front of any headers the request already carries.
    pub fn sign_request(&self, req: ApiRequest) -> Result<ApiRequest> {
        let mut req = req;
        let mut headers = match &req.auth {
            RequestAuth::Token(scope) => {
                let jwt = token::compact(scope, self.config.secret())?;
                debug!(
                    resource = %scope.resource,
                    feed_id = %scope.feed_id,
                    action = %scope.action,
                    "request signed with scope token"
                );
                vec![
                    ("Authorization".to_string(), jwt),
                    (AUTH_TYPE_HEADER.to_string(), "jwt".to_string()),
                ]
            }
            RequestAuth::KeySecret => {
                let date = Utc::now().to_rfc2822();
                let signer = MessageSigner::new(self.config.secret());
                let authorization = signer.authorization_header(self.config.key(), &date);
                debug!(date = %date, "request signed with key/secret signature");
                vec![
                    ("X-Api-Key".to_string(), self.config.key().to_string()),
                    ("Date".to_string(), date),
                    ("Authorization".to_string(), authorization),
                ]
            }
        };

        headers.append(&mut req.headers);
        req.headers = headers;
        Ok(req)
    }

    /// Execute the request and decode the JSON response body
    ///
    /// Transport failures are returned unchanged and never retried here;
    /// a malformed JSON body is a fatal decode error.
    pub async fn execute_request(&self, req: &ApiRequest) -> Result<serde_json::Value> {
        let body = self.dispatch(req).await?;
        let value = serde_json::from_slice(&body)?;
        Ok(value)
    }

    /// Execute the request and return the raw response body
    pub async fn execute_request_no_decode(&self, req: &ApiRequest) -> Result<Vec<u8>> {
        self.dispatch(req).await
    }

    /// Mint a user-scoped compact token, unrestricted on every dimension
    ///
    /// The standard artifact handed to client-side code after server-side
    /// authentication.
    pub fn create_user_token(&self, user_id: &str) -> Result<String> {
        let scope = FeedScope::any().with_user_id(user_id);
        token::compact(&scope, self.config.secret())
    }

    async fn dispatch(&self, req: &ApiRequest) -> Result<Vec<u8>> {
        let mut builder = self
            .http_client
            .request(req.method.clone(), req.url.as_str())
            .headers(header_map(&req.headers)?);

        if let Some(timeout) = req.options.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = &req.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");
        Ok(body.to_vec())
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| StreamError::InvalidRequest(format!("invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| StreamError::InvalidRequest(format!("invalid header value: {e}")))?;
        map.append(name, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token;
    use reqwest::Method;

    fn test_client() -> StreamClient {
        let config = Config::new("K", "test-secret").unwrap();
        StreamClient::new(config).unwrap()
    }

    #[test]
    fn test_prepare_request_example_url() {
        let client = test_client();
        let req = ApiRequest::default().with_params([("parameter", "value")]);
        let prepared = client.prepare_request(req).unwrap();
        assert_eq!(
            prepared.url,
            "https://api.stream-io-api.com/api/v1.0/?api_key=K&parameter=value"
        );
    }

    #[test]
    fn test_prepare_request_sorts_and_encodes() {
        let client = test_client();
        let req = ApiRequest::new(Method::GET, "/feed/user/1/")
            .with_params([("zeta", "last"), ("alpha", "first value")]);
        let prepared = client.prepare_request(req).unwrap();
        assert_eq!(
            prepared.url,
            "https://api.stream-io-api.com/api/v1.0/feed/user/1/?alpha=first+value&api_key=K&zeta=last"
        );
    }

    #[test]
    fn test_prepare_request_normalizes_missing_slash() {
        let client = test_client();
        let prepared = client
            .prepare_request(ApiRequest::new(Method::GET, "feed/user/1/"))
            .unwrap();
        assert!(prepared
            .url
            .starts_with("https://api.stream-io-api.com/api/v1.0/feed/user/1/?"));
    }

    #[test]
    fn test_sign_request_key_secret_headers() {
        let client = test_client();
        let signed = client.sign_request(ApiRequest::default()).unwrap();

        let names: Vec<&str> = signed.headers.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["X-Api-Key", "Date", "Authorization"]);

        let api_key = &signed.headers[0].1;
        let date = &signed.headers[1].1;
        let authorization = &signed.headers[2].1;
        assert_eq!(api_key, "K");

        // Recomputing the HMAC over the emitted Date header must reproduce
        // the emitted signature.
        let signer = MessageSigner::new("test-secret");
        assert_eq!(authorization, &signer.authorization_header("K", date));
    }

    #[test]
    fn test_sign_request_token_headers() {
        let client = test_client();
        let req = ApiRequest::default().with_token("user1", "feed", "read");
        let signed = client.sign_request(req).unwrap();

        assert_eq!(signed.headers.len(), 2);
        assert_eq!(signed.headers[1].0, AUTH_TYPE_HEADER);
        assert_eq!(signed.headers[1].1, "jwt");

        let jwt = &signed.headers[0].1;
        assert!(!jwt.is_empty());
        let claims = token::decompact(jwt, "test-secret").unwrap();
        assert_eq!(claims.resource, "feed");
        assert_eq!(claims.feed_id, "user1");
        assert_eq!(claims.action, "read");
    }

    #[test]
    fn test_sign_request_preserves_existing_headers_after_auth() {
        let client = test_client();
        let mut req = ApiRequest::default();
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));

        let signed = client.sign_request(req).unwrap();
        assert_eq!(signed.headers.len(), 4);
        assert_eq!(signed.headers[3].0, "content-type");
    }

    #[test]
    fn test_create_user_token_claims() {
        let client = test_client();
        let jwt = client.create_user_token("42").unwrap();
        let claims = token::decompact(&jwt, "test-secret").unwrap();
        assert_eq!(claims.user_id.as_deref(), Some("42"));
        assert_eq!(claims.resource, "*");
        assert_eq!(claims.feed_id, "*");
        assert_eq!(claims.action, "*");
    }

    #[test]
    fn test_header_map_rejects_bad_name() {
        let headers = vec![("bad header".to_string(), "value".to_string())];
        assert!(matches!(
            header_map(&headers),
            Err(StreamError::InvalidRequest(_))
        ));
    }
}
