/*
[INPUT]:  Method, path, query parameters, body, headers, auth scope
[OUTPUT]: Request values for the prepare -> sign -> execute pipeline
[POS]:    HTTP layer - request value object and builder transformations
[UPDATE]: When request fields or builder transformations change
*/

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;

use crate::auth::FeedScope;
use crate::http::Result;

/// Which signing scheme [`sign_request`](crate::StreamClient::sign_request)
/// applies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestAuth {
    /// HMAC-SHA256 signature over the request date, using api key + secret
    KeySecret,
    /// Compact scope token minted from the carried claims
    Token(FeedScope),
}

/// Per-request transport options, forwarded to the HTTP client untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
}

/// A pending API call
///
/// Builder transformations return a new value; the pipeline stages fill in
/// `url` and `headers`. Nothing mutates a request after execution.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// Query parameters; a `BTreeMap` keeps serialization deterministic
    pub params: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
    pub headers: Vec<(String, String)>,
    /// Absolute URL, empty until the request is prepared
    pub url: String,
    pub auth: RequestAuth,
    pub options: RequestOptions,
}

impl Default for ApiRequest {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            params: BTreeMap::new(),
            body: None,
            headers: Vec::new(),
            url: String::new(),
            auth: RequestAuth::KeySecret,
            options: RequestOptions::default(),
        }
    }
}

impl ApiRequest {
    /// Create a request for `method` + `path` with defaults everywhere else
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Self::default()
        }
    }

    /// Merge `params` into the query parameters (last write wins)
    pub fn with_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set a raw request body
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the JSON request body
    pub fn with_json<T: Serialize>(mut self, value: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(value)?);
        self.headers.push((
            "content-type".to_string(),
            "application/json".to_string(),
        ));
        Ok(self)
    }

    /// Switch the request to token signing with the given scope dimensions
    pub fn with_token(
        self,
        feed_id: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.with_scope(FeedScope::new(resource, feed_id, action))
    }

    /// Switch the request to token signing with a fully built scope
    pub fn with_scope(mut self, scope: FeedScope) -> Self {
        self.auth = RequestAuth::Token(scope);
        self
    }

    /// Attach per-request transport options
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}
