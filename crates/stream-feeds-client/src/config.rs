/*
[INPUT]:  API credentials from constructor arguments or environment
[OUTPUT]: Immutable client configuration (key, secret, base URL, region)
[POS]:    Config layer - load-once read-many settings
[UPDATE]: When adding configuration sources or new settings
*/

use url::Url;

use crate::http::{Result, StreamError};

/// Default API endpoint
const DEFAULT_BASE_URL: &str = "https://api.stream-io-api.com/api/v1.0/";

/// Environment variables read by [`Config::from_env`]
const ENV_API_KEY: &str = "STREAM_API_KEY";
const ENV_API_SECRET: &str = "STREAM_API_SECRET";
const ENV_BASE_URL: &str = "STREAM_API_BASE_URL";
const ENV_REGION: &str = "STREAM_REGION";

/// Immutable client configuration
///
/// Constructed once at startup and handed to
/// [`StreamClient`](crate::StreamClient); nothing mutates it afterwards, so
/// it can be shared freely across tasks.
#[derive(Debug, Clone)]
pub struct Config {
    api_key: String,
    api_secret: String,
    base_url: Url,
    region: Option<String>,
}

impl Config {
    /// Create a configuration with the default base URL
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, api_secret, DEFAULT_BASE_URL)
    }

    /// Create a configuration with an explicit base URL
    pub fn with_base_url(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        base_url: &str,
    ) -> Result<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();

        if api_key.is_empty() {
            return Err(StreamError::Config("api_key must not be empty".to_string()));
        }
        if api_secret.is_empty() {
            return Err(StreamError::Config(
                "api_secret must not be empty".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            api_secret,
            base_url: Url::parse(base_url)?,
            region: None,
        })
    }

    /// Load configuration from the environment
    ///
    /// Requires `STREAM_API_KEY` and `STREAM_API_SECRET`. `STREAM_API_BASE_URL`
    /// overrides the endpoint; otherwise `STREAM_REGION` pins the default host
    /// to `https://<region>-api.stream-io-api.com/api/v1.0/`.
    pub fn from_env() -> Result<Self> {
        let api_key = require_env(ENV_API_KEY)?;
        let api_secret = require_env(ENV_API_SECRET)?;
        let region = std::env::var(ENV_REGION)
            .ok()
            .filter(|value| !value.is_empty());
        let explicit = std::env::var(ENV_BASE_URL)
            .ok()
            .filter(|value| !value.is_empty());

        let base_url = resolve_base_url(explicit, region.as_deref());
        let mut config = Self::with_base_url(api_key, api_secret, &base_url)?;
        config.region = region;
        Ok(config)
    }

    /// API key appended as the `api_key` query parameter on every request
    pub fn key(&self) -> &str {
        &self.api_key
    }

    /// Shared secret used by both signing schemes
    pub fn secret(&self) -> &str {
        &self.api_secret
    }

    /// Absolute URL request paths are joined onto
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Region the configuration is pinned to, if any
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

// An explicit base URL wins over a region-derived one.
fn resolve_base_url(explicit: Option<String>, region: Option<&str>) -> String {
    match (explicit, region) {
        (Some(url), _) => url,
        (None, Some(region)) => format!("https://{region}-api.stream-io-api.com/api/v1.0/"),
        (None, None) => DEFAULT_BASE_URL.to_string(),
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(StreamError::Config(format!(
            "missing required environment variable {name}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new("key", "secret").unwrap();
        assert_eq!(config.key(), "key");
        assert_eq!(config.secret(), "secret");
        assert_eq!(
            config.base_url().as_str(),
            "https://api.stream-io-api.com/api/v1.0/"
        );
        assert!(config.region().is_none());
    }

    #[test]
    fn test_config_rejects_empty_key() {
        let err = Config::new("", "secret").unwrap_err();
        match err {
            StreamError::Config(msg) => assert!(msg.contains("api_key")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_config_rejects_empty_secret() {
        let err = Config::new("key", "").unwrap_err();
        match err {
            StreamError::Config(msg) => assert!(msg.contains("api_secret")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_config_rejects_invalid_base_url() {
        let err = Config::with_base_url("key", "secret", "not a url").unwrap_err();
        assert!(matches!(err, StreamError::UrlParse(_)));
    }

    #[test]
    fn test_config_custom_base_url() {
        let config = Config::with_base_url("key", "secret", "http://localhost:8080/api/").unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:8080/api/");
    }

    #[test]
    fn test_resolve_base_url_prefers_explicit() {
        let url = resolve_base_url(Some("http://localhost:8080/".to_string()), Some("us-east"));
        assert_eq!(url, "http://localhost:8080/");
    }

    #[test]
    fn test_resolve_base_url_derives_region_host() {
        let url = resolve_base_url(None, Some("us-east"));
        assert_eq!(url, "https://us-east-api.stream-io-api.com/api/v1.0/");
    }

    #[test]
    fn test_resolve_base_url_falls_back_to_default() {
        assert_eq!(resolve_base_url(None, None), DEFAULT_BASE_URL);
    }
}
