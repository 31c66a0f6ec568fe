//! Client configuration.
//!
//! Provides [`ClientConfig`] for the Level 3 API client. Values can be set in
//! code through the builder or loaded from environment variables.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Default service endpoint.
pub const DEFAULT_SERVICE_URL: &str = "https://ws.level3.com";

/// Default API version segment of the request path.
pub const DEFAULT_RESOURCE: &str = "v1.0";

/// Default `Content-Type` header, also part of the signature.
pub const DEFAULT_CONTENT_TYPE: &str = "text/xml";

/// API client configuration.
///
/// # Examples
///
/// ```
/// use level3_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .service_url("https://ws.example.com/".to_owned())
///     .wrap(false)
///     .build();
/// assert_eq!(config.normalized_service_url(), "https://ws.example.com");
/// assert_eq!(config.normalized_resource(), "v1.0");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Base URL of the API. Trailing slashes are ignored.
    #[builder(default = String::from(DEFAULT_SERVICE_URL))]
    pub service_url: String,

    /// API version segment placed between the method and the access group.
    /// Surrounding slashes are ignored.
    #[builder(default = String::from(DEFAULT_RESOURCE))]
    pub resource: String,

    /// `Content-Type` sent with, and signed into, every request.
    #[builder(default = String::from(DEFAULT_CONTENT_TYPE))]
    pub content_type: String,

    /// Whether responses are parsed into an XML tree.
    #[builder(default = true)]
    pub wrap: bool,

    /// Overall HTTP request timeout in seconds.
    #[builder(default = 30)]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            service_url: String::from(DEFAULT_SERVICE_URL),
            resource: String::from(DEFAULT_RESOURCE),
            content_type: String::from(DEFAULT_CONTENT_TYPE),
            wrap: true,
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `L3_SERVICE_URL` | `https://ws.level3.com` |
    /// | `L3_RESOURCE` | `v1.0` |
    /// | `L3_CONTENT_TYPE` | `text/xml` |
    /// | `L3_WRAP` | `true` |
    /// | `L3_TIMEOUT_SECS` | `30` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("L3_SERVICE_URL") {
            config.service_url = v;
        }
        if let Ok(v) = std::env::var("L3_RESOURCE") {
            config.resource = v;
        }
        if let Ok(v) = std::env::var("L3_CONTENT_TYPE") {
            config.content_type = v;
        }
        if let Ok(v) = std::env::var("L3_WRAP") {
            config.wrap = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("L3_TIMEOUT_SECS") {
            if let Ok(secs) = v.parse() {
                config.timeout_secs = secs;
            }
        }

        config
    }

    /// Service URL with any trailing slashes removed.
    #[must_use]
    pub fn normalized_service_url(&self) -> &str {
        self.service_url.trim_end_matches('/')
    }

    /// Resource segment with leading and trailing slashes removed.
    #[must_use]
    pub fn normalized_resource(&self) -> &str {
        self.resource.trim_matches('/')
    }
}

fn parse_bool(s: &str) -> bool {
    s == "1" || s.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.normalized_service_url(), "https://ws.level3.com");
        assert_eq!(config.normalized_resource(), "v1.0");
        assert_eq!(config.content_type, "text/xml");
        assert!(config.wrap);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_should_match_builder_defaults() {
        let built = ClientConfig::builder().build();
        let default = ClientConfig::default();
        assert_eq!(built.service_url, default.service_url);
        assert_eq!(built.resource, default.resource);
        assert_eq!(built.content_type, default.content_type);
        assert_eq!(built.wrap, default.wrap);
        assert_eq!(built.timeout_secs, default.timeout_secs);
    }

    #[test]
    fn test_should_normalize_slashes() {
        let config = ClientConfig::builder()
            .service_url("https://ws.example.com//".to_owned())
            .resource("/v2.0/".to_owned())
            .build();
        assert_eq!(config.normalized_service_url(), "https://ws.example.com");
        assert_eq!(config.normalized_resource(), "v2.0");
    }

    #[test]
    fn test_should_parse_bool_flags() {
        assert!(parse_bool("1"));
        assert!(parse_bool("TRUE"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("no"));
    }
}
