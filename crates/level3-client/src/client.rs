//! The API client.
//!
//! Every call builds the path `{method}/{resource}/{access_group}`, appends
//! the form-encoded options as a query string, signs the request with a
//! timestamp captured for that call alone and sends it with the `Date`,
//! `Authorization` and `Content-Type` headers.

use std::time::Duration;

use level3_auth::{Credentials, SigningContext};
use level3_xml::XmlDocument;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, DATE};
use reqwest::{Client, Method, StatusCode};
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::invalidation::{INVALIDATIONS_METHOD, invalidation_body};

/// One API request.
///
/// ```
/// use level3_client::ApiCall;
/// use reqwest::Method;
///
/// let call = ApiCall::builder().method("rtm").access_group("12345").build();
/// assert_eq!(call.http_method, Method::GET);
/// assert!(call.options.is_empty());
/// assert!(call.body.is_none());
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct ApiCall {
    /// API method, the first path segment (e.g. `rtm`, `invalidations`).
    #[builder(setter(into))]
    pub method: String,

    /// Access group the request applies to, the last path segment.
    #[builder(setter(into))]
    pub access_group: String,

    /// Query parameters, encoded in the given order.
    #[builder(default)]
    pub options: Vec<(String, String)>,

    /// Request body. An empty body is not sent.
    #[builder(default, setter(strip_option, into))]
    pub body: Option<String>,

    /// HTTP method.
    #[builder(default = Method::GET)]
    pub http_method: Method,
}

/// Successful response body.
#[derive(Debug, Clone)]
pub enum Response {
    /// Body text, returned when wrapping is disabled.
    Raw(String),
    /// Parsed body, returned when wrapping is enabled.
    Document(XmlDocument),
}

impl Response {
    /// The parsed document, if the response was wrapped.
    #[must_use]
    pub fn document(&self) -> Option<&XmlDocument> {
        match self {
            Self::Document(doc) => Some(doc),
            Self::Raw(_) => None,
        }
    }

    /// Consume the response, returning the parsed document if it was wrapped.
    #[must_use]
    pub fn into_document(self) -> Option<XmlDocument> {
        match self {
            Self::Document(doc) => Some(doc),
            Self::Raw(_) => None,
        }
    }

    /// The body text as received, wrapped or not.
    #[must_use]
    pub fn as_raw(&self) -> &str {
        match self {
            Self::Raw(body) => body,
            Self::Document(doc) => doc.raw(),
        }
    }

    /// Consume the response, returning the body text.
    #[must_use]
    pub fn into_raw(self) -> String {
        match self {
            Self::Raw(body) => body,
            Self::Document(doc) => doc.raw().to_owned(),
        }
    }
}

/// Client for the Level 3 CDN management API.
///
/// Cloning is cheap and clones share the HTTP connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    credentials: Credentials,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a client with its own HTTP connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the HTTP client cannot be initialized.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(http, credentials, config))
    }

    /// Create a client around an existing HTTP client.
    #[must_use]
    pub fn with_client(http: Client, credentials: Credentials, config: ClientConfig) -> Self {
        Self {
            http,
            credentials,
            config,
        }
    }

    /// The client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The key id requests are signed with.
    #[must_use]
    pub fn key_id(&self) -> &str {
        self.credentials.key_id()
    }

    /// Request path without its leading slash: `{method}/{resource}/{access_group}`.
    #[must_use]
    pub fn resource_path(&self, method: &str, access_group: &str) -> String {
        format!(
            "{method}/{}/{access_group}",
            self.config.normalized_resource()
        )
    }

    /// Full request URL for a path and its query options.
    #[must_use]
    pub fn request_url(&self, path: &str, options: &[(String, String)]) -> String {
        let mut url = format!("{}/{path}", self.config.normalized_service_url());
        if !options.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(options)
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    /// Send one signed request.
    ///
    /// Returns [`Response::Document`] when wrapping is enabled and
    /// [`Response::Raw`] otherwise.
    ///
    /// # Errors
    ///
    /// - [`Error::Forbidden`] on HTTP 403
    /// - [`Error::Status`] on any other non-success status
    /// - [`Error::Transport`] if the request cannot be sent or read
    /// - [`Error::Signing`] if the credentials or path are not ASCII
    /// - [`Error::Xml`] if wrapping is enabled and the body is not XML
    pub async fn call(&self, call: &ApiCall) -> Result<Response> {
        let path = self.resource_path(&call.method, &call.access_group);
        let url = self.request_url(&path, &call.options);
        let content_type = self.config.content_type.as_str();

        let signed = SigningContext::now(&path, call.http_method.as_str(), content_type)
            .sign(&self.credentials)?;

        debug!(
            http_method = %call.http_method,
            url = %url,
            date = %signed.date,
            "Sending API request"
        );

        let mut request = self
            .http
            .request(call.http_method.clone(), url.as_str())
            .header(DATE, &signed.date)
            .header(AUTHORIZATION, &signed.authorization)
            .header(CONTENT_TYPE, content_type);

        if let Some(body) = call.body.as_ref().filter(|body| !body.is_empty()) {
            request = request.body(body.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %url, "Received API response");

        let body = response.text().await?;

        if status == StatusCode::FORBIDDEN {
            warn!(url = %url, key_id = %self.credentials.key_id(), "Request was not authorized");
            return Err(Error::Forbidden { body });
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), url = %url, "Request failed");
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        if self.config.wrap {
            Ok(Response::Document(XmlDocument::parse(body)?))
        } else {
            Ok(Response::Raw(body))
        }
    }

    /// Invalidate cached copies of `urls` for a property.
    ///
    /// Sends a `POST` to the `invalidations` method with the body built by
    /// [`invalidation_body`].
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::call`].
    pub async fn invalidate<I, S>(
        &self,
        access_group: &str,
        property_name: &str,
        urls: I,
    ) -> Result<Response>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let call = ApiCall::builder()
            .method(INVALIDATIONS_METHOD)
            .access_group(access_group)
            .body(invalidation_body(property_name, urls))
            .http_method(Method::POST)
            .build();
        self.call(&call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(config: ClientConfig) -> ApiClient {
        ApiClient::new(Credentials::new("key", "secret"), config).unwrap()
    }

    #[test]
    fn test_should_build_resource_path() {
        let client = client(
            ClientConfig::builder()
                .resource("/v1.0/".to_owned())
                .build(),
        );
        assert_eq!(client.resource_path("rtm", "group1"), "rtm/v1.0/group1");
    }

    #[test]
    fn test_should_build_url_without_query() {
        let client = client(
            ClientConfig::builder()
                .service_url("https://ws.example.com/".to_owned())
                .build(),
        );
        assert_eq!(
            client.request_url("rtm/v1.0/group1", &[]),
            "https://ws.example.com/rtm/v1.0/group1"
        );
    }

    #[test]
    fn test_should_form_encode_options_in_order() {
        let client = client(ClientConfig::default());
        let options = vec![
            ("serviceType".to_owned(), "caching".to_owned()),
            ("geo".to_owned(), "North America".to_owned()),
            ("filter".to_owned(), "a&b=c".to_owned()),
        ];
        assert_eq!(
            client.request_url("rtm/v1.0/group1", &options),
            "https://ws.level3.com/rtm/v1.0/group1?serviceType=caching&geo=North+America&filter=a%26b%3Dc"
        );
    }

    #[test]
    fn test_should_return_raw_text_from_document_response() {
        let doc = XmlDocument::parse("<a>1</a>").unwrap();
        let response = Response::Document(doc);
        assert_eq!(response.as_raw(), "<a>1</a>");
        assert!(response.document().is_some());
        assert_eq!(response.into_raw(), "<a>1</a>");
    }

    #[test]
    fn test_should_not_expose_document_for_raw_response() {
        let response = Response::Raw("plain".to_owned());
        assert!(response.document().is_none());
        assert!(response.into_document().is_none());
    }
}
