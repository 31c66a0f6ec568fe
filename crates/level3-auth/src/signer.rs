//! MPA signature computation.
//!
//! The string to sign is newline-terminated and its field order is fixed:
//!
//! ```text
//! <Date>\n
//! /<ResourcePath>\n
//! <Content-Type>\n
//! <HTTP-Verb>\n
//! ```
//!
//! The resource path is the request path without its leading slash
//! (`rtm/v1.0/group1`); the slash is added inside the string to sign only.
//! The date must be byte-identical to the `Date` header sent with the request,
//! so [`SigningContext::sign`] formats it exactly once and uses that string for
//! both.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use hmac::{Hmac, KeyInit, Mac};
use sha1::Sha1;
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::AuthError;

type HmacSha1 = Hmac<Sha1>;

/// Scheme name at the start of the `Authorization` header.
pub const AUTH_SCHEME: &str = "MPA";

/// `strftime` pattern of the `Date` header and the first line of the string to sign.
pub const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Inputs of one request signature.
///
/// Built fresh for every request and dropped afterwards. The timestamp is part
/// of the signed payload, so two requests never share a context.
#[derive(Debug, Clone, Copy)]
pub struct SigningContext<'a> {
    /// Request path without the leading slash, e.g. `rtm/v1.0/group1`.
    pub resource_path: &'a str,
    /// HTTP method, e.g. `GET`.
    pub http_method: &'a str,
    /// Value of the `Content-Type` header.
    pub content_type: &'a str,
    /// Instant the request is signed at.
    pub timestamp: DateTime<Utc>,
}

/// The two headers produced by signing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Value of the `Date` header.
    pub date: String,
    /// Value of the `Authorization` header: `MPA <KeyId>:<Signature>`.
    pub authorization: String,
}

impl<'a> SigningContext<'a> {
    /// Create a context for an explicit timestamp.
    #[must_use]
    pub fn new(
        resource_path: &'a str,
        http_method: &'a str,
        content_type: &'a str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            resource_path,
            http_method,
            content_type,
            timestamp,
        }
    }

    /// Create a context stamped with the current UTC time.
    #[must_use]
    pub fn now(resource_path: &'a str, http_method: &'a str, content_type: &'a str) -> Self {
        Self::new(resource_path, http_method, content_type, Utc::now())
    }

    /// The `Date` header value for this context.
    #[must_use]
    pub fn date_header(&self) -> String {
        format_http_date(&self.timestamp)
    }

    /// The exact string that gets hashed for this context.
    #[must_use]
    pub fn canonical_string(&self) -> String {
        build_canonical_string(
            &self.date_header(),
            self.resource_path,
            self.content_type,
            self.http_method,
        )
    }

    /// Sign the context, returning the `Date` and `Authorization` header values.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the credentials or any signing input
    /// contain non-ASCII characters.
    pub fn sign(&self, credentials: &Credentials) -> Result<SignedHeaders, AuthError> {
        let date = self.date_header();
        let authorization = authorization_header(
            credentials,
            &date,
            self.resource_path,
            self.content_type,
            self.http_method,
        )?;
        Ok(SignedHeaders {
            date,
            authorization,
        })
    }
}

/// Compute the `Authorization` header value for a signing context.
///
/// # Errors
///
/// Returns an [`AuthError`] if the credentials or any signing input contain
/// non-ASCII characters.
pub fn sign(credentials: &Credentials, context: &SigningContext<'_>) -> Result<String, AuthError> {
    context.sign(credentials).map(|headers| headers.authorization)
}

/// Format a timestamp the way the `Date` header expects it.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use level3_auth::format_http_date;
///
/// let ts = Utc.with_ymd_and_hms(2013, 1, 5, 7, 3, 9).unwrap();
/// assert_eq!(format_http_date(&ts), "Sat, 05 Jan 2013 07:03:09 GMT");
/// ```
#[must_use]
pub fn format_http_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(DATE_FORMAT).to_string()
}

/// Build the string to sign from an already formatted date.
#[must_use]
pub fn build_canonical_string(
    date: &str,
    resource_path: &str,
    content_type: &str,
    http_method: &str,
) -> String {
    format!("{date}\n/{resource_path}\n{content_type}\n{http_method}\n")
}

fn authorization_header(
    credentials: &Credentials,
    date: &str,
    resource_path: &str,
    content_type: &str,
    http_method: &str,
) -> Result<String, AuthError> {
    if !credentials.key_id().is_ascii() {
        return Err(AuthError::NonAsciiKeyId);
    }
    if !credentials.secret().is_ascii() {
        return Err(AuthError::NonAsciiSecret);
    }
    for (field, value) in [
        ("resource path", resource_path),
        ("content type", content_type),
        ("HTTP method", http_method),
    ] {
        if !value.is_ascii() {
            return Err(AuthError::NonAsciiCanonicalString {
                field,
                value: value.to_owned(),
            });
        }
    }

    let string_to_sign = build_canonical_string(date, resource_path, content_type, http_method);

    debug!(
        key_id = %credentials.key_id(),
        string_to_sign = ?string_to_sign,
        "Built MPA string to sign"
    );

    let signature = compute_signature(credentials.secret(), &string_to_sign);
    Ok(format!("{AUTH_SCHEME} {}:{signature}", credentials.key_id()))
}

/// Base64(HMAC-SHA1(secret, string_to_sign)).
fn compute_signature(secret: &str, string_to_sign: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("HMAC can accept any key length");
    mac.update(string_to_sign.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}
