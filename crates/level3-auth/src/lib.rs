//! MPA request signing for the Level 3 CDN management API.
//!
//! Every request to the API carries two headers derived from the same
//! captured timestamp:
//!
//! ```text
//! Date: Tue, 15 Jan 2013 10:00:00 GMT
//! Authorization: MPA <KeyId>:<Signature>
//! ```
//!
//! Where `Signature = Base64(HMAC-SHA1(Secret, StringToSign))` and:
//!
//! ```text
//! StringToSign = Date + "\n" +
//!                "/" + ResourcePath + "\n" +
//!                Content-Type + "\n" +
//!                HTTP-Verb + "\n"
//! ```
//!
//! # Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use level3_auth::{Credentials, SigningContext};
//!
//! let credentials = Credentials::new("my-key", "my-secret");
//! let timestamp = Utc.with_ymd_and_hms(2013, 1, 15, 10, 0, 0).unwrap();
//! let context = SigningContext::new("rtm/v1.0/group1", "GET", "text/xml", timestamp);
//!
//! let headers = context.sign(&credentials).unwrap();
//! assert_eq!(headers.date, "Tue, 15 Jan 2013 10:00:00 GMT");
//! assert!(headers.authorization.starts_with("MPA my-key:"));
//! ```
//!
//! # Modules
//!
//! - [`credentials`] - Key id and shared secret
//! - [`error`] - Signing error types
//! - [`signer`] - Canonical string construction and MPA signature computation

pub mod credentials;
pub mod error;
pub mod signer;

pub use credentials::Credentials;
pub use error::AuthError;
pub use signer::{
    AUTH_SCHEME, DATE_FORMAT, SignedHeaders, SigningContext, build_canonical_string,
    format_http_date, sign,
};
