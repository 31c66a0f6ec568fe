//! Error types for MPA request signing.
//!
//! The signing scheme hashes raw ASCII bytes, so the only way signing can fail
//! is an input outside the 7-bit range.

/// Errors that can occur while signing a request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The key id contains characters outside ASCII.
    #[error("key id contains non-ASCII characters")]
    NonAsciiKeyId,

    /// The shared secret contains characters outside ASCII.
    #[error("secret contains non-ASCII characters")]
    NonAsciiSecret,

    /// A component of the string to sign contains characters outside ASCII.
    #[error("cannot sign non-ASCII {field}: {value:?}")]
    NonAsciiCanonicalString {
        /// Which signing input was rejected.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}
