//! API credentials.
//!
//! A [`Credentials`] value pairs the public key id with the shared secret used
//! as the HMAC key. It is created once per client and never mutated.

use std::fmt;

/// Environment variable holding the key id.
pub const KEY_ID_ENV: &str = "L3_KEY_ID";

/// Environment variable holding the shared secret.
pub const SECRET_ENV: &str = "L3_SECRET";

/// Key id and shared secret issued by the API provider.
///
/// The secret is never printed by the `Debug` implementation.
///
/// # Examples
///
/// ```
/// use level3_auth::Credentials;
///
/// let credentials = Credentials::new("my-key", "my-secret");
/// assert_eq!(credentials.key_id(), "my-key");
/// assert!(!format!("{credentials:?}").contains("my-secret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key_id: String,
    secret: String,
}

impl Credentials {
    /// Create credentials from a key id and secret.
    pub fn new(key_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            secret: secret.into(),
        }
    }

    /// Read credentials from `L3_KEY_ID` / `L3_SECRET`.
    ///
    /// Returns `None` if either variable is unset.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let key_id = std::env::var(KEY_ID_ENV).ok()?;
        let secret = std::env::var(SECRET_ENV).ok()?;
        Some(Self::new(key_id, secret))
    }

    /// The public key id, sent in clear in the `Authorization` header.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_expose_key_id() {
        let credentials = Credentials::new("AKID", "secret");
        assert_eq!(credentials.key_id(), "AKID");
        assert_eq!(credentials.secret(), "secret");
    }

    #[test]
    fn test_should_redact_secret_in_debug_output() {
        let credentials = Credentials::new("AKID", "super-secret-value");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("AKID"));
        assert!(!debug.contains("super-secret-value"));
    }
}
