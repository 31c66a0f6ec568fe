//! Scalar coercion of text content and attribute values.
//!
//! Coercion is computed every time a value is read and never stored on the
//! tree. The precedence is fixed:
//!
//! 1. non-empty and made only of ASCII digits: integer
//! 2. otherwise parseable as a decimal number: float
//! 3. otherwise: the original string, unchanged
//!
//! A leading sign is not a digit, so `-5` is a float and `+7` is a float.
//! Grouping separators are not understood, so `1,000` stays a string.

use std::fmt;

/// Typed projection of a textual value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// Unsigned digit string that fits in an `i64`.
    Integer(i64),
    /// Anything else that parses as a number.
    Float(f64),
    /// Everything else, borrowed from the tree.
    Text(&'a str),
}

/// Coerce a raw string into a [`Value`].
///
/// ```
/// use level3_xml::{Value, coerce};
///
/// assert_eq!(coerce("600"), Value::Integer(600));
/// assert_eq!(coerce("50.67"), Value::Float(50.67));
/// assert_eq!(coerce("Atlanta, GA"), Value::Text("Atlanta, GA"));
/// ```
#[must_use]
pub fn coerce(raw: &str) -> Value<'_> {
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        // Digit strings too long for i64 fall through to the float branch.
        if let Ok(n) = raw.parse::<i64>() {
            return Value::Integer(n);
        }
    }
    if let Ok(f) = raw.trim().parse::<f64>() {
        return Value::Float(f);
    }
    Value::Text(raw)
}

impl<'a> Value<'a> {
    /// The integer, if this value was coerced to one.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The numeric value as `f64`, for both integers and floats.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            Self::Text(_) => None,
        }
    }

    /// The string, if the value stayed textual.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value coerced to a number.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Text(_))
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
