//! Stop identifier types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid stop code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop code {code:?}: {reason}")]
pub struct InvalidStopCode {
    code: String,
    reason: &'static str,
}

/// Code of a transit stop, as used by the upstream APIs.
///
/// Codes are short strings of ASCII letters and digits (in practice digits,
/// often with leading zeros such as `"0012"`). They are compared as strings,
/// never as numbers, so `"0012"` and `"12"` are different stops.
///
/// # Examples
///
/// ```
/// use transit_board::domain::StopCode;
///
/// let code = StopCode::parse("0012").unwrap();
/// assert_eq!(code.as_str(), "0012");
///
/// assert!(StopCode::parse("").is_err());
/// assert!(StopCode::parse("12/34").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopCode(String);

impl StopCode {
    /// Parse a stop code from a string.
    ///
    /// The code must be non-empty and consist only of ASCII letters and digits,
    /// since it ends up as a URL path segment.
    pub fn parse(s: &str) -> Result<Self, InvalidStopCode> {
        if s.is_empty() {
            return Err(InvalidStopCode {
                code: s.to_string(),
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidStopCode {
                code: s.to_string(),
                reason: "must contain only ASCII letters and digits",
            });
        }

        Ok(StopCode(s.to_string()))
    }

    /// Returns the stop code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopCode {
    type Error = InvalidStopCode;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        StopCode::parse(&s)
    }
}

impl From<StopCode> for String {
    fn from(code: StopCode) -> Self {
        code.0
    }
}

impl fmt::Debug for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopCode({})", self.0)
    }
}

impl fmt::Display for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transit stop: a code and a (possibly localized) display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    pub code: StopCode,
    pub name: String,
}

impl Stop {
    /// Create a new stop.
    pub fn new(code: StopCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }

    /// Create a stop for which no name is known locally.
    pub fn unnamed(code: StopCode) -> Self {
        Self {
            code,
            name: String::new(),
        }
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
