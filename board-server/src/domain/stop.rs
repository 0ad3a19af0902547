//! Bus stop identifier type.

use std::fmt;

/// Error returned when parsing an invalid stop identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop ID: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// A validated bus stop identifier.
///
/// Stop identifiers are the rider-facing codes printed at bus stops
/// (e.g., "83139"). They are always a non-empty run of ASCII digits.
/// This type guarantees that any `StopId` value is valid by construction.
///
/// # Examples
///
/// ```
/// use board_server::domain::StopId;
///
/// let stop = StopId::parse("83139").unwrap();
/// assert_eq!(stop.as_str(), "83139");
///
/// // Surrounding whitespace is trimmed
/// assert_eq!(StopId::parse(" 83139 ").unwrap().as_str(), "83139");
///
/// // Empty and non-numeric input is rejected
/// assert!(StopId::parse("").is_err());
/// assert!(StopId::parse("KGX").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopId(String);

impl StopId {
    /// Parse a stop identifier from raw user input.
    ///
    /// Surrounding whitespace is trimmed; the remainder must be a
    /// non-empty run of ASCII digits (0-9).
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let s = s.trim();

        if s.is_empty() {
            return Err(InvalidStopId {
                reason: "must not be empty",
            });
        }

        for b in s.bytes() {
            if !b.is_ascii_digit() {
                return Err(InvalidStopId {
                    reason: "must contain only digits 0-9",
                });
            }
        }

        Ok(StopId(s.to_string()))
    }

    /// Returns the stop identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
