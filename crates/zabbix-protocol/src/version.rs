//! Platform version parsing and comparison.
//!
//! The platform encodes its *feature* version in the first two components
//! and a patch level in the third: `6.4.12` is feature release 6.4,
//! patch 12. Only the feature version takes part in ordering, so
//! `6.4.1 == 6.4.12`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;

/// Oldest feature version this library supports.
pub const MIN_SUPPORTED: f64 = 5.0;

/// Newest feature version this library was tested against.
pub const MAX_SUPPORTED: f64 = 7.0;

/// A parsed platform version such as `7.0.0alpha`.
///
/// Immutable once constructed. Equality and ordering look at
/// [`major`](Self::major) only.
#[derive(Debug, Clone)]
pub struct ApiVersion {
    raw: String,
    first: u32,
    second: u32,
    patch: u32,
    text: String,
    major: f64,
}

impl ApiVersion {
    /// Parses `<major>.<minor>.<patch><text>` where the first three parts
    /// are decimal digits and `text` contains no digits.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidVersion`] for any other shape, including
    /// two-component (`"6.0"`) and bare (`"7"`) versions.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let invalid = || ProtocolError::InvalidVersion(raw.to_string());

        let (first, rest) = split_number(raw).ok_or_else(invalid)?;
        let rest = rest.strip_prefix('.').ok_or_else(invalid)?;
        let (second, rest) = split_number(rest).ok_or_else(invalid)?;
        let rest = rest.strip_prefix('.').ok_or_else(invalid)?;
        let (patch, text) = split_number(rest).ok_or_else(invalid)?;

        if text.chars().any(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        // "6.2" as a decimal, the same way the platform writes it.
        let major = format!("{first}.{second}")
            .parse::<f64>()
            .map_err(|_| invalid())?;

        Ok(Self {
            raw: raw.to_string(),
            first,
            second,
            patch,
            text: text.to_string(),
            major,
        })
    }

    /// The feature version as a decimal: `6.2.0` → `6.2`.
    pub fn major(&self) -> f64 {
        self.major
    }

    /// The patch level: `6.0.10alpha` → `10`.
    pub fn minor(&self) -> u32 {
        self.patch
    }

    /// The trailing non-numeric suffix, empty when absent.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The string this version was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Long-term-support releases are the `.0` feature releases from
    /// major 7 onwards.
    pub fn is_lts(&self) -> bool {
        self.second == 0 && self.first >= 7
    }

    /// Compares against a dynamically typed JSON value.
    ///
    /// Numbers compare against [`major`](Self::major); strings must parse
    /// as versions themselves.
    ///
    /// # Errors
    /// [`ProtocolError::Incomparable`] for booleans, nulls, arrays and
    /// objects; [`ProtocolError::InvalidVersion`] for strings that are not
    /// versions.
    #[cfg(feature = "json")]
    pub fn try_cmp(
        &self,
        other: &serde_json::Value,
    ) -> Result<Ordering, ProtocolError> {
        use serde_json::Value;

        let found = match other {
            Value::Number(n) => {
                // Every serde_json number converts to f64; the fallback is
                // unreachable but keeps this total.
                let n = n.as_f64().ok_or(ProtocolError::Incomparable {
                    found: "number",
                })?;
                return Ok(cmp_f64(self.major, n));
            }
            Value::String(s) => {
                let other = ApiVersion::parse(s)?;
                return Ok(cmp_f64(self.major, other.major));
            }
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };

        Err(ProtocolError::Incomparable { found })
    }
}

/// Splits a leading run of ASCII digits off `s`.
fn split_number(s: &str) -> Option<(u32, &str)> {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

// `major` is built from digits, so it is never NaN and this is total.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

impl FromStr for ApiVersion {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for ApiVersion {
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(cmp_f64(self.major, other.major))
    }
}

impl PartialEq<f64> for ApiVersion {
    fn eq(&self, other: &f64) -> bool {
        self.major == *other
    }
}

impl PartialOrd<f64> for ApiVersion {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.major.partial_cmp(other)
    }
}
