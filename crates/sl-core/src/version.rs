//! Strongly-typed schema version wrapper.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Strongly-typed wrapper for schema version strings such as `"1.0"` or
/// `"2.3.1"`.
///
/// Ordering compares numeric components pairwise, with shorter sequences
/// padded with zero, so `"10.0"` sorts after `"2.0"`. Lexical string order is
/// never used for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaVersion(String);

impl SchemaVersion {
    /// Create a new `SchemaVersion`, panicking in debug builds if the string
    /// is not a valid version.
    ///
    /// Prefer [`try_new`](Self::try_new) when handling untrusted input.
    pub fn new(version: impl Into<String>) -> Self {
        let s = version.into();
        debug_assert!(
            Self::is_valid(&s),
            "SchemaVersion must be dot-separated numeric components"
        );
        Self(s)
    }

    /// Try to create a new `SchemaVersion`, returning `None` if the string is
    /// not dot-separated numeric components.
    pub fn try_new(version: impl Into<String>) -> Option<Self> {
        let s = version.into();
        if Self::is_valid(&s) {
            Some(Self(s))
        } else {
            None
        }
    }

    fn is_valid(s: &str) -> bool {
        !s.is_empty() && s.split('.').all(|c| !c.is_empty() && c.parse::<u64>().is_ok())
    }

    /// Return the underlying version as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Numeric components of the version, in order.
    fn components(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.split('.').map(|c| c.parse().unwrap_or(0))
    }
}

impl Ord for SchemaVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let a: Vec<u64> = self.components().collect();
        let b: Vec<u64> = other.components().collect();
        for i in 0..a.len().max(b.len()) {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            match x.cmp(&y) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        // "1.0" and "1.0.0" are numerically equal; fall back to the raw
        // string so the order stays total and consistent with Eq.
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for SchemaVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SchemaVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for SchemaVersion {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SchemaVersion {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SchemaVersion {
    type Error = &'static str;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        SchemaVersion::try_new(s).ok_or("SchemaVersion must be dot-separated numeric components")
    }
}

impl TryFrom<&str> for SchemaVersion {
    type Error = &'static str;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        SchemaVersion::try_new(s).ok_or("SchemaVersion must be dot-separated numeric components")
    }
}

impl PartialEq<str> for SchemaVersion {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SchemaVersion {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for SchemaVersion {
    fn eq(&self, other: &String) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
