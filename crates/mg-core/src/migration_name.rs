//! Strongly-typed migration name wrapper.
//!
//! A migration name is the base name of its directory, `<label>-<timestamp>`.
//! The timestamp suffix is the sequence key that orders the catalog.

use crate::error::{CoreError, CoreResult};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Parsed `<label>-<timestamp>` migration name.
///
/// Ordering is by sequence key first and the full name second, which gives a
/// total order even when two migrations share a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MigrationName {
    raw: String,
    split: usize,
    sequence_key: u64,
}

impl MigrationName {
    /// Parse a directory base name into a `MigrationName`.
    ///
    /// The name is split on the last `-`; the suffix must be a base-10
    /// unsigned integer and the label before it must be non-empty.
    pub fn parse(name: impl Into<String>) -> CoreResult<Self> {
        let raw = name.into();
        let malformed = |reason: &str| CoreError::MalformedMigrationName {
            name: raw.clone(),
            reason: reason.to_string(),
        };

        let split = raw
            .rfind('-')
            .ok_or_else(|| malformed("expected '<label>-<timestamp>'"))?;
        let suffix = &raw[split + 1..];

        if split == 0 {
            return Err(malformed("label before '-' is empty"));
        }
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("timestamp suffix must be a base-10 integer"));
        }
        let sequence_key = suffix
            .parse::<u64>()
            .map_err(|_| malformed("timestamp suffix is out of range"))?;

        Ok(Self {
            raw,
            split,
            sequence_key,
        })
    }

    /// Return the full name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The part of the name before the timestamp.
    pub fn label(&self) -> &str {
        &self.raw[..self.split]
    }

    /// The numeric timestamp suffix used as the sort key.
    pub fn sequence_key(&self) -> u64 {
        self.sequence_key
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.raw
    }
}

impl Ord for MigrationName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sequence_key
            .cmp(&other.sequence_key)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for MigrationName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MigrationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for MigrationName {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl Deref for MigrationName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.raw
    }
}

impl FromStr for MigrationName {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for MigrationName {
    type Error = CoreError;

    fn try_from(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl PartialEq<str> for MigrationName {
    fn eq(&self, other: &str) -> bool {
        self.raw == other
    }
}

impl PartialEq<&str> for MigrationName {
    fn eq(&self, other: &&str) -> bool {
        self.raw == *other
    }
}

#[cfg(test)]
#[path = "migration_name_test.rs"]
mod tests;
