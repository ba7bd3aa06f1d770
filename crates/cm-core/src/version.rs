//! Migration version identifiers.
//!
//! A version is a sequence of numeric tokens separated by `.` or `_`
//! (`1.0.2`, `2_1`). Versions compare token by token, with missing trailing
//! tokens treated as zero, so `1`, `1.0` and `1.0.0` are the same version.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const LATEST_KEYWORD: &str = "latest";

#[derive(Debug, Clone)]
enum Kind {
    Numeric(Vec<u64>),
    /// Above every numeric version; used as the default target.
    Latest,
}

/// An ordered, immutable migration version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MigrationVersion {
    kind: Kind,
    raw: String,
}

impl MigrationVersion {
    /// Parse a version string such as `"1.0.2"`, `"2_1"` or `"latest"`.
    pub fn parse(input: &str) -> CoreResult<Self> {
        let raw = input.trim();
        if raw.eq_ignore_ascii_case(LATEST_KEYWORD) {
            return Ok(Self::latest());
        }
        if raw.is_empty() {
            return Err(invalid(input, "version must not be empty"));
        }

        let tokens = raw
            .split(['.', '_'])
            .map(|token| parse_token(input, token))
            .collect::<CoreResult<Vec<u64>>>()?;

        Ok(Self {
            kind: Kind::Numeric(tokens),
            raw: raw.to_string(),
        })
    }

    /// Parse a concrete migration version, rejecting `latest`.
    ///
    /// `latest` is only meaningful as a boundary setting; a resolved script or
    /// a schema history row always carries numeric tokens.
    pub fn parse_numeric(input: &str) -> CoreResult<Self> {
        let version = Self::parse(input)?;
        if version.is_latest() {
            return Err(invalid(input, "'latest' is not a migration version"));
        }
        Ok(version)
    }

    /// The `0` sentinel: the boundary of an empty migration set.
    pub fn zero() -> Self {
        Self {
            kind: Kind::Numeric(vec![0]),
            raw: "0".to_string(),
        }
    }

    /// The version that compares above every other version.
    pub fn latest() -> Self {
        Self {
            kind: Kind::Latest,
            raw: LATEST_KEYWORD.to_string(),
        }
    }

    /// Returns true for the [`latest`](Self::latest) sentinel.
    pub fn is_latest(&self) -> bool {
        matches!(self.kind, Kind::Latest)
    }

    /// Numeric tokens of this version, or `None` for `latest`.
    pub fn tokens(&self) -> Option<&[u64]> {
        match &self.kind {
            Kind::Numeric(tokens) => Some(tokens),
            Kind::Latest => None,
        }
    }

    /// The version as originally spelled.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Tokens with trailing zeros removed; equal versions share this form.
    fn significant_tokens(tokens: &[u64]) -> &[u64] {
        let len = tokens
            .iter()
            .rposition(|&t| t != 0)
            .map_or(0, |last| last + 1);
        &tokens[..len]
    }
}

fn parse_token(input: &str, token: &str) -> CoreResult<u64> {
    if token.is_empty() {
        return Err(invalid(input, "empty version part"));
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(
            input,
            &format!("'{token}' is not a non-negative integer"),
        ));
    }
    token
        .parse::<u64>()
        .map_err(|e| invalid(input, &format!("'{token}': {e}")))
}

fn invalid(input: &str, reason: &str) -> CoreError {
    CoreError::InvalidVersion {
        version: input.to_string(),
        reason: reason.to_string(),
    }
}

/// Serde helper for descriptor fields that must hold a concrete version.
pub(crate) fn deserialize_numeric<'de, D>(deserializer: D) -> Result<MigrationVersion, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    MigrationVersion::parse_numeric(&raw).map_err(serde::de::Error::custom)
}

fn compare_tokens(left: &[u64], right: &[u64]) -> Ordering {
    let len = left.len().max(right.len());
    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

impl Ord for MigrationVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.kind, &other.kind) {
            (Kind::Latest, Kind::Latest) => Ordering::Equal,
            (Kind::Latest, Kind::Numeric(_)) => Ordering::Greater,
            (Kind::Numeric(_), Kind::Latest) => Ordering::Less,
            (Kind::Numeric(l), Kind::Numeric(r)) => compare_tokens(l, r),
        }
    }
}

impl PartialOrd for MigrationVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MigrationVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MigrationVersion {}

impl Hash for MigrationVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.kind {
            Kind::Numeric(tokens) => {
                0u8.hash(state);
                Self::significant_tokens(tokens).hash(state);
            }
            Kind::Latest => 1u8.hash(state),
        }
    }
}

impl fmt::Display for MigrationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            Kind::Latest => f.write_str("<< Latest Version >>"),
            Kind::Numeric(_) => f.write_str(&self.raw),
        }
    }
}

impl FromStr for MigrationVersion {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MigrationVersion {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for MigrationVersion {
    type Error = CoreError;

    fn try_from(value: &str) -> CoreResult<Self> {
        Self::parse(value)
    }
}

impl From<MigrationVersion> for String {
    fn from(version: MigrationVersion) -> Self {
        version.raw
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
