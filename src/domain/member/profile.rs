//! Profile handle value type

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{DomainError, DomainResult};

/// Longest accepted handle, in characters.
pub const PROFILE_MAX_LEN: usize = 15;

static PROFILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]{3,}$").expect("profile pattern is valid"));

/// Public handle chosen by a member, e.g. `jane.doe`.
///
/// The empty string is the "no profile chosen" value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Profile(String);

impl Profile {
    pub fn parse(value: &str) -> DomainResult<Self> {
        if value.is_empty() {
            return Ok(Self::unset());
        }
        if value.chars().count() > PROFILE_MAX_LEN {
            return Err(DomainError::Validation(format!(
                "profile must be at most {} characters",
                PROFILE_MAX_LEN
            )));
        }
        if !PROFILE_PATTERN.is_match(value) {
            return Err(DomainError::Validation(format!(
                "profile '{}' must be 3-{} letters, digits, '.', '_' or '-'",
                value, PROFILE_MAX_LEN
            )));
        }
        Ok(Self(value.to_string()))
    }

    pub fn unset() -> Self {
        Self(String::new())
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `@handle`, or an empty string when unset.
    pub fn display_name(&self) -> String {
        if self.is_unset() {
            String::new()
        } else {
            format!("@{}", self.0)
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Profile {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
