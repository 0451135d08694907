// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Startpage-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Startpage and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of the user owning a document.
///
/// Matching is exact and case-sensitive. The only enforced shape is that the id is a non-empty
/// *path segment* (no `/`), because it is interpolated into remote endpoints such as
/// `/get_data/<user_id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId {
    value: String,
}

impl UserId {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_user_id(&value)?;
        Ok(Self { value })
    }

    /// Builds an id from free-form user input, trimming surrounding whitespace first.
    pub fn from_input(input: &str) -> Result<Self, IdError> {
        Self::new(input.trim())
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for UserId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for UserId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for UserId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsSlash,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("user id must not be empty"),
            Self::ContainsSlash => f.write_str("user id must not contain '/'"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_user_id(value: &str) -> Result<(), IdError> {
    if value.trim().is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains('/') {
        return Err(IdError::ContainsSlash);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{IdError, UserId};

    #[test]
    fn user_id_rejects_empty_and_blank() {
        assert_eq!(UserId::new(""), Err(IdError::Empty));
        assert_eq!(UserId::new("   "), Err(IdError::Empty));
    }

    #[test]
    fn user_id_rejects_slash() {
        assert_eq!(UserId::new("a/b"), Err(IdError::ContainsSlash));
    }

    #[test]
    fn user_id_matching_is_case_sensitive() {
        let lower = UserId::new("alice").unwrap();
        let upper = UserId::new("Alice").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn from_input_trims_whitespace() {
        let id = UserId::from_input("  bob \n").unwrap();
        assert_eq!(id.as_str(), "bob");
    }
}
