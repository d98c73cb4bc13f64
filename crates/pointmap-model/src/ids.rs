#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Separator between the segments of a class path (`app::model::User`).
pub const PATH_SEPARATOR: &str = "::";

/// Fully qualified class identifier in Rust path syntax.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName(String);

impl ClassName {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.split(PATH_SEPARATOR).all(is_identifier) {
            return Err(ModelError::InvalidClassName(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment (`User` for `app::model::User`).
    pub fn short_name(&self) -> &str {
        self.0
            .rsplit(PATH_SEPARATOR)
            .next()
            .unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ClassName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ClassName {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClassName> for String {
    fn from(value: ClassName) -> Self {
        value.0
    }
}

/// Returns true for `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validates a member (property, method, parameter) name.
pub fn member_name(value: &str) -> Result<&str, ModelError> {
    if is_identifier(value) {
        Ok(value)
    } else {
        Err(ModelError::InvalidMemberName(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_accepts_paths() {
        let name = ClassName::new(" app::model::User ").unwrap();
        assert_eq!(name.as_str(), "app::model::User");
        assert_eq!(name.short_name(), "User");
        assert_eq!(ClassName::new("Obj").unwrap().short_name(), "Obj");
    }

    #[test]
    fn class_name_rejects_bad_paths() {
        for raw in ["", "app::", "::User", "app:User", "1App", "app.User", "a::b c"] {
            assert!(ClassName::new(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("_private"));
        assert!(is_identifier("__construct"));
        assert!(is_identifier("getX2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("$x"));
        assert!(!is_identifier("get()"));
    }
}
