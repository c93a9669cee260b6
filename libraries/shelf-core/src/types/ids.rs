/// ID types for Shelf entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Book identifier
///
/// Opaque to the store; new ids are the string form of a v4 UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Create a book ID from an existing value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random book ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the ID is the string form of a UUID
    pub fn is_uuid(&self) -> bool {
        Uuid::parse_str(&self.0).is_ok()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BookId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for BookId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_uuids() {
        let a = BookId::generate();
        let b = BookId::generate();
        assert_ne!(a, b);
        assert!(a.is_uuid());
        assert!(b.is_uuid());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = BookId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""abc""#);
        assert!(!id.is_uuid());
    }
}
