//! Codec for the `authors` field.
//!
//! The API exchanges authors as an ordered list of names. The store keeps
//! them in a single comma-separated column, though some deployments hold a
//! text array instead. Writes always send the joined string; reads accept
//! either shape.

use serde::{Deserialize, Serialize};

/// Separator placed between names when writing to the store.
pub const SEPARATOR: &str = ", ";

/// The `authors` column as it comes back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorsField {
    /// Ordered list of names
    List(Vec<String>),
    /// Single comma-separated string
    Joined(String),
}

impl Default for AuthorsField {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl From<String> for AuthorsField {
    fn from(value: String) -> Self {
        Self::Joined(value)
    }
}

impl From<&str> for AuthorsField {
    fn from(value: &str) -> Self {
        Self::Joined(value.to_string())
    }
}

impl From<Vec<String>> for AuthorsField {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Join names into the store representation.
pub fn encode(authors: &[String]) -> String {
    authors.join(SEPARATOR)
}

/// Turn a stored value back into an ordered list of names.
///
/// A string is split on `,` with each part trimmed and empty parts dropped.
/// A list is returned unchanged.
pub fn decode(field: AuthorsField) -> Vec<String> {
    match field {
        AuthorsField::List(names) => names,
        AuthorsField::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Trim every name and drop the blank ones.
///
/// Applied to incoming request bodies; blank entries are discarded, never
/// rejected.
pub fn normalize(authors: Vec<String>) -> Vec<String> {
    authors
        .into_iter()
        .filter_map(|name| {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                None
            } else if trimmed.len() == name.len() {
                Some(name)
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

/// Deserialize a nullable `authors` column into names.
///
/// For use with `#[serde(deserialize_with = ...)]` on row types.
pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let field = Option::<AuthorsField>::deserialize(deserializer)?;
    Ok(field.map(decode).unwrap_or_default())
}
