//! Book types
use super::ids::BookId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A stored book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub authors: Vec<String>,
    pub pages: i32,
    pub publish_year: i32,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    /// Set by the store on insert
    pub created_at: DateTime<Utc>,
}

/// Data for creating a book, also used as a full replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBook {
    /// Caller-supplied id; one is generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub pages: i32,
    pub publish_year: i32,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
}

impl CreateBook {
    pub fn new(title: impl Into<String>, pages: i32, publish_year: i32) -> Self {
        Self {
            id: None,
            title: title.into(),
            authors: Vec::new(),
            pages,
            publish_year,
            cover_url: None,
            isbn: None,
        }
    }

    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_id(mut self, id: impl Into<BookId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Change set replacing every mutable field.
    ///
    /// `cover_url` and `isbn` are cleared when not given. The id is not part
    /// of a replacement.
    pub fn into_replacement(self) -> UpdateBook {
        UpdateBook {
            title: Some(self.title),
            authors: Some(self.authors),
            pages: Some(self.pages),
            publish_year: Some(self.publish_year),
            cover_url: Some(self.cover_url),
            isbn: Some(self.isbn),
        }
    }
}

/// Partial update; only populated fields are written.
///
/// `cover_url` and `isbn` tell an absent key (`None`) apart from an explicit
/// `null` (`Some(None)`), which clears the column. A `null` for any other
/// field counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_year: Option<i32>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_url: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub isbn: Option<Option<String>>,
}

impl UpdateBook {
    /// No field is populated
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.authors.is_none()
            && self.pages.is_none()
            && self.publish_year.is_none()
            && self.cover_url.is_none()
            && self.isbn.is_none()
    }

    /// Write the populated fields onto `book`
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title.clone_from(title);
        }
        if let Some(authors) = &self.authors {
            book.authors.clone_from(authors);
        }
        if let Some(pages) = self.pages {
            book.pages = pages;
        }
        if let Some(publish_year) = self.publish_year {
            book.publish_year = publish_year;
        }
        if let Some(cover_url) = &self.cover_url {
            book.cover_url.clone_from(cover_url);
        }
        if let Some(isbn) = &self.isbn {
            book.isbn.clone_from(isbn);
        }
    }
}

/// Marks a key that is present in the payload, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book {
            id: BookId::new("b1"),
            title: "Dune".to_string(),
            authors: vec!["Frank Herbert".to_string()],
            pages: 412,
            publish_year: 1965,
            cover_url: Some("https://example.com/dune.jpg".to_string()),
            isbn: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let patch: UpdateBook = serde_json::from_str(r#"{"cover_url": null}"#).unwrap();
        assert_eq!(patch.cover_url, Some(None));
        assert_eq!(patch.isbn, None);
        assert!(!patch.is_empty());

        let patch: UpdateBook = serde_json::from_str(r#"{"isbn": "978-0441013593"}"#).unwrap();
        assert_eq!(patch.isbn, Some(Some("978-0441013593".to_string())));
    }

    #[test]
    fn test_null_on_required_field_is_absent() {
        let patch: UpdateBook = serde_json::from_str(r#"{"title": null, "pages": null}"#).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_empty_object_is_empty_patch() {
        let patch: UpdateBook = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut book = sample_book();
        let before = book.clone();

        let patch = UpdateBook {
            pages: Some(500),
            ..Default::default()
        };
        patch.apply_to(&mut book);

        assert_eq!(book.pages, 500);
        assert_eq!(book.title, before.title);
        assert_eq!(book.authors, before.authors);
        assert_eq!(book.cover_url, before.cover_url);
        assert_eq!(book.created_at, before.created_at);
    }

    #[test]
    fn test_replacement_clears_optional_fields() {
        let mut book = sample_book();
        let replacement = CreateBook::new("Dune Messiah", 256, 1969)
            .with_authors(["Frank Herbert"])
            .into_replacement();

        replacement.apply_to(&mut book);

        assert_eq!(book.title, "Dune Messiah");
        assert_eq!(book.cover_url, None);
        assert_eq!(book.id, BookId::new("b1"));
    }

    #[test]
    fn test_update_serializes_only_supplied_fields() {
        let patch = UpdateBook {
            pages: Some(500),
            isbn: Some(None),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, serde_json::json!({ "pages": 500, "isbn": null }));
    }

    #[test]
    fn test_create_defaults() {
        let book: CreateBook =
            serde_json::from_str(r#"{"title": "Dune", "pages": 412, "publish_year": 1965}"#)
                .unwrap();
        assert!(book.authors.is_empty());
        assert!(book.id.is_none());
        assert!(book.cover_url.is_none());
    }
}
