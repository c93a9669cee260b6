//! Field rules enforced on request bodies before they reach a store.
//!
//! Validation also normalizes: author names are trimmed and blank entries
//! dropped, so `validate` consumes the value and hands back the cleaned one.

use crate::authors;
use crate::types::{BookId, CreateBook, UpdateBook};
use thiserror::Error;

/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: usize = 500;
/// Latest accepted publication year.
pub const MAX_PUBLISH_YEAR: i32 = 3000;

/// A field constraint violation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title is empty
    #[error("title must not be empty")]
    EmptyTitle,

    /// Title longer than [`MAX_TITLE_LEN`]
    #[error("title must be at most {MAX_TITLE_LEN} characters (got {0})")]
    TitleTooLong(usize),

    /// Page count not strictly positive
    #[error("pages must be greater than 0 (got {0})")]
    InvalidPages(i32),

    /// Year outside `0..=MAX_PUBLISH_YEAR`
    #[error("publish_year must be between 0 and {MAX_PUBLISH_YEAR} (got {0})")]
    InvalidPublishYear(i32),

    /// Caller-supplied id is not a UUID
    #[error("id must be a UUID (got {0:?})")]
    InvalidId(String),
}

/// Check field constraints, returning the normalized value
pub trait Validate: Sized {
    /// Validate and normalize `self`
    fn validate(self) -> Result<Self, ValidationError>;
}

fn check_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if len == 0 {
        return Err(ValidationError::EmptyTitle);
    }
    if len > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong(len));
    }
    Ok(())
}

fn check_pages(pages: i32) -> Result<(), ValidationError> {
    if pages <= 0 {
        return Err(ValidationError::InvalidPages(pages));
    }
    Ok(())
}

fn check_publish_year(year: i32) -> Result<(), ValidationError> {
    if !(0..=MAX_PUBLISH_YEAR).contains(&year) {
        return Err(ValidationError::InvalidPublishYear(year));
    }
    Ok(())
}

fn check_id(id: &BookId) -> Result<(), ValidationError> {
    if !id.is_uuid() {
        return Err(ValidationError::InvalidId(id.to_string()));
    }
    Ok(())
}

impl Validate for CreateBook {
    fn validate(mut self) -> Result<Self, ValidationError> {
        check_title(&self.title)?;
        check_pages(self.pages)?;
        check_publish_year(self.publish_year)?;
        if let Some(id) = &self.id {
            check_id(id)?;
        }
        self.authors = authors::normalize(self.authors);
        Ok(self)
    }
}

impl Validate for UpdateBook {
    fn validate(mut self) -> Result<Self, ValidationError> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(pages) = self.pages {
            check_pages(pages)?;
        }
        if let Some(year) = self.publish_year {
            check_publish_year(year)?;
        }
        self.authors = self.authors.map(authors::normalize);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_create_passes() {
        let book = CreateBook::new("Dune", 412, 1965)
            .with_authors([" Frank Herbert ", "", "  "])
            .validate()
            .unwrap();
        assert_eq!(book.authors, vec!["Frank Herbert"]);
    }

    #[test]
    fn test_title_bounds() {
        assert_eq!(
            CreateBook::new("", 1, 2000).validate(),
            Err(ValidationError::EmptyTitle)
        );

        let at_limit = "a".repeat(MAX_TITLE_LEN);
        assert!(CreateBook::new(at_limit, 1, 2000).validate().is_ok());

        let too_long = "a".repeat(MAX_TITLE_LEN + 1);
        assert_eq!(
            CreateBook::new(too_long, 1, 2000).validate(),
            Err(ValidationError::TitleTooLong(MAX_TITLE_LEN + 1))
        );
    }

    #[test]
    fn test_title_length_counts_characters() {
        // 500 multi-byte characters are within the limit
        let title = "é".repeat(MAX_TITLE_LEN);
        assert!(CreateBook::new(title, 1, 2000).validate().is_ok());
    }

    #[test]
    fn test_pages_must_be_positive() {
        assert_eq!(
            CreateBook::new("t", 0, 2000).validate(),
            Err(ValidationError::InvalidPages(0))
        );
        assert_eq!(
            CreateBook::new("t", -3, 2000).validate(),
            Err(ValidationError::InvalidPages(-3))
        );
    }

    #[test]
    fn test_publish_year_range() {
        assert!(CreateBook::new("t", 1, 0).validate().is_ok());
        assert!(CreateBook::new("t", 1, 3000).validate().is_ok());
        assert_eq!(
            CreateBook::new("t", 1, -1).validate(),
            Err(ValidationError::InvalidPublishYear(-1))
        );
        assert_eq!(
            CreateBook::new("t", 1, 3001).validate(),
            Err(ValidationError::InvalidPublishYear(3001))
        );
    }

    #[test]
    fn test_supplied_id_must_be_uuid() {
        let err = CreateBook::new("t", 1, 2000)
            .with_id("not-a-uuid")
            .validate()
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidId("not-a-uuid".to_string()));

        let ok = CreateBook::new("t", 1, 2000)
            .with_id(BookId::generate())
            .validate();
        assert!(ok.is_ok());
    }

    #[test]
    fn test_update_checks_only_supplied_fields() {
        assert!(UpdateBook::default().validate().is_ok());

        let patch = UpdateBook {
            pages: Some(0),
            ..Default::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::InvalidPages(0)));

        let patch = UpdateBook {
            title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_update_normalizes_authors() {
        let patch = UpdateBook {
            authors: Some(vec!["  A ".to_string(), " ".to_string()]),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(patch.authors, Some(vec!["A".to_string()]));
    }
}
