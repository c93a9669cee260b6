//! Classified results of store calls.
//!
//! The store signals problems in more than one way: an error status with an
//! error document, a success status carrying an error document, or a
//! singular request that matched nothing. Each reply is sorted once into
//! [`Outcome`] and callers only ever match on that.

use crate::error::{PostgrestError, Result};

/// Why a store call produced no value
#[derive(Debug)]
pub enum Failure {
    /// No row matched; an expected outcome, not a fault
    NotFound,
    /// Anything else
    Failed(PostgrestError),
}

impl Failure {
    /// Treat a not-found as a fault, for calls where absence is unexpected
    pub fn into_error(self, context: &str) -> PostgrestError {
        match self {
            Failure::NotFound => PostgrestError::MissingData(context.to_string()),
            Failure::Failed(err) => err,
        }
    }
}

impl From<PostgrestError> for Failure {
    fn from(err: PostgrestError) -> Self {
        Failure::Failed(err)
    }
}

/// A value or a classified failure
pub type Outcome<T> = std::result::Result<T, Failure>;

/// Conversions out of [`Outcome`]
pub trait OutcomeExt<T> {
    /// Not-found becomes `Ok(None)`; failures stay errors
    fn found(self) -> Result<Option<T>>;

    /// Not-found becomes [`PostgrestError::MissingData`] with `context`
    fn required(self, context: &str) -> Result<T>;
}

impl<T> OutcomeExt<T> for Outcome<T> {
    fn found(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(Failure::NotFound) => Ok(None),
            Err(Failure::Failed(err)) => Err(err),
        }
    }

    fn required(self, context: &str) -> Result<T> {
        self.map_err(|failure| failure.into_error(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_found() {
        let outcome: Outcome<u32> = Ok(7);
        assert_eq!(outcome.found().unwrap(), Some(7));

        let outcome: Outcome<u32> = Err(Failure::NotFound);
        assert_eq!(outcome.found().unwrap(), None);

        let outcome: Outcome<u32> = Err(Failure::Failed(PostgrestError::EmptyChanges));
        assert!(matches!(outcome.found(), Err(PostgrestError::EmptyChanges)));
    }

    #[test]
    fn test_not_found_as_error() {
        let err = Failure::NotFound.into_error("insert returned no rows");
        assert!(matches!(err, PostgrestError::MissingData(msg) if msg.contains("insert")));

        let outcome: Outcome<u32> = Err(Failure::NotFound);
        assert!(matches!(outcome.required("list"), Err(PostgrestError::MissingData(_))));
    }
}
