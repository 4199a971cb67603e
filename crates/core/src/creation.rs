//! "Create or report existing" outcome for entities with natural keys.
//!
//! Forums (by slug), threads (by slug) and users (by nickname or email) are
//! never rejected with a bare uniqueness error. The repository attempts the
//! insert and, when a unique key collides, looks the existing row up and
//! hands it back tagged as [`CreateOutcome::AlreadyExists`].

/// Result of a create call against a table with a natural unique key.
///
/// `E` differs from `T` when one attempted row can collide with several
/// existing ones, e.g. a user whose nickname and email are held by two
/// different accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome<T, E = T> {
    /// A new row was inserted.
    Created(T),
    /// The key was taken; carries the row(s) that hold it.
    AlreadyExists(E),
}

impl<T, E> CreateOutcome<T, E> {
    /// `true` when a new row was inserted.
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

impl<T> CreateOutcome<T> {
    /// Borrow the carried entity regardless of outcome.
    pub fn entity(&self) -> &T {
        match self {
            Self::Created(e) | Self::AlreadyExists(e) => e,
        }
    }

    /// Unwrap the carried entity regardless of outcome.
    pub fn into_inner(self) -> T {
        match self {
            Self::Created(e) | Self::AlreadyExists(e) => e,
        }
    }

    /// Transform the carried entity, keeping the outcome tag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CreateOutcome<U> {
        match self {
            Self::Created(e) => CreateOutcome::Created(f(e)),
            Self::AlreadyExists(e) => CreateOutcome::AlreadyExists(f(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_reports_created() {
        let outcome = CreateOutcome::Created(7);
        assert!(outcome.is_created());
        assert_eq!(*outcome.entity(), 7);
    }

    #[test]
    fn existing_payload_may_differ_from_created() {
        let outcome: CreateOutcome<u8, Vec<u8>> = CreateOutcome::AlreadyExists(vec![1, 2]);
        assert!(!outcome.is_created());
    }

    #[test]
    fn already_exists_keeps_tag_through_map() {
        let outcome = CreateOutcome::AlreadyExists("alpha").map(str::len);
        assert_eq!(outcome, CreateOutcome::AlreadyExists(5));
        assert!(!outcome.is_created());
        assert_eq!(outcome.into_inner(), 5);
    }
}
