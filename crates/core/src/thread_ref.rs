//! Thread references as they arrive in request paths.
//!
//! A thread can be addressed by its numeric id or by its slug. The string is
//! tried as a decimal id first; the repository falls back to a slug lookup
//! when that id does not exist, so a purely numeric slug still resolves.

use crate::types::DbId;

/// A parsed `{slug_or_id}` path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadRef {
    /// The segment parsed as a decimal integer. `raw` is kept for the
    /// slug fallback.
    Id { id: DbId, raw: String },
    /// The segment is not a number and can only be a slug.
    Slug(String),
}

impl ThreadRef {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<DbId>() {
            Ok(id) => Self::Id {
                id,
                raw: raw.to_string(),
            },
            Err(_) => Self::Slug(raw.to_string()),
        }
    }

    /// Numeric id to try first, if any.
    pub fn id(&self) -> Option<DbId> {
        match self {
            Self::Id { id, .. } => Some(*id),
            Self::Slug(_) => None,
        }
    }

    /// Slug to look up when the id interpretation does not resolve.
    pub fn slug(&self) -> &str {
        match self {
            Self::Id { raw, .. } => raw,
            Self::Slug(slug) => slug,
        }
    }
}

impl std::fmt::Display for ThreadRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_reference_is_an_id() {
        let r = ThreadRef::parse("42");
        assert_eq!(r.id(), Some(42));
        assert_eq!(r.slug(), "42");
    }

    #[test]
    fn text_reference_is_a_slug() {
        let r = ThreadRef::parse("how-to-rust");
        assert_eq!(r.id(), None);
        assert_eq!(r.slug(), "how-to-rust");
    }

    #[test]
    fn mixed_reference_is_a_slug() {
        assert_eq!(ThreadRef::parse("12abc"), ThreadRef::Slug("12abc".into()));
    }

    #[test]
    fn display_uses_raw_text() {
        assert_eq!(ThreadRef::parse("007").to_string(), "007");
    }
}
