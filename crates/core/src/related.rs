//! Expansion flags for post details (`?related=user,thread,forum`).

use crate::error::CoreError;

/// Which related entities to embed next to a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelatedFlags {
    pub user: bool,
    pub thread: bool,
    pub forum: bool,
}

impl RelatedFlags {
    /// Parse a comma-separated list. Empty entries are skipped.
    pub fn parse(raw: Option<&str>) -> Result<Self, CoreError> {
        let mut flags = Self::default();
        let Some(raw) = raw else {
            return Ok(flags);
        };

        for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match item {
                "user" => flags.user = true,
                "thread" => flags.thread = true,
                "forum" => flags.forum = true,
                other => {
                    return Err(CoreError::Validation(format!(
                        "Unknown related entity '{other}'. Expected 'user', 'thread' or 'forum'"
                    )))
                }
            }
        }
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_means_nothing_expanded() {
        assert_eq!(RelatedFlags::parse(None).unwrap(), RelatedFlags::default());
        assert_eq!(RelatedFlags::parse(Some("")).unwrap(), RelatedFlags::default());
    }

    #[test]
    fn parses_any_combination() {
        let flags = RelatedFlags::parse(Some("forum, user")).unwrap();
        assert!(flags.user && flags.forum && !flags.thread);

        let flags = RelatedFlags::parse(Some("user,thread,forum")).unwrap();
        assert!(flags.user && flags.thread && flags.forum);
    }

    #[test]
    fn rejects_unknown_entity() {
        assert!(RelatedFlags::parse(Some("user,vote")).is_err());
    }
}
