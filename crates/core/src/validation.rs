//! Shape checks applied to request payloads before they reach storage.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum length of forum and thread slugs.
pub const MAX_SLUG_LENGTH: usize = 128;

/// Maximum length of a user nickname.
pub const MAX_NICKNAME_LENGTH: usize = 64;

/// Validate a forum or thread slug.
///
/// Allowed characters are ASCII letters, digits, `-` and `_`. A slug must
/// contain at least one non-digit so it can never be mistaken for a numeric
/// thread id.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".to_string()));
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Slug must not exceed {MAX_SLUG_LENGTH} characters, got {}",
            slug.len()
        )));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(format!(
            "Slug '{slug}' may only contain letters, digits, '-' and '_'"
        )));
    }
    if slug.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "Slug '{slug}' must not be purely numeric"
        )));
    }
    Ok(())
}

/// Validate a user nickname: letters, digits, `_` and `.`.
pub fn validate_nickname(nickname: &str) -> Result<(), CoreError> {
    if nickname.is_empty() || nickname.len() > MAX_NICKNAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Nickname must be 1 to {MAX_NICKNAME_LENGTH} characters long"
        )));
    }
    if !nickname
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(CoreError::Validation(format!(
            "Nickname '{nickname}' may only contain letters, digits, '_' and '.'"
        )));
    }
    Ok(())
}

/// Validate an email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

/// Validate that a required text field is present.
pub fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
