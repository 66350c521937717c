//! Grievance field validation

use thiserror::Error;

/// Longest accepted title, in characters
pub const MAX_TITLE_LEN: usize = 200;

/// Longest accepted description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// A single validation failure; `Display` is the user-facing message
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title must be {MAX_TITLE_LEN} characters or less")]
    TitleTooLong,
    #[error("Description is required")]
    DescriptionRequired,
    #[error("Description must be {MAX_DESCRIPTION_LEN} characters or less")]
    DescriptionTooLong,
}

/// Validate grievance fields.
///
/// At most one violation per field is reported: a blank field never also
/// reports a length failure. Length checks count the raw, untrimmed input.
pub fn validate_grievance(title: &str, description: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if title.trim().is_empty() {
        errors.push(ValidationError::TitleRequired);
    } else if title.chars().count() > MAX_TITLE_LEN {
        errors.push(ValidationError::TitleTooLong);
    }

    if description.trim().is_empty() {
        errors.push(ValidationError::DescriptionRequired);
    } else if description.chars().count() > MAX_DESCRIPTION_LEN {
        errors.push(ValidationError::DescriptionTooLong);
    }

    errors
}

/// Join violations into the inline notice text
pub fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(". ")
}
