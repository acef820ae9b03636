//! Name validation for identities, organizations and teams

use thiserror::Error;

/// Errors that can occur while validating a directory name
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NameValidationError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("{0} cannot exceed {1} characters")]
    TooLong(&'static str, usize),

    #[error("{0} cannot contain whitespace")]
    Whitespace(&'static str),

    #[error("{0} cannot contain '{1}'")]
    ReservedCharacter(&'static str, char),

    #[error("{0} cannot be '{1}'")]
    DotSegment(&'static str, &'static str),
}

const MAX_NAME_LENGTH: usize = 100;

/// Names are single path segments; everything else is percent-encoded on the wire
const RESERVED_CHARACTERS: [char; 1] = ['/'];

/// Validate a name that ends up as a single path segment of a directory call
pub fn validate_name(kind: &'static str, value: &str) -> Result<(), NameValidationError> {
    if value.is_empty() {
        return Err(NameValidationError::Empty(kind));
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(NameValidationError::TooLong(kind, MAX_NAME_LENGTH));
    }

    if value.chars().any(char::is_whitespace) {
        return Err(NameValidationError::Whitespace(kind));
    }

    if let Some(c) = value.chars().find(|c| RESERVED_CHARACTERS.contains(c)) {
        return Err(NameValidationError::ReservedCharacter(kind, c));
    }

    match value {
        "." => Err(NameValidationError::DotSegment(kind, ".")),
        ".." => Err(NameValidationError::DotSegment(kind, "..")),
        _ => Ok(()),
    }
}
