use thiserror::Error;

/// Core domain errors
///
/// These abort a run before any report exists. Per-target problems are
/// never raised as `DomainError`; they are recorded as outcomes instead.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Directory setup error: {message}")]
    DirectorySetup { message: String },
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn directory_setup(message: impl Into<String>) -> Self {
        Self::DirectorySetup {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error() {
        let error = DomainError::configuration("Directory token cannot be empty");
        assert_eq!(
            error.to_string(),
            "Configuration error: Directory token cannot be empty"
        );
    }

    #[test]
    fn test_directory_setup_error() {
        let error = DomainError::directory_setup("invalid proxy URL");
        assert_eq!(
            error.to_string(),
            "Directory setup error: invalid proxy URL"
        );
    }
}
