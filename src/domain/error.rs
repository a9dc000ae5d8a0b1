use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Capacity exceeded: {requested} items requested, limit is {limit}")]
    Capacity { limit: usize, requested: usize },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn capacity(limit: usize, requested: usize) -> Self {
        Self::Capacity { limit, requested }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Team 'abc' not found");
        assert_eq!(error.to_string(), "Not found: Team 'abc' not found");
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("Team name 'core' already exists");
        assert_eq!(error.to_string(), "Conflict: Team name 'core' already exists");
    }

    #[test]
    fn test_capacity_error() {
        let error = DomainError::capacity(50, 51);
        assert_eq!(
            error.to_string(),
            "Capacity exceeded: 51 items requested, limit is 50"
        );
    }
}
