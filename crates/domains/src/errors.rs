//! # DomainError
//!
//! Centralized error handling for the board service.
//! Every port and service returns this type; the API layer maps each
//! variant onto one HTTP status.

use thiserror::Error;

/// The primary error type for all domain and orchestration operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Referenced entity does not exist (e.g., User, Board)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Missing required field or bounded length exceeded
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Uniqueness violation (e.g., duplicate user name, duplicate tag pair)
    #[error("conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., database unavailable)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound(entity.to_string(), id.to_string())
    }
}

/// A specialized Result type for domain logic.
pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let id = Uuid::nil();
        let err = DomainError::not_found("Board", id);
        assert_eq!(
            err.to_string(),
            "Board not found with ID 00000000-0000-0000-0000-000000000000"
        );
    }
}
