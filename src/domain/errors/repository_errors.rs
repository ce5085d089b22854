use thiserror::Error;

/// Errors raised by a customer repository
///
/// `EmailAlreadyExists` is the store's uniqueness constraint firing; every
/// other variant is an infrastructure fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Insert rejected because another record holds the same email
    #[error("a customer with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    /// The backing store could not complete the operation
    #[error("customer store unavailable: {message}")]
    Backend {
        message: String,
        details: Option<String>,
    },

    /// A stored row could not be turned back into a customer record
    #[error("stored customer record is corrupt: {message}")]
    Corrupt { message: String },
}

impl RepositoryError {
    pub fn backend(message: impl Into<String>, details: impl ToString) -> Self {
        RepositoryError::Backend {
            message: message.into(),
            details: Some(details.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
