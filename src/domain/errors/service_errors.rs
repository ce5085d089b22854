use thiserror::Error;

use super::RepositoryError;
use crate::domain::outcome::Outcome;

/// Faults that abort a customer operation outside the business outcome
/// channel: an unavailable store, or a caller that gave up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceFault {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("operation cancelled")]
    Cancelled,
}

/// Result type for customer service operations
///
/// `Err` carries faults, `Ok(Outcome::Failure(..))` carries business failures.
pub type ServiceResult<T> = Result<Outcome<T>, ServiceFault>;
