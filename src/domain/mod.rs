pub mod errors;
pub mod models;
pub mod outcome;
pub mod value_objects;

// Re-export commonly used types
pub use errors::{
    ErrorCode, RepositoryError, ServiceFault, ServiceResult,
    ValidationError as DomainValidationError,
};
pub use models::*;
pub use outcome::{Failure, Outcome};
pub use value_objects::*;
