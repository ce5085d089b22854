pub mod dto;
pub mod errors;
pub mod extractors;
pub mod handlers;
pub mod router;

pub use dto::*;
pub use errors::{ApiError, APPLICATION_PROBLEM_JSON};
pub use extractors::RequestCancellation;
pub use handlers::*;
pub use router::*;
