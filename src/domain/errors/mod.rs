mod error_code;
mod repository_errors;
mod service_errors;
mod validation_errors;

pub use error_code::*;
pub use repository_errors::*;
pub use service_errors::*;
pub use validation_errors::*;
