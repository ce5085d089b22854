use thiserror::Error;

/// Validation errors for customer submissions and value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The {label} field is required.")]
    Required {
        field: &'static str,
        label: &'static str,
    },

    #[error("The {label} field is not a valid e-mail address.")]
    InvalidEmail {
        field: &'static str,
        label: &'static str,
    },

    #[error("The field {label} must match the regular expression '^[0-9]{{9}}$'.")]
    InvalidVatNumber {
        field: &'static str,
        label: &'static str,
    },

    #[error("'{value}' is not a valid customer id")]
    InvalidCustomerId { value: String },
}

impl ValidationError {
    /// Name of the submitted field the error refers to
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field, .. }
            | ValidationError::InvalidEmail { field, .. }
            | ValidationError::InvalidVatNumber { field, .. } => field,
            ValidationError::InvalidCustomerId { .. } => "CustomerId",
        }
    }
}
