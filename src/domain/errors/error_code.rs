/// Closed set of business failures a customer operation can report.
///
/// Clients branch on these codes; adding a new failure mode means adding a
/// variant here, never passing a free-form string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Another customer already uses the submitted email (case-insensitive)
    CustomerAlreadyExists,

    /// No customer is stored under the requested id
    CustomerDoesNotExist,

    /// The customer exists but has no usable postal address
    CustomerDoesNotHaveAnAddress,

    /// The geolocation provider could not resolve the customer's address
    CouldNotGetGeolocation,
}

impl ErrorCode {
    /// Every code, in declaration order
    pub const ALL: [ErrorCode; 4] = [
        ErrorCode::CustomerAlreadyExists,
        ErrorCode::CustomerDoesNotExist,
        ErrorCode::CustomerDoesNotHaveAnAddress,
        ErrorCode::CouldNotGetGeolocation,
    ];

    /// Stable, human-readable title used as the problem title on the wire
    pub fn title(&self) -> &'static str {
        match self {
            ErrorCode::CustomerAlreadyExists => "Customer Already Exists",
            ErrorCode::CustomerDoesNotExist => "Customer Does Not Exist",
            ErrorCode::CustomerDoesNotHaveAnAddress => "Customer Does Not Have An Address",
            ErrorCode::CouldNotGetGeolocation => {
                "Could Not Get Geolocation from Customer's Address"
            }
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
