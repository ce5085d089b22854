pub mod customer;
pub mod geolocation;

pub use customer::{Customer, CustomerSummary, NewCustomer};
pub use geolocation::{GeolocationData, GeolocationEntry};
