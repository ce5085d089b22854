pub mod geolocation;
pub mod repositories;
pub mod services;

// Re-export all port traits for convenience
pub use geolocation::GeolocationLookup;
pub use repositories::CustomerRepository;
pub use services::CustomerService;
