pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    Customer,
    CustomerId,
    CustomerSummary,
    DomainValidationError,
    EmailKey,
    // Errors
    ErrorCode,
    Failure,
    GeolocationData,
    GeolocationEntry,
    NewCustomer,
    Outcome,
    RepositoryError,
    ServiceFault,
    ServiceResult,
};

// Port types - interfaces for external systems
pub use ports::{CustomerRepository, CustomerService, GeolocationLookup};

// Service implementations - business logic
pub use services::{CustomerServiceBuilder, CustomerServiceImpl};

// Application factory and configuration
pub use app::{
    config_from_env, create_app_from_env, create_in_memory_app, AppBuilder, AppConfig,
    AppDependencies, AppError, AppServices, GeolocationConfig, RepositoryBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::inbound::http::{create_router, AppState};
pub use adapters::outbound::{
    geolocation::PositionStackGeolocationLookup,
    persistence::{InMemoryCustomerRepository, SqlCustomerRepository},
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_in_memory_app, create_router, AppBuilder, AppServices, AppState, Customer,
        CustomerId, CustomerRepository, CustomerService, CustomerServiceImpl, ErrorCode,
        GeolocationLookup, InMemoryCustomerRepository, NewCustomer, Outcome,
        PositionStackGeolocationLookup,
    };
}
