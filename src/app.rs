use std::sync::Arc;
use std::time::Duration;

use crate::{
    adapters::{
        inbound::http::{create_router, AppState},
        outbound::{
            geolocation::{PositionStackGeolocationLookup, DEFAULT_POSITION_STACK_URL},
            persistence::{InMemoryCustomerRepository, SqlCustomerRepository},
        },
    },
    ports::{geolocation::GeolocationLookup, repositories::CustomerRepository},
    services::CustomerServiceImpl,
};

/// Configuration for the application
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub repository_backend: RepositoryBackend,
    pub geolocation: GeolocationConfig,
}

/// Repository backend configuration
#[derive(Debug, Clone, Default)]
pub enum RepositoryBackend {
    #[default]
    InMemory,
    Database { connection_string: String },
}

/// Geolocation provider configuration
#[derive(Debug, Clone)]
pub struct GeolocationConfig {
    pub base_url: String,
    /// Checked on every lookup; a missing key fails lookups, not startup
    pub access_key: Option<String>,
    pub timeout: Duration,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_POSITION_STACK_URL.to_string(),
            access_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Application dependencies container
pub struct AppDependencies {
    pub customer_repository: Arc<dyn CustomerRepository>,
    pub geolocation_lookup: Arc<dyn GeolocationLookup>,
}

/// Application services container
#[derive(Clone)]
pub struct AppServices {
    pub customer_service: CustomerServiceImpl,
}

impl AppServices {
    /// Router serving the customer API over these services
    pub fn router(&self) -> axum::Router {
        create_router(AppState::new(Arc::new(self.customer_service.clone())))
    }
}

/// Application builder for dependency injection
#[derive(Default)]
pub struct AppBuilder {
    config: AppConfig,
    geolocation_lookup: Option<Arc<dyn GeolocationLookup>>,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure repository backend
    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    /// Configure the PositionStack lookup
    pub fn with_geolocation(mut self, geolocation: GeolocationConfig) -> Self {
        self.config.geolocation = geolocation;
        self
    }

    /// Use the given lookup instead of building one from configuration
    pub fn with_geolocation_lookup(mut self, lookup: Arc<dyn GeolocationLookup>) -> Self {
        self.geolocation_lookup = Some(lookup);
        self
    }

    /// Build the application dependencies
    pub async fn build_dependencies(self) -> Result<AppDependencies, AppError> {
        let customer_repository = self.create_repository().await?;

        let geolocation_lookup = match self.geolocation_lookup {
            Some(lookup) => lookup,
            None => Self::create_geolocation_lookup(&self.config.geolocation)?,
        };

        Ok(AppDependencies {
            customer_repository,
            geolocation_lookup,
        })
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let deps = self.build_dependencies().await?;

        let customer_service =
            CustomerServiceImpl::new(deps.customer_repository, deps.geolocation_lookup);

        Ok(AppServices { customer_service })
    }

    /// Create the repository based on configuration
    async fn create_repository(&self) -> Result<Arc<dyn CustomerRepository>, AppError> {
        match &self.config.repository_backend {
            RepositoryBackend::InMemory => Ok(Arc::new(InMemoryCustomerRepository::new())),
            RepositoryBackend::Database { connection_string } => {
                let repository = SqlCustomerRepository::connect(connection_string)
                    .await
                    .map_err(|e| AppError::RepositoryInit {
                        message: format!("Failed to open '{}': {}", connection_string, e),
                    })?;
                Ok(Arc::new(repository))
            }
        }
    }

    fn create_geolocation_lookup(
        config: &GeolocationConfig,
    ) -> Result<Arc<dyn GeolocationLookup>, AppError> {
        let lookup = PositionStackGeolocationLookup::new(
            config.base_url.clone(),
            config.access_key.clone(),
            config.timeout,
        )
        .map_err(|e| AppError::GeolocationInit {
            message: e.to_string(),
        })?;

        Ok(Arc::new(lookup))
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },

    #[error("Geolocation initialization error: {message}")]
    GeolocationInit { message: String },
}

/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}

/// Read the application configuration from environment variables
pub fn config_from_env() -> Result<AppConfig, AppError> {
    let repository_backend = match std::env::var("REPOSITORY_BACKEND").as_deref() {
        Ok("database") => {
            let connection_string =
                std::env::var("DATABASE_URL").map_err(|_| AppError::Configuration {
                    message: "DATABASE_URL environment variable required".to_string(),
                })?;
            RepositoryBackend::Database { connection_string }
        }
        Ok("memory") | Ok("") | Err(_) => RepositoryBackend::InMemory,
        Ok(other) => {
            return Err(AppError::Configuration {
                message: format!("Unknown REPOSITORY_BACKEND '{}'", other),
            })
        }
    };

    let mut geolocation = GeolocationConfig::default();
    if let Ok(base_url) = std::env::var("POSITIONSTACK_URL") {
        geolocation.base_url = base_url;
    }
    geolocation.access_key = std::env::var("POSITIONSTACK_API_KEY").ok();

    Ok(AppConfig {
        repository_backend,
        geolocation,
    })
}

/// Create application from environment variables
pub async fn create_app_from_env() -> Result<AppServices, AppError> {
    AppBuilder::new().with_config(config_from_env()?).build().await
}
