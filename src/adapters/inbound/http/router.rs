use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::{
    create_customer, delete_customer, get_customer, get_customer_geolocation, list_customers,
};
use crate::ports::services::CustomerService;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub customer_service: Arc<dyn CustomerService>,
}

impl AppState {
    pub fn new(customer_service: Arc<dyn CustomerService>) -> Self {
        Self { customer_service }
    }
}

/// Create the main application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/customers", create_customer_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Create a router with just the customer operations
pub fn create_customer_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_customer).get(list_customers))
        .route("/{customer_id}", get(get_customer).delete(delete_customer))
        .route("/{customer_id}/geolocation", get(get_customer_geolocation))
}
