#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;
use tokio::net::TcpListener;

use customer_store_server::{
    app::{AppBuilder, AppServices, GeolocationConfig},
    NewCustomer,
};

pub const TEST_ACCESS_KEY: &str = "test-access-key";

/// How the fake provider answers forward lookups
#[derive(Clone, Copy, Debug)]
pub enum Behaviour {
    /// One street-level match for every query
    Found,
    /// A well-formed response without matches
    Empty,
    /// A 500 response
    Failing,
    /// Never answers within any test's patience
    Hanging,
}

#[derive(Clone)]
struct FakeState {
    behaviour: Behaviour,
    calls: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<String>>>,
}

/// Local stand-in for the PositionStack forward geocoding API
pub struct FakePositionStack {
    pub base_url: String,
    calls: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl FakePositionStack {
    pub async fn start(behaviour: Behaviour) -> Self {
        let state = FakeState {
            behaviour,
            calls: Arc::new(AtomicUsize::new(0)),
            queries: Arc::new(Mutex::new(Vec::new())),
        };

        let router = Router::new()
            .route("/v1/forward", get(forward))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            calls: state.calls,
            queries: state.queries,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn config(&self) -> GeolocationConfig {
        GeolocationConfig {
            base_url: self.base_url.clone(),
            access_key: Some(TEST_ACCESS_KEY.to_string()),
            timeout: Duration::from_secs(5),
        }
    }

    /// In-memory application whose lookups go to this fake
    pub async fn app(&self) -> AppServices {
        AppBuilder::new()
            .with_geolocation(self.config())
            .build()
            .await
            .unwrap()
    }
}

async fn forward(
    State(state): State<FakeState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.calls.fetch_add(1, Ordering::SeqCst);

    if params.get("access_key").map(String::as_str) != Some(TEST_ACCESS_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"code": "invalid_access_key"}})),
        );
    }

    let query = params.get("query").cloned().unwrap_or_default();
    state.queries.lock().unwrap().push(query.clone());

    match state.behaviour {
        Behaviour::Found => (
            StatusCode::OK,
            Json(json!({
                "data": [{
                    "latitude": 41.1413,
                    "longitude": -8.6131,
                    "type": "street",
                    "name": query,
                    "locality": "Porto",
                    "region": "Porto",
                    "country": "Portugal"
                }]
            })),
        ),
        Behaviour::Empty => (StatusCode::OK, Json(json!({ "data": [] }))),
        Behaviour::Failing => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": {"code": "internal"}})),
        ),
        Behaviour::Hanging => {
            tokio::time::sleep(Duration::from_secs(60)).await;
            (StatusCode::OK, Json(json!({ "data": [] })))
        }
    }
}

pub fn new_customer(name: &str, email: &str) -> NewCustomer {
    NewCustomer::builder().name(name).email(email).build()
}

pub fn new_customer_at(name: &str, email: &str, address: &str) -> NewCustomer {
    NewCustomer::builder()
        .name(name)
        .email(email)
        .address(address)
        .build()
}
