mod common;

use common::new_customer;
use customer_store_server::{
    app::{AppBuilder, AppServices, RepositoryBackend},
    create_in_memory_app, CustomerService, ErrorCode,
};
use futures::future::join_all;
use tokio_util::sync::CancellationToken;

async fn race_same_email(services: AppServices) {
    let attempts = (0..16).map(|n| {
        let service = services.customer_service.clone();
        tokio::spawn(async move {
            service
                .create_customer(
                    new_customer(&format!("Racer {}", n), "racer@server.pt"),
                    &CancellationToken::new(),
                )
                .await
                .unwrap()
        })
    });

    let outcomes: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let successes = outcomes.iter().filter(|o| o.is_success()).count();
    let conflicts = outcomes
        .iter()
        .filter(|o| o.failed_with(ErrorCode::CustomerAlreadyExists))
        .count();
    assert_eq!(successes, 1);
    assert_eq!(conflicts, outcomes.len() - 1);

    let stored = services
        .customer_service
        .list_customers(None, Some("racer@server.pt"), &CancellationToken::new())
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_in_memory() {
    race_same_email(create_in_memory_app().await.unwrap()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_in_database() {
    let services = AppBuilder::new()
        .with_repository_backend(RepositoryBackend::Database {
            connection_string: "sqlite::memory:".to_string(),
        })
        .build()
        .await
        .unwrap();

    race_same_email(services).await;
}

#[tokio::test]
async fn cancelled_request_leaves_store_untouched() {
    let services = create_in_memory_app().await.unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = services
        .customer_service
        .create_customer(new_customer("Too late", "late@server.pt"), &cancel)
        .await;
    assert!(result.is_err());

    let stored = services
        .customer_service
        .list_customers(None, None, &CancellationToken::new())
        .await
        .unwrap()
        .into_value()
        .unwrap();
    assert!(stored.is_empty());
}
