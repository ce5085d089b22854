mod common;

use axum::http::{header, StatusCode};
use axum_test::TestServer;
use common::{Behaviour, FakePositionStack};
use customer_store_server::{
    adapters::inbound::http::{
        CustomerResponseDto, CustomerSummaryDto, GeolocationDataDto, ProblemDetailsDto,
        ValidationProblemDetailsDto,
    },
    create_in_memory_app, CustomerId,
};
use serde_json::json;

async fn setup_test_server() -> TestServer {
    let services = create_in_memory_app().await.unwrap();
    TestServer::new(services.router()).unwrap()
}

async fn create(server: &TestServer, body: serde_json::Value) -> CustomerId {
    let response = server.post("/api/customers").json(&body).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<CustomerId>()
}

#[tokio::test]
async fn test_create_customer_endpoint() {
    let server = setup_test_server().await;

    let response = server
        .post("/api/customers")
        .json(&json!({
            "name": "A customer",
            "emailAddress": "customer@server.pt",
            "address": "Rua do Ouro, Porto, Portugal",
            "vatNumber": "123456789"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let id: CustomerId = response.json();
    assert_eq!(
        response.header(header::LOCATION),
        format!("/api/customers/{}", id).as_str()
    );

    let customer: CustomerResponseDto = server
        .get(&format!("/api/customers/{}", id))
        .await
        .json();
    assert_eq!(customer.name, "A customer");
    assert_eq!(customer.email_address, "customer@server.pt");
    assert_eq!(customer.vat_number.as_deref(), Some("123456789"));
}

#[tokio::test]
async fn test_create_requires_name_and_email() {
    let server = setup_test_server().await;

    let response = server.post("/api/customers").json(&json!({})).await;

    response.assert_status_bad_request();
    let problem: ValidationProblemDetailsDto = response.json();
    assert_eq!(problem.status, 400);
    assert_eq!(problem.errors["Name"], vec!["The Name field is required."]);
    assert_eq!(problem.errors["Email"], vec!["The Email field is required."]);
    assert_eq!(problem.errors.len(), 2);
}

#[tokio::test]
async fn test_create_requires_valid_email_and_vat() {
    let server = setup_test_server().await;

    let response = server
        .post("/api/customers")
        .json(&json!({
            "name": "A customer",
            "emailAddress": "An invalid email",
            "vatNumber": "1234567890"
        }))
        .await;

    response.assert_status_bad_request();
    let problem: ValidationProblemDetailsDto = response.json();
    assert_eq!(
        problem.errors["Email"],
        vec!["The Email field is not a valid e-mail address."]
    );
    assert_eq!(
        problem.errors["VatNumber"],
        vec!["The field VAT Number must match the regular expression '^[0-9]{9}$'."]
    );
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let server = setup_test_server().await;

    let response = server
        .post("/api/customers")
        .content_type("application/json")
        .bytes("{not json".into())
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_requires_unique_email() {
    let server = setup_test_server().await;

    create(
        &server,
        json!({"name": "A customer", "emailAddress": "customer@server.pt"}),
    )
    .await;

    let response = server
        .post("/api/customers")
        .json(&json!({"name": "Another customer", "emailAddress": "CUSTOMER@server.pt"}))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let problem: ProblemDetailsDto = response.json();
    assert_eq!(problem.status, 409);
    assert_eq!(problem.title, "Customer Already Exists");
    assert_eq!(
        problem.detail,
        "A customer with email 'CUSTOMER@server.pt' already exists."
    );
}

#[tokio::test]
async fn test_list_customers_with_filters() {
    let server = setup_test_server().await;

    let empty: Vec<CustomerSummaryDto> = server.get("/api/customers").await.json();
    assert!(empty.is_empty());

    let first = create(
        &server,
        json!({"name": "Test Customer 1", "emailAddress": "mail1@example.com"}),
    )
    .await;
    create(
        &server,
        json!({"name": "Test Customer 2", "emailAddress": "mail2@example.com"}),
    )
    .await;

    let by_name: Vec<CustomerSummaryDto> = server
        .get("/api/customers")
        .add_query_param("name", "Test Customer 1")
        .await
        .json();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, first);

    let by_email: Vec<CustomerSummaryDto> = server
        .get("/api/customers")
        .add_query_param("email", "mail1@example.com")
        .await
        .json();
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].name, "Test Customer 1");

    let all: Vec<CustomerSummaryDto> = server.get("/api/customers").await.json();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_delete_customer_endpoint() {
    let server = setup_test_server().await;

    let id = create(
        &server,
        json!({"name": "A customer", "emailAddress": "customer@server.pt"}),
    )
    .await;
    let path = format!("/api/customers/{}", id);

    server
        .delete(&path)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let second = server.delete(&path).await;
    second.assert_status_not_found();
    let problem: ProblemDetailsDto = second.json();
    assert_eq!(problem.title, "Customer Does Not Exist");

    server.get(&path).await.assert_status_not_found();
}

#[tokio::test]
async fn test_geolocation_without_address() {
    let server = setup_test_server().await;

    let id = create(
        &server,
        json!({"name": "A customer", "emailAddress": "customer@server.pt"}),
    )
    .await;

    let response = server
        .get(&format!("/api/customers/{}/geolocation", id))
        .await;

    response.assert_status_not_found();
    let problem: ProblemDetailsDto = response.json();
    assert_eq!(problem.title, "Customer Does Not Have An Address");
}

#[tokio::test]
async fn test_geolocation_endpoint() {
    let provider = FakePositionStack::start(Behaviour::Found).await;
    let server = TestServer::new(provider.app().await.router()).unwrap();
    let address = "Rua do Ouro, Porto, Portugal";

    let id = create(
        &server,
        json!({
            "name": "A customer",
            "emailAddress": "customer@server.pt",
            "address": address
        }),
    )
    .await;
    let path = format!("/api/customers/{}/geolocation", id);

    let response = server.get(&path).await;
    response.assert_status_ok();
    let geolocation: GeolocationDataDto = response.json();
    assert!(!geolocation.data.is_empty());
    assert_eq!(geolocation.data[0].address, address);
    assert_eq!(geolocation.data[0].locality.as_deref(), Some("Porto"));

    server
        .delete(&format!("/api/customers/{}", id))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let gone = server.get(&path).await;
    gone.assert_status_not_found();
    let problem: ProblemDetailsDto = gone.json();
    assert_eq!(problem.title, "Customer Does Not Exist");
}

#[tokio::test]
async fn test_geolocation_provider_failure() {
    let provider = FakePositionStack::start(Behaviour::Failing).await;
    let server = TestServer::new(provider.app().await.router()).unwrap();

    let id = create(
        &server,
        json!({
            "name": "A customer",
            "emailAddress": "customer@server.pt",
            "address": "Nowhere"
        }),
    )
    .await;

    let response = server
        .get(&format!("/api/customers/{}/geolocation", id))
        .await;

    response.assert_status_bad_request();
    let problem: ProblemDetailsDto = response.json();
    assert_eq!(
        problem.title,
        "Could Not Get Geolocation from Customer's Address"
    );
    assert_eq!(
        problem.detail,
        "Could not get geolocation data for address 'Nowhere'."
    );
}
