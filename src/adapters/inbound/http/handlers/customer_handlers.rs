use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use tracing::debug;

use crate::{
    adapters::inbound::http::{
        dto::{
            CustomerRequestDto, CustomerResponseDto, CustomerSummaryDto, GeolocationDataDto,
            ListCustomersDto,
        },
        errors::ApiError,
        extractors::RequestCancellation,
        router::AppState,
    },
    domain::{outcome::Failure, value_objects::CustomerId},
};

/// An id that does not parse cannot name a stored customer
fn parse_customer_id(raw: &str) -> Result<CustomerId, ApiError> {
    CustomerId::parse(raw).map_err(|err| {
        debug!("{}", err);
        ApiError::from(Failure::customer_does_not_exist(raw))
    })
}

/// Handle customer creation
pub async fn create_customer(
    State(app_state): State<AppState>,
    cancellation: RequestCancellation,
    payload: Result<Json<CustomerRequestDto>, JsonRejection>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<CustomerId>), ApiError> {
    let Json(request) = payload?;
    let customer = request.validate()?;

    let id = app_state
        .customer_service
        .create_customer(customer, cancellation.token())
        .await?
        .into_result()?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/customers/{}", id))],
        Json(id),
    ))
}

/// Handle customer listing
pub async fn list_customers(
    State(app_state): State<AppState>,
    cancellation: RequestCancellation,
    Query(params): Query<ListCustomersDto>,
) -> Result<Json<Vec<CustomerSummaryDto>>, ApiError> {
    let customers = app_state
        .customer_service
        .list_customers(
            params.name.as_deref(),
            params.email.as_deref(),
            cancellation.token(),
        )
        .await?
        .into_result()?;

    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

/// Handle customer retrieval
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(customer_id): Path<String>,
    cancellation: RequestCancellation,
) -> Result<Json<CustomerResponseDto>, ApiError> {
    let id = parse_customer_id(&customer_id)?;

    let customer = app_state
        .customer_service
        .get_customer(&id, cancellation.token())
        .await?
        .into_result()?;

    Ok(Json(customer.into()))
}

/// Handle customer deletion
pub async fn delete_customer(
    State(app_state): State<AppState>,
    Path(customer_id): Path<String>,
    cancellation: RequestCancellation,
) -> Result<StatusCode, ApiError> {
    let id = parse_customer_id(&customer_id)?;

    app_state
        .customer_service
        .delete_customer(&id, cancellation.token())
        .await?
        .into_result()?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handle customer geolocation
pub async fn get_customer_geolocation(
    State(app_state): State<AppState>,
    Path(customer_id): Path<String>,
    cancellation: RequestCancellation,
) -> Result<Json<GeolocationDataDto>, ApiError> {
    let id = parse_customer_id(&customer_id)?;

    let data = app_state
        .customer_service
        .get_customer_geolocation(&id, cancellation.token())
        .await?
        .into_result()?;

    Ok(Json(data.into()))
}
