use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};
use http::{header, StatusCode};
use tracing::error;

use super::dto::{ProblemDetailsDto, ValidationProblemDetailsDto};
use crate::domain::{
    errors::{ErrorCode, ServiceFault, ValidationError},
    outcome::Failure,
};

pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Convert business error codes to HTTP status codes for API responses
impl From<ErrorCode> for StatusCode {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::CustomerAlreadyExists => StatusCode::CONFLICT,
            ErrorCode::CustomerDoesNotExist | ErrorCode::CustomerDoesNotHaveAnAddress => {
                StatusCode::NOT_FOUND
            }
            ErrorCode::CouldNotGetGeolocation => StatusCode::BAD_REQUEST,
        }
    }
}

/// Everything a customer handler can answer with besides success
#[derive(Debug)]
pub enum ApiError {
    Failure(Failure),
    Validation(Vec<ValidationError>),
    MalformedBody(String),
    Fault(ServiceFault),
}

impl From<Failure> for ApiError {
    fn from(failure: Failure) -> Self {
        ApiError::Failure(failure)
    }
}

impl From<ServiceFault> for ApiError {
    fn from(fault: ServiceFault) -> Self {
        ApiError::Fault(fault)
    }
}

impl From<Vec<ValidationError>> for ApiError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

fn problem<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, APPLICATION_PROBLEM_JSON)],
        Json(body),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Failure(failure) => {
                let status = StatusCode::from(failure.code);
                problem(
                    status,
                    ProblemDetailsDto {
                        status: status.as_u16(),
                        title: failure.code.title().to_string(),
                        detail: failure.description,
                    },
                )
            }
            ApiError::Validation(errors) => problem(
                StatusCode::BAD_REQUEST,
                ValidationProblemDetailsDto::from_errors(&errors),
            ),
            ApiError::MalformedBody(message) => {
                let mut body = ValidationProblemDetailsDto::from_errors(std::iter::empty());
                body.errors.insert("body".to_string(), vec![message]);
                problem(StatusCode::BAD_REQUEST, body)
            }
            ApiError::Fault(fault) => {
                error!("Customer operation failed: {}", fault);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                problem(
                    status,
                    ProblemDetailsDto {
                        status: status.as_u16(),
                        title: "Internal Server Error".to_string(),
                        detail: "The request could not be completed.".to_string(),
                    },
                )
            }
        }
    }
}
