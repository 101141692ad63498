use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::databank::{LocationError, TelemetryError};

pub enum ApiError {
    Body(BytesRejection),
    Telemetry(TelemetryError),
    Location(LocationError),
}

impl From<BytesRejection> for ApiError {
    fn from(e: BytesRejection) -> Self {
        ApiError::Body(e)
    }
}

impl From<TelemetryError> for ApiError {
    fn from(e: TelemetryError) -> Self {
        ApiError::Telemetry(e)
    }
}

impl From<LocationError> for ApiError {
    fn from(e: LocationError) -> Self {
        ApiError::Location(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Body(e) => {
                log::warn!("could not read request body: {}", e.body_text());
                (StatusCode::BAD_REQUEST, e.body_text())
            }
            ApiError::Telemetry(e) => {
                log::warn!("rejected robot telemetry: {}", e);
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Location(e) => {
                log::error!("databank location failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unable to calculate databank location".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse::new(status, message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = 400)]
    pub status_code: u16,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ErrorResponse {
            status_code: status.as_u16(),
            message: message.into(),
        }
    }
}
