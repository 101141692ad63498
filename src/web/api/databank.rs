use axum::{body::Bytes, extract::rejection::BytesRejection, extract::State, Json};

use crate::databank::{Location, Telemetry, TelemetryRequest};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

/// Receives a robot's telemetry and answers with the nearest databank.
#[utoipa::path(
    post,
    path = "/calculate-databank-location",
    tag = "databank",
    request_body = TelemetryRequest,
    responses(
        (status = 200, description = "Databank located", body = Location),
        (status = 400, description = "Unreadable body, malformed or invalid telemetry", body = ErrorResponse),
        (status = 500, description = "Location could not be calculated", body = ErrorResponse)
    )
)]
pub async fn calculate_location(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<Location>> {
    let body = body?;
    let telemetry = Telemetry::decode(&body)?;
    let location = state.locator.nearest_databank(&telemetry, state.sector)?;

    log::debug!(
        "robot {} in sector {} routed to databank {}",
        telemetry,
        state.sector.sector_id,
        location.location
    );

    Ok(Json(location))
}
