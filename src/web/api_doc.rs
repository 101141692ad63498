use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use crate::databank::{Location, TelemetryRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::ping::ping,
        super::api::databank::calculate_location,
    ),
    components(schemas(TelemetryRequest, Location, ErrorResponse)),
    info(
        title = "Databank Locator API",
        description = "Routes robots to the nearest databank of their sector",
        version = "0.1.0"
    ),
    tags(
        (name = "databank", description = "Databank location"),
        (name = "health", description = "Liveness checks")
    )
)]
pub struct ApiDoc;
