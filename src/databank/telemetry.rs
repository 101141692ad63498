use serde::Deserialize;
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid request body: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error("Invalid robot status, X,Y,Z coordinates and Velocity are required")]
    InvalidTelemetry,
    #[error("Invalid coordinate, a floating point number was expected")]
    InvalidCoordinate,
    #[error("Invalid velocity, a floating point number was expected")]
    InvalidVelocity,
}

/// Telemetry as robots send it: every value is a numeric string.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TelemetryRequest {
    #[schema(example = "123.12")]
    pub x: Option<String>,
    #[schema(example = "456.56")]
    pub y: Option<String>,
    #[schema(example = "789.89")]
    pub z: Option<String>,
    #[schema(example = "20.0")]
    pub vel: Option<String>,
}

/// A robot's validated position and velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub velocity: f64,
}

impl Telemetry {
    /// Decodes a raw request body, stopping at the first problem found.
    pub fn decode(body: &[u8]) -> Result<Self, TelemetryError> {
        let request: TelemetryRequest = serde_json::from_slice(body)?;
        Telemetry::try_from(request)
    }
}

impl TryFrom<TelemetryRequest> for Telemetry {
    type Error = TelemetryError;

    fn try_from(request: TelemetryRequest) -> Result<Self, Self::Error> {
        let x = request.x.as_deref().unwrap_or_default();
        let y = request.y.as_deref().unwrap_or_default();
        let z = request.z.as_deref().unwrap_or_default();
        let vel = request.vel.as_deref().unwrap_or_default();

        if [x, y, z, vel].iter().any(|field| field.is_empty()) {
            return Err(TelemetryError::InvalidTelemetry);
        }

        // Checked in wire order so the first bad field decides the error.
        let x = parse_finite(x).ok_or(TelemetryError::InvalidCoordinate)?;
        let y = parse_finite(y).ok_or(TelemetryError::InvalidCoordinate)?;
        let z = parse_finite(z).ok_or(TelemetryError::InvalidCoordinate)?;
        let velocity = parse_finite(vel).ok_or(TelemetryError::InvalidVelocity)?;

        Ok(Telemetry { x, y, z, velocity })
    }
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"{{"x":{}, "y":{}, "z":{}, "vel":{}}}"#,
            self.x, self.y, self.z, self.velocity
        )
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}
