mod locator;
mod telemetry;

pub use locator::{
    Location, LocationError, LocationService, SectorContext, SectorId, SectorLocator,
};
pub use telemetry::{Telemetry, TelemetryError, TelemetryRequest};
