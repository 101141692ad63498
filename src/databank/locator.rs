use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

use super::telemetry::Telemetry;

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location out of range for sector {0}")]
    OutOfRange(SectorId),
}

#[derive(Debug, Error)]
#[error("invalid sector ID, must be a positive integer")]
pub struct InvalidSectorId;

/// Identifier of the deployment zone this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u32")]
pub struct SectorId(NonZeroU32);

impl SectorId {
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(SectorId)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for SectorId {
    fn default() -> Self {
        SectorId(NonZeroU32::MIN)
    }
}

impl TryFrom<u32> for SectorId {
    type Error = InvalidSectorId;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        SectorId::new(id).ok_or(InvalidSectorId)
    }
}

impl FromStr for SectorId {
    type Err = InvalidSectorId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<NonZeroU32>()
            .map(SectorId)
            .map_err(|_| InvalidSectorId)
    }
}

impl fmt::Display for SectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Read-only sector settings shared by every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorContext {
    pub sector_id: SectorId,
}

impl SectorContext {
    pub fn new(sector_id: SectorId) -> Self {
        SectorContext { sector_id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    #[serde(rename = "loc")]
    #[schema(example = 1389.57)]
    pub location: f64,
}

pub trait LocationService: Send + Sync {
    fn nearest_databank(
        &self,
        telemetry: &Telemetry,
        sector: SectorContext,
    ) -> Result<Location, LocationError>;
}

/// Places the databank at `(x + y + z) * sector + vel`.
#[derive(Debug, Clone, Copy)]
pub struct SectorLocator;

impl SectorLocator {
    pub fn locate(telemetry: &Telemetry, sector: SectorContext) -> Location {
        let sector_id = f64::from(sector.sector_id.get());
        let location = (telemetry.x + telemetry.y + telemetry.z) * sector_id + telemetry.velocity;
        Location { location }
    }
}

impl LocationService for SectorLocator {
    fn nearest_databank(
        &self,
        telemetry: &Telemetry,
        sector: SectorContext,
    ) -> Result<Location, LocationError> {
        let location = SectorLocator::locate(telemetry, sector);
        if !location.location.is_finite() {
            return Err(LocationError::OutOfRange(sector.sector_id));
        }
        Ok(location)
    }
}
