use std::sync::Arc;

use crate::databank::{LocationService, SectorContext, SectorLocator};

#[derive(Clone)]
pub struct AppState {
    pub sector: SectorContext,
    pub locator: Arc<dyn LocationService>,
}

impl AppState {
    pub fn new(sector: SectorContext) -> Self {
        AppState::with_locator(sector, Arc::new(SectorLocator))
    }

    pub fn with_locator(sector: SectorContext, locator: Arc<dyn LocationService>) -> Self {
        AppState { sector, locator }
    }
}
