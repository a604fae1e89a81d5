use crate::config::Config;
use crate::generation::GeneratorBounds;
use crate::layout::PageConfig;
use crate::store::WorksheetStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Generated worksheets, kept so export reuses what was previewed.
    pub store: WorksheetStore,
    /// Export page config — font size, grid and spacing for the layout engine.
    pub page_config: PageConfig,
}

impl AppState {
    pub fn new(config: Config, page_config: PageConfig) -> Self {
        AppState {
            store: WorksheetStore::new(config.worksheet_store_capacity),
            config,
            page_config,
        }
    }

    pub fn generator_bounds(&self) -> &GeneratorBounds {
        &self.config.generator_bounds
    }
}
