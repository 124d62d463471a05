//! Application state for the web layer.

use std::sync::Arc;

use crate::data::TransitData;
use crate::transfer::TransferSearchConfig;

/// Shared application state.
///
/// Everything in it is immutable after startup, so handlers share it
/// without locking.
#[derive(Clone)]
pub struct AppState {
    /// Loaded stops, patterns and transfer indexes
    pub data: Arc<TransitData>,

    /// Boarding search configuration
    pub config: Arc<TransferSearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(data: TransitData, config: TransferSearchConfig) -> Self {
        Self {
            data: Arc::new(data),
            config: Arc::new(config),
        }
    }
}
