//! Search configuration for constrained transfers.

use serde::{Deserialize, Serialize};

/// Number of regular boardable trips after which the constrained search
/// gives up and leaves boarding to the default logic.
pub const ABORT_SEARCH_AFTER_N_NORMAL_TRIPS: usize = 5;

/// Configuration parameters read by the boarding search at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferSearchConfig {
    /// Treat a minimum transfer time as an exact requirement, even when it
    /// is shorter than the default slack. When false, it is a floor combined
    /// with the default earliest board time.
    pub definitive_min_time: bool,

    /// Regular boardable trips to pass before the search is aborted.
    pub abort_after_normal_trips: usize,
}

impl TransferSearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(definitive_min_time: bool, abort_after_normal_trips: usize) -> Self {
        Self {
            definitive_min_time,
            abort_after_normal_trips,
        }
    }
}

impl Default for TransferSearchConfig {
    fn default() -> Self {
        Self {
            definitive_min_time: false,
            abort_after_normal_trips: ABORT_SEARCH_AFTER_N_NORMAL_TRIPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TransferSearchConfig::default();

        assert!(!config.definitive_min_time);
        assert_eq!(config.abort_after_normal_trips, 5);
    }

    #[test]
    fn custom_config() {
        let config = TransferSearchConfig::new(true, 3);

        assert!(config.definitive_min_time);
        assert_eq!(config.abort_after_normal_trips, 3);
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: TransferSearchConfig =
            serde_json::from_str(r#"{"definitive_min_time": true}"#).unwrap();

        assert!(config.definitive_min_time);
        assert_eq!(
            config.abort_after_normal_trips,
            ABORT_SEARCH_AFTER_N_NORMAL_TRIPS
        );
    }
}
