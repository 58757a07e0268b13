//! Configuration for a reduction run

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Order in which the provenance markers of a record are listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerOrder {
    /// Order in which the markers were first seen for the record (default)
    #[default]
    FirstSeen,
    /// Lexicographic order
    Sorted,
}

/// Settings that shape the reduced document
///
/// # Example
/// ```
/// use linkage_reducer::config::{MarkerOrder, ReduceConfig};
///
/// let config = ReduceConfig::default();
/// assert_eq!(config.marker_order, MarkerOrder::FirstSeen);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReduceConfig {
    /// Rendering order of markers inside each provenance comment
    pub marker_order: MarkerOrder,
}

impl ReduceConfig {
    pub fn with_marker_order(mut self, marker_order: MarkerOrder) -> Self {
        self.marker_order = marker_order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keeps_first_seen_order() {
        assert_eq!(ReduceConfig::default().marker_order, MarkerOrder::FirstSeen);
    }

    #[test]
    fn test_config_serializes_kebab_case() {
        let config = ReduceConfig::default().with_marker_order(MarkerOrder::Sorted);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"marker_order":"sorted"}"#);
        let back: ReduceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
