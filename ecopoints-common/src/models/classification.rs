// File: ecopoints-common/src/models/classification.rs

use serde::{Deserialize, Serialize};

/// The three outcomes the app understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteCategory {
    Biodegradable,
    Recyclable,
    Hazardous,
}

impl std::fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WasteCategory::Biodegradable => "biodegradable",
            WasteCategory::Recyclable => "recyclable",
            WasteCategory::Hazardous => "hazardous",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: WasteCategory,
    /// Percentage in 0..=100.
    pub confidence: u8,
    /// Round-trip wall-clock time in milliseconds.
    pub processing_time_ms: u64,
}
