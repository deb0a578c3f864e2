//! Mapping from backend labels and scores to what the app displays.

use ecopoints_common::models::WasteCategory;
use serde_json::Value;

/// Backend label (lowercase) => category. Anything not listed is recyclable.
const LABEL_TABLE: [(&str, WasteCategory); 4] = [
    ("organic", WasteCategory::Biodegradable),
    ("recyclable", WasteCategory::Recyclable),
    ("hazardous", WasteCategory::Hazardous),
    ("non-recyclable", WasteCategory::Hazardous),
];

const FALLBACK_CATEGORY: WasteCategory = WasteCategory::Recyclable;

/// Case-insensitive lookup after trimming whitespace.
pub fn map_label(label: &str) -> WasteCategory {
    let key = label.trim().to_lowercase();
    LABEL_TABLE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, category)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}

/// Turn a 0..1 confidence into a whole percentage.
///
/// Numbers and numeric strings are read as-is; `null` and `false` count as 0,
/// `true` as 1. Everything else is treated as not-a-number and reports 0.
pub fn confidence_percent(raw: &Value) -> u8 {
    let value = match raw {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() { 0.0 } else { s.parse::<f64>().unwrap_or(f64::NAN) }
        }
        Value::Bool(b) => if *b { 1.0 } else { 0.0 },
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => f64::NAN,
    };

    if !value.is_finite() {
        return 0;
    }
    (value * 100.0).round().clamp(0.0, 100.0) as u8
}
