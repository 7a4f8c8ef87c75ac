//! Generated ad copy, before and after compliance checks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Confidence reported when the model omits one.
pub const DEFAULT_CONFIDENCE: f64 = 0.8;

/// Ad copy candidates as returned by the model.
///
/// Nothing here is trusted: entries may break platform limits and the
/// optional fields may be missing entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAdCopy {
    pub headlines: Vec<String>,
    pub descriptions: Vec<String>,
    pub confidence: Option<f64>,
    pub warnings: Option<Vec<String>>,
}

impl RawAdCopy {
    /// Reads candidates out of the model's JSON reply.
    ///
    /// `headlines` and `descriptions` must be arrays of strings; `None` is
    /// returned otherwise. A non-numeric `confidence` is treated as absent
    /// and non-string warnings are skipped.
    pub fn from_json_value(value: &Value) -> Option<Self> {
        let headlines = string_list(value.get("headlines")?)?;
        let descriptions = string_list(value.get("descriptions")?)?;

        let confidence = value.get("confidence").and_then(Value::as_f64);
        let warnings = value.get("warnings").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(|w| w.as_str().map(str::to_string))
                .collect()
        });

        Some(Self {
            headlines,
            descriptions,
            confidence,
            warnings,
        })
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// Compliance-checked ad copy returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub headlines: Vec<String>,
    pub descriptions: Vec<String>,
    pub confidence: f64,
    pub warnings: Vec<String>,
}

impl From<GenerationResponse> for RawAdCopy {
    fn from(response: GenerationResponse) -> Self {
        Self {
            headlines: response.headlines,
            descriptions: response.descriptions,
            confidence: Some(response.confidence),
            warnings: Some(response.warnings),
        }
    }
}
