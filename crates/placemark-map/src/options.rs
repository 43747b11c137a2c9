//! Construction options handed to the renderer factory.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use placemark_element::DEFAULT_STYLE_URL;

use crate::error::SyncError;

fn default_style() -> String {
    DEFAULT_STYLE_URL.to_string()
}

/// The projection of a `<maplibre-options>` element, typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    #[serde(default = "default_style")]
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution_control: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<[[f64; 2]; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            style: default_style(),
            attribution_control: None,
            center: None,
            bounds: None,
            zoom: None,
        }
    }
}

impl MapOptions {
    pub fn from_json(json: &Value) -> Result<Self, SyncError> {
        Ok(MapOptions::deserialize(json)?)
    }
}
