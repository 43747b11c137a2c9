//! An in-memory renderer that records what it is asked to do.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use tracing::debug;

use crate::options::MapOptions;
use crate::renderer::{Renderer, SourceKind};

#[derive(Debug, Clone, PartialEq)]
pub enum RendererCall {
    AddLayer(Value),
    SetLayoutProperty { layer: String, name: String, value: Value },
    SetPaintProperty { layer: String, name: String, value: Value },
    AddSource { id: String, source: Value },
    SetSourceData { id: String, data: Value },
    AddImage { id: String, image: Value },
    UpdateImage { id: String, image: Value },
    FitBounds(Value),
    SetStyle(String),
    SetZoom(f64),
    SetCenter([f64; 2]),
}

/// Tracks layers, sources and images the way a real renderer would, and
/// keeps the calls in order.
#[derive(Debug, Clone)]
pub struct RecordingRenderer {
    options: MapOptions,
    style_loaded: bool,
    load_pending: bool,
    layers: BTreeSet<String>,
    sources: BTreeMap<String, SourceKind>,
    images: BTreeSet<String>,
    calls: Vec<RendererCall>,
}

impl RecordingRenderer {
    pub fn new(options: &MapOptions) -> Self {
        Self {
            options: options.clone(),
            style_loaded: false,
            load_pending: false,
            layers: BTreeSet::new(),
            sources: BTreeMap::new(),
            images: BTreeSet::new(),
            calls: Vec::new(),
        }
    }

    /// Declares a source that exists before synchronization starts.
    pub fn with_source(mut self, id: &str, kind: SourceKind) -> Self {
        self.sources.insert(id.to_string(), kind);
        self
    }

    /// Marks the style as loaded and arms the one-shot load event.
    pub fn finish_loading(&mut self) {
        self.style_loaded = true;
        self.load_pending = true;
    }

    /// Simulates a style swap in progress.
    pub fn set_style_loaded(&mut self, loaded: bool) {
        self.style_loaded = loaded;
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn calls(&self) -> &[RendererCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<RendererCall> {
        std::mem::take(&mut self.calls)
    }

    fn record(&mut self, call: RendererCall) {
        debug!(?call, "renderer call");
        self.calls.push(call);
    }
}

impl Renderer for RecordingRenderer {
    fn is_style_loaded(&self) -> bool {
        self.style_loaded
    }

    fn take_load_event(&mut self) -> bool {
        std::mem::take(&mut self.load_pending)
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.contains(id)
    }

    fn add_layer(&mut self, layer: &Value) {
        if let Some(id) = layer.get("id").and_then(Value::as_str) {
            self.layers.insert(id.to_string());
        }
        self.record(RendererCall::AddLayer(layer.clone()));
    }

    fn set_layout_property(&mut self, layer: &str, name: &str, value: &Value) {
        self.record(RendererCall::SetLayoutProperty {
            layer: layer.to_string(),
            name: name.to_string(),
            value: value.clone(),
        });
    }

    fn set_paint_property(&mut self, layer: &str, name: &str, value: &Value) {
        self.record(RendererCall::SetPaintProperty {
            layer: layer.to_string(),
            name: name.to_string(),
            value: value.clone(),
        });
    }

    fn source_kind(&self, id: &str) -> Option<SourceKind> {
        self.sources.get(id).copied()
    }

    fn add_source(&mut self, id: &str, source: &Value) {
        let kind = match source.get("type").and_then(Value::as_str) {
            Some("geojson") => SourceKind::GeoJson,
            _ => SourceKind::Other,
        };
        self.sources.insert(id.to_string(), kind);
        self.record(RendererCall::AddSource {
            id: id.to_string(),
            source: source.clone(),
        });
    }

    fn set_source_data(&mut self, id: &str, data: &Value) {
        self.record(RendererCall::SetSourceData {
            id: id.to_string(),
            data: data.clone(),
        });
    }

    fn has_image(&self, id: &str) -> bool {
        self.images.contains(id)
    }

    fn add_image(&mut self, id: &str, image: &Value) {
        self.images.insert(id.to_string());
        self.record(RendererCall::AddImage {
            id: id.to_string(),
            image: image.clone(),
        });
    }

    fn update_image(&mut self, id: &str, image: &Value) {
        self.record(RendererCall::UpdateImage {
            id: id.to_string(),
            image: image.clone(),
        });
    }

    fn fit_bounds(&mut self, bounds: &Value) {
        self.record(RendererCall::FitBounds(bounds.clone()));
    }

    fn set_style(&mut self, url: &str) {
        self.record(RendererCall::SetStyle(url.to_string()));
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.record(RendererCall::SetZoom(zoom));
    }

    fn set_center(&mut self, center: [f64; 2]) {
        self.record(RendererCall::SetCenter(center));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn load_event_fires_once() {
        let mut renderer = RecordingRenderer::new(&MapOptions::default());
        assert!(!renderer.is_style_loaded());
        assert!(!renderer.take_load_event());
        renderer.finish_loading();
        assert!(renderer.is_style_loaded());
        assert!(renderer.take_load_event());
        assert!(!renderer.take_load_event());
    }

    #[test]
    fn tracks_what_it_created() {
        let mut renderer = RecordingRenderer::new(&MapOptions::default());
        renderer.add_layer(&json!({"id": "pins", "type": "circle"}));
        renderer.add_source("places", &json!({"type": "geojson"}));
        renderer.add_source("tiles", &json!({"type": "vector"}));
        assert!(renderer.has_layer("pins"));
        assert_eq!(renderer.source_kind("places"), Some(SourceKind::GeoJson));
        assert_eq!(renderer.source_kind("tiles"), Some(SourceKind::Other));
        assert_eq!(renderer.take_calls().len(), 3);
        assert!(renderer.calls().is_empty());
    }
}
