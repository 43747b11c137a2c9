//! The seam between the synchronizer and a concrete map renderer.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    GeoJson,
    Other,
}

/// Operations the synchronizer needs from a map renderer.
///
/// Values are the JSON projections of the declaring elements, shaped like
/// the renderer's style specification.
pub trait Renderer {
    fn is_style_loaded(&self) -> bool;

    /// Returns `true` exactly once, the first time it is called after the
    /// renderer finished loading.
    fn take_load_event(&mut self) -> bool;

    fn has_layer(&self, id: &str) -> bool;
    fn add_layer(&mut self, layer: &Value);
    fn set_layout_property(&mut self, layer: &str, name: &str, value: &Value);
    fn set_paint_property(&mut self, layer: &str, name: &str, value: &Value);

    fn source_kind(&self, id: &str) -> Option<SourceKind>;
    fn add_source(&mut self, id: &str, source: &Value);
    fn set_source_data(&mut self, id: &str, data: &Value);

    fn has_image(&self, id: &str) -> bool;
    fn add_image(&mut self, id: &str, image: &Value);
    fn update_image(&mut self, id: &str, image: &Value);

    fn fit_bounds(&mut self, bounds: &Value);
    fn set_style(&mut self, url: &str);
    fn set_zoom(&mut self, zoom: f64);
    fn set_center(&mut self, center: [f64; 2]);
}
