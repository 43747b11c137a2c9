//! The `<map-libre>` host: owns the declarative tree and the renderer, and
//! turns change notifications into the smallest set of renderer calls.
//!
//! Children of the host are routed by their `slot` attribute:
//!
//! | slot      | kind                 | handling                            |
//! |-----------|----------------------|-------------------------------------|
//! | `options` | `maplibre-options`   | camera and style setters            |
//! | `layers`  | `maplibre-layer`     | add once, then per-property setters |
//! | `sources` | `maplibre-source`    | add once, then replace the data     |
//! | `images`  | `maplibre-image`     | add or update                       |

use serde_json::Value;
use tracing::{debug, warn};

use placemark_element::{ChangeEvent, Document, ElementKind, NodeId, SLOT_ATTRIBUTE};
use placemark_json_patch::Patch;

use crate::error::SyncError;
use crate::options::MapOptions;
use crate::renderer::{Renderer, SourceKind};

pub const HOST_TAG: &str = "map-libre";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapState {
    Unattached,
    Loading,
    Ready,
}

#[derive(Debug)]
pub struct MapLibre<R: Renderer> {
    document: Document,
    renderer: Option<R>,
    state: MapState,
}

impl<R: Renderer> Default for MapLibre<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Renderer> MapLibre<R> {
    pub fn new() -> Self {
        Self {
            document: Document::with_root(HOST_TAG),
            renderer: None,
            state: MapState::Unattached,
        }
    }

    /// The host element: children appended here are routed by slot.
    pub fn host(&self) -> NodeId {
        self.document.root()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn state(&self) -> MapState {
        self.state
    }

    pub fn renderer(&self) -> Result<&R, SyncError> {
        self.renderer.as_ref().ok_or(SyncError::NoRenderer)
    }

    pub fn renderer_mut(&mut self) -> Result<&mut R, SyncError> {
        self.renderer.as_mut().ok_or(SyncError::NoRenderer)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Builds the renderer from the first options element. Only the first
    /// call has an effect.
    pub fn attach<F>(&mut self, factory: F) -> Result<(), SyncError>
    where
        F: FnOnce(&MapOptions) -> R,
    {
        if self.renderer.is_some() {
            debug!("map already attached");
            return Ok(());
        }
        let json = options_element(&self.document)
            .and_then(|node| self.document.json(node))
            .ok_or(SyncError::MissingOptions)?;
        let options = MapOptions::from_json(&json)?;
        self.renderer = Some(factory(&options));
        self.state = MapState::Loading;
        Ok(())
    }

    /// Marks the renderer ready and pushes every source, image and layer.
    pub fn loaded(&mut self) -> Result<(), SyncError> {
        let renderer = self.renderer.as_mut().ok_or(SyncError::NoRenderer)?;
        self.state = MapState::Ready;
        update_sources(&self.document, renderer);
        update_images(&self.document, renderer);
        update_layers(&self.document, renderer);
        Ok(())
    }

    /// One scheduling checkpoint: observe the load event, flush the tree,
    /// and handle every notification that reached the host.
    pub fn run_until_idle(&mut self) -> Result<(), SyncError> {
        let load_fired = self.state == MapState::Loading
            && self.renderer.as_mut().is_some_and(|r| r.take_load_event());
        if load_fired {
            self.loaded()?;
        }

        self.document.run_microtasks();
        let events = self.document.take_events();
        if self.renderer.is_none() {
            debug!(count = events.len(), "dropping notifications before attach");
            return Ok(());
        }
        for event in &events {
            self.handle_event(event)?;
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: &ChangeEvent) -> Result<(), SyncError> {
        let renderer = self.renderer.as_mut().ok_or(SyncError::NoRenderer)?;
        if self.state != MapState::Ready || !renderer.is_style_loaded() {
            debug!(node = ?event.target, "style not loaded, dropping notification");
            return Ok(());
        }
        let document = &self.document;
        if document.parent(event.target) != Some(document.root()) {
            return Ok(());
        }

        let patches = event.patches.as_deref();
        match document.attribute(event.target, SLOT_ATTRIBUTE) {
            Some("options") => {
                if let Some(options) = options_element(document).and_then(|node| document.json(node)) {
                    update_options(&options, patches, renderer);
                }
            }
            Some("layers") if document.kind(event.target) == Some(ElementKind::Layer) => {
                update_layer(document, event.target, patches, renderer);
            }
            Some("sources") => update_sources(document, renderer),
            Some("images") => update_images(document, renderer),
            _ => {}
        }
        Ok(())
    }

    // ── Host attributes ───────────────────────────────────────────────────

    /// Sets `style-src`, `zoom` or `center` on the host. Once attached the
    /// value goes straight to the renderer.
    pub fn set_host_attribute(&mut self, name: &str, value: &str) -> Result<(), SyncError> {
        let host = self.host();
        self.document.set_attribute(host, name, value)?;
        let Some(renderer) = self.renderer.as_mut() else {
            debug!(name, "map not attached, attribute stored");
            return Ok(());
        };
        match name {
            "style-src" if !value.is_empty() => renderer.set_style(value),
            "zoom" if !value.is_empty() => match value.trim().parse::<f64>() {
                Ok(zoom) => renderer.set_zoom(zoom),
                Err(_) => warn!(value, "zoom is not a number"),
            },
            "center" if !value.is_empty() => {
                let mut parts = value.split(',').map(|x| x.trim().parse::<f64>().unwrap_or(0.0));
                let lon = parts.next().unwrap_or(0.0);
                let lat = parts.next().unwrap_or(0.0);
                renderer.set_center([lon, lat]);
            }
            _ => {}
        }
        Ok(())
    }
}

// ── Slot handlers ─────────────────────────────────────────────────────────

/// The first options element; later ones are ignored.
fn options_element(document: &Document) -> Option<NodeId> {
    document
        .assigned_elements(document.root(), "options")
        .into_iter()
        .find(|node| document.kind(*node) == Some(ElementKind::Options))
}

fn update_options<R: Renderer>(options: &Value, patches: Option<&[Patch]>, renderer: &mut R) {
    let keys: Vec<String> = match patches {
        Some(patches) => {
            let mut keys = Vec::new();
            for key in patches.iter().filter_map(Patch::top_level_key) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
            keys
        }
        None => options
            .as_object()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default(),
    };

    for key in keys {
        let Some(value) = options.get(&key) else {
            continue;
        };
        match key.as_str() {
            "bounds" => renderer.fit_bounds(value),
            "style" => {
                if let Some(url) = value.as_str() {
                    renderer.set_style(url);
                }
            }
            "zoom" => {
                if let Some(zoom) = value.as_f64() {
                    renderer.set_zoom(zoom);
                }
            }
            "center" => {
                if let Some(center) = lon_lat(value) {
                    renderer.set_center(center);
                }
            }
            _ => {}
        }
    }
}

fn lon_lat(value: &Value) -> Option<[f64; 2]> {
    let pair = value.as_array()?;
    Some([pair.first()?.as_f64()?, pair.get(1)?.as_f64()?])
}

fn update_layers<R: Renderer>(document: &Document, renderer: &mut R) {
    for node in document.assigned_elements(document.root(), "layers") {
        if document.kind(node) == Some(ElementKind::Layer) {
            update_layer(document, node, None, renderer);
        }
    }
}

fn update_layer<R: Renderer>(document: &Document, node: NodeId, patches: Option<&[Patch]>, renderer: &mut R) {
    let Some(layer) = document.json(node) else {
        return;
    };
    let Some(id) = layer.get("id").and_then(Value::as_str) else {
        warn!(?node, "layer without an id");
        return;
    };
    if !renderer.has_layer(id) {
        renderer.add_layer(&layer);
        return;
    }

    for patch in patches.unwrap_or_default() {
        let Ok(segments) = patch.segments() else {
            continue;
        };
        let value = patch.value().unwrap_or(&Value::Null);
        match segments.as_slice() {
            [group, name, ..] => set_property(renderer, id, group, name, value),
            // a whole paint or layout block appeared or was replaced
            [group] => {
                if let Some(properties) = value.as_object() {
                    for (name, value) in properties {
                        set_property(renderer, id, group, name, value);
                    }
                }
            }
            [] => {}
        }
    }
}

fn set_property<R: Renderer>(renderer: &mut R, layer: &str, group: &str, name: &str, value: &Value) {
    match group {
        "layout" => renderer.set_layout_property(layer, name, value),
        "paint" => renderer.set_paint_property(layer, name, value),
        _ => {}
    }
}

fn update_sources<R: Renderer>(document: &Document, renderer: &mut R) {
    for node in document.assigned_elements(document.root(), "sources") {
        let Some(Value::Object(mut source)) = document.json(node) else {
            continue;
        };
        let Some(Value::String(id)) = source.shift_remove("id") else {
            warn!(?node, "source without an id");
            continue;
        };
        match renderer.source_kind(&id) {
            None => renderer.add_source(&id, &Value::Object(source)),
            Some(SourceKind::GeoJson) => {
                let data = source.get("data").unwrap_or(&Value::Null);
                renderer.set_source_data(&id, data);
            }
            Some(SourceKind::Other) => warn!(id, "Only GeoJSON sources supported"),
        }
    }
}

fn update_images<R: Renderer>(document: &Document, renderer: &mut R) {
    for node in document.assigned_elements(document.root(), "images") {
        if document.kind(node) != Some(ElementKind::Image) {
            continue;
        }
        let Some(image) = document.json(node) else {
            continue;
        };
        let Some(id) = image.get("id").and_then(Value::as_str) else {
            warn!(?node, "image without an id");
            continue;
        };
        if renderer.has_image(id) {
            renderer.update_image(id, &image);
        } else {
            renderer.add_image(id, &image);
        }
    }
}
