//! The closed set of element kinds and their schemas.

pub mod geojson;
pub mod maplibre;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::schema::Schema;

/// Every kind of element that participates in the element model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    // GeoJSON
    FeatureCollection,
    Feature,
    Point,
    LineString,
    Coordinate,
    Properties,
    // map
    Options,
    Layer,
    LayerLayout,
    LayerPaint,
    Position,
    Bounds,
    Source,
    Image,
}

impl ElementKind {
    pub const ALL: [ElementKind; 14] = [
        ElementKind::FeatureCollection,
        ElementKind::Feature,
        ElementKind::Point,
        ElementKind::LineString,
        ElementKind::Coordinate,
        ElementKind::Properties,
        ElementKind::Options,
        ElementKind::Layer,
        ElementKind::LayerLayout,
        ElementKind::LayerPaint,
        ElementKind::Position,
        ElementKind::Bounds,
        ElementKind::Source,
        ElementKind::Image,
    ];

    /// The default tag this kind registers under.
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::FeatureCollection => "geojson-featurecollection",
            ElementKind::Feature => "geojson-feature",
            ElementKind::Point => "geojson-point",
            ElementKind::LineString => "geojson-linestring",
            ElementKind::Coordinate => "geojson-coordinate",
            ElementKind::Properties => "geojson-properties",
            ElementKind::Options => "maplibre-options",
            ElementKind::Layer => "maplibre-layer",
            ElementKind::LayerLayout => "maplibre-layer-layout",
            ElementKind::LayerPaint => "maplibre-layer-paint",
            ElementKind::Position => "maplibre-position",
            ElementKind::Bounds => "maplibre-bounds",
            ElementKind::Source => "maplibre-source",
            ElementKind::Image => "maplibre-image",
        }
    }

    pub fn schema(self) -> &'static Schema {
        match self {
            ElementKind::FeatureCollection => &geojson::FEATURE_COLLECTION,
            ElementKind::Feature => &geojson::FEATURE,
            ElementKind::Point => &geojson::POINT,
            ElementKind::LineString => &geojson::LINE_STRING,
            ElementKind::Coordinate => &geojson::COORDINATE,
            ElementKind::Properties => &geojson::PROPERTIES,
            ElementKind::Options => &maplibre::OPTIONS,
            ElementKind::Layer => &maplibre::LAYER,
            ElementKind::LayerLayout => &maplibre::LAYER_LAYOUT,
            ElementKind::LayerPaint => &maplibre::LAYER_PAINT,
            ElementKind::Position => &maplibre::POSITION,
            ElementKind::Bounds => &maplibre::BOUNDS,
            ElementKind::Source => &maplibre::SOURCE,
            ElementKind::Image => &maplibre::IMAGE,
        }
    }

    /// Kinds that diff each snapshot against the previous one and attach
    /// the patches to their change notifications.
    pub fn tracks_changes(self) -> bool {
        matches!(
            self,
            ElementKind::FeatureCollection | ElementKind::Options | ElementKind::Layer
        )
    }

    /// Post-processes the generic projection into the shape consumers expect.
    /// `None` means the element contributes nothing.
    pub(crate) fn finish(self, json: Map<String, Value>, attributes: &IndexMap<String, String>) -> Option<Value> {
        match self {
            ElementKind::Coordinate | ElementKind::Position => Some(geojson::lon_lat(json)),
            ElementKind::Options => Some(maplibre::options(json, attributes)),
            ElementKind::Bounds => maplibre::bounds(&json),
            _ => Some(Value::Object(json)),
        }
    }
}
