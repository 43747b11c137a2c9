//! The declarative map scene for an outline: its places as points, its
//! routes as lines, and a camera framing all places.
//!
//! ```text
//! <map-libre>
//!   <maplibre-options slot="options" style-url=...>
//!     <maplibre-bounds slot="bounds"> <maplibre-position lon lat/>* </maplibre-bounds>
//!   </maplibre-options>
//!   <maplibre-source slot="sources" id="places" type="geojson">
//!     <geojson-featurecollection> point features </geojson-featurecollection>
//!   </maplibre-source>
//!   <maplibre-source slot="sources" id="routes" type="geojson"> ... </maplibre-source>
//!   <maplibre-layer slot="layers" .../>*
//! </map-libre>
//! ```

use placemark_element::{Document, DocumentError, ElementKind, NodeId};
use placemark_map::{MapLibre, Renderer};
use placemark_outline::{Place, Route};

use crate::config::MapConfig;

pub const PLACES_SOURCE: &str = "places";
pub const ROUTES_SOURCE: &str = "routes";

type Attrs<'a> = &'a [(&'a str, &'a str)];

#[derive(Debug, Clone)]
pub struct Scene {
    pub options: NodeId,
    pub bounds: NodeId,
    pub places: NodeId,
    pub routes: NodeId,
    pub layers: Vec<NodeId>,
}

fn element(doc: &mut Document, parent: NodeId, kind: ElementKind, attrs: Attrs) -> Result<NodeId, DocumentError> {
    let node = doc.create_element_of(kind);
    for (name, value) in attrs {
        doc.set_attribute(node, name, *value)?;
    }
    doc.append_child(parent, node)?;
    Ok(node)
}

fn position(doc: &mut Document, parent: NodeId, kind: ElementKind, [lon, lat]: [f64; 2]) -> Result<NodeId, DocumentError> {
    let (lon, lat) = (lon.to_string(), lat.to_string());
    element(doc, parent, kind, &[("lon", lon.as_str()), ("lat", lat.as_str())])
}

fn clear(doc: &mut Document, parent: NodeId) -> Result<(), DocumentError> {
    for child in doc.children(parent).to_vec() {
        doc.remove(child)?;
    }
    Ok(())
}

impl Scene {
    pub fn build<R: Renderer>(
        map: &mut MapLibre<R>,
        config: &MapConfig,
        places: &[Place],
        routes: &[Route],
    ) -> Result<Self, DocumentError> {
        let host = map.host();
        let doc = map.document_mut();

        let options = element(
            doc,
            host,
            ElementKind::Options,
            &[("slot", "options"), ("style-url", config.style_url.as_str())],
        )?;
        let bounds = element(doc, options, ElementKind::Bounds, &[("slot", "bounds")])?;

        let places_source = element(
            doc,
            host,
            ElementKind::Source,
            &[("slot", "sources"), ("id", PLACES_SOURCE), ("type", "geojson")],
        )?;
        let places_collection = element(doc, places_source, ElementKind::FeatureCollection, &[])?;

        let routes_source = element(
            doc,
            host,
            ElementKind::Source,
            &[("slot", "sources"), ("id", ROUTES_SOURCE), ("type", "geojson")],
        )?;
        let routes_collection = element(doc, routes_source, ElementKind::FeatureCollection, &[])?;

        let layers = default_layers(doc, host)?;

        let scene = Scene {
            options,
            bounds,
            places: places_collection,
            routes: routes_collection,
            layers,
        };
        scene.set_places(doc, places)?;
        scene.set_routes(doc, routes)?;
        Ok(scene)
    }

    /// Replaces the point features and reframes the camera around them.
    pub fn set_places(&self, doc: &mut Document, places: &[Place]) -> Result<(), DocumentError> {
        clear(doc, self.places)?;
        clear(doc, self.bounds)?;
        for place in places {
            let feature = element(doc, self.places, ElementKind::Feature, &[])?;
            let point = element(doc, feature, ElementKind::Point, &[("slot", "geometry")])?;
            position(doc, point, ElementKind::Coordinate, place.position)?;
            element(
                doc,
                feature,
                ElementKind::Properties,
                &[("slot", "properties"), ("name", place.name.as_str())],
            )?;
            position(doc, self.bounds, ElementKind::Position, place.position)?;
        }
        Ok(())
    }

    pub fn set_routes(&self, doc: &mut Document, routes: &[Route]) -> Result<(), DocumentError> {
        clear(doc, self.routes)?;
        for route in routes {
            let feature = element(doc, self.routes, ElementKind::Feature, &[])?;
            let line = element(doc, feature, ElementKind::LineString, &[("slot", "geometry")])?;
            for place in &route.places {
                position(doc, line, ElementKind::Coordinate, place.position)?;
            }
        }
        Ok(())
    }
}

fn default_layers(doc: &mut Document, host: NodeId) -> Result<Vec<NodeId>, DocumentError> {
    let routes = element(
        doc,
        host,
        ElementKind::Layer,
        &[("slot", "layers"), ("id", "routes"), ("type", "line"), ("source", ROUTES_SOURCE)],
    )?;
    element(
        doc,
        routes,
        ElementKind::LayerLayout,
        &[("slot", "layout"), ("line-cap", "round"), ("line-join", "round")],
    )?;
    element(
        doc,
        routes,
        ElementKind::LayerPaint,
        &[("slot", "paint"), ("line-color", "#478EFF"), ("line-width", "3")],
    )?;

    let points = element(
        doc,
        host,
        ElementKind::Layer,
        &[("slot", "layers"), ("id", "places"), ("type", "circle"), ("source", PLACES_SOURCE)],
    )?;
    element(
        doc,
        points,
        ElementKind::LayerPaint,
        &[
            ("slot", "paint"),
            ("circle-radius", "6"),
            ("circle-color", "#FF5C5C"),
            ("circle-stroke-width", "2"),
            ("circle-stroke-color", "#FFFFFF"),
        ],
    )?;

    let labels = element(
        doc,
        host,
        ElementKind::Layer,
        &[("slot", "layers"), ("id", "place-labels"), ("type", "symbol"), ("source", PLACES_SOURCE)],
    )?;
    element(
        doc,
        labels,
        ElementKind::LayerLayout,
        &[
            ("slot", "layout"),
            ("text-field", r#"["get", "name"]"#),
            ("text-offset", "[0, 1.2]"),
            ("text-anchor", "top"),
            ("text-size", "12"),
        ],
    )?;

    Ok(vec![routes, points, labels])
}
