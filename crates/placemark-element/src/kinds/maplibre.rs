//! Map element kinds, mirroring the renderer's style specification.
//!
//! Paint and layout tables cover fill, line, symbol, circle, heatmap,
//! hillshade, raster, fill-extrusion and background layers. Array and
//! offset typed properties are `Unsupported` until they get a coercer.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::schema::{number_value, optional, required, Coercer, Descriptor, Literal, Schema};

pub const DEFAULT_STYLE_URL: &str = "https://demotiles.maplibre.org/style.json";

const MAP_OR_VIEWPORT: &[Literal] = &[Literal::Str("map"), Literal::Str("viewport")];

const NUM: Descriptor = optional(Coercer::Number);
const STR: Descriptor = optional(Coercer::String);
const BOOL: Descriptor = optional(Coercer::Boolean);
const JSON: Descriptor = optional(Coercer::Json);
const UNSUPPORTED: Descriptor = optional(Coercer::Unsupported);
const ANCHOR: Descriptor = optional(Coercer::Enum(MAP_OR_VIEWPORT));

pub static OPTIONS: Schema = Schema::new(&[
    ("style-url", STR),
    ("attribution-control", BOOL),
    ("center", Descriptor::Object),
    ("bounds", Descriptor::Object),
    ("zoom", NUM),
]);

pub static LAYER: Schema = Schema::new(&[
    ("id", required(Coercer::String)),
    ("type", required(Coercer::String)),
    ("source", STR),
    ("source-layer", STR),
    ("minzoom", NUM),
    ("maxzoom", NUM),
    ("paint", Descriptor::Object),
    ("layout", Descriptor::Object),
]);

pub static LAYER_LAYOUT: Schema = Schema::new(&[
    ("visibility", STR),
    // fill
    ("fill-sort-key", NUM),
    // line
    ("line-cap", STR),
    ("line-join", STR),
    ("line-miter-limit", NUM),
    ("line-round-limit", NUM),
    ("line-sort-key", NUM),
    // symbol
    ("symbol-placement", STR),
    ("symbol-spacing", NUM),
    ("symbol-avoid-edges", BOOL),
    ("symbol-sort-key", NUM),
    ("symbol-z-order", STR),
    ("icon-allow-overlap", BOOL),
    ("icon-overlap", STR),
    ("icon-ignore-placement", BOOL),
    ("icon-optional", BOOL),
    ("icon-rotation-alignment", STR),
    ("icon-size", NUM),
    ("icon-text-fit", STR),
    ("icon-text-fit-padding", UNSUPPORTED),
    ("icon-image", STR),
    ("icon-rotate", NUM),
    ("icon-padding", UNSUPPORTED),
    ("icon-keep-upright", BOOL),
    ("icon-offset", UNSUPPORTED),
    ("icon-anchor", STR),
    ("icon-pitch-alignment", STR),
    ("text-pitch-alignment", STR),
    ("text-rotation-alignment", STR),
    ("text-field", JSON),
    ("text-font", JSON),
    ("text-size", NUM),
    ("text-max-width", NUM),
    ("text-line-height", NUM),
    ("text-letter-spacing", NUM),
    ("text-justify", STR),
    ("text-radial-offset", NUM),
    ("text-variable-anchor", UNSUPPORTED),
    ("text-variable-anchor-offset", UNSUPPORTED),
    ("text-anchor", STR),
    ("text-max-angle", NUM),
    ("text-writing-mode", UNSUPPORTED),
    ("text-rotate", NUM),
    ("text-padding", NUM),
    ("text-keep-upright", BOOL),
    ("text-transform", STR),
    ("text-offset", JSON),
    ("text-allow-overlap", BOOL),
    ("text-overlap", STR),
    ("text-ignore-placement", BOOL),
    ("text-optional", BOOL),
    // circle
    ("circle-sort-key", NUM),
]);

pub static LAYER_PAINT: Schema = Schema::new(&[
    // background
    ("background-color", STR),
    ("background-opacity", NUM),
    ("background-pattern", STR),
    // fill
    ("fill-antialias", BOOL),
    ("fill-color", STR),
    ("fill-opacity", NUM),
    ("fill-outline-color", STR),
    ("fill-pattern", STR),
    ("fill-translate", UNSUPPORTED),
    ("fill-translate-anchor", STR),
    // line
    ("line-blur", NUM),
    ("line-color", STR),
    ("line-dasharray", UNSUPPORTED),
    ("line-gap-width", NUM),
    ("line-gradient", STR),
    ("line-offset", NUM),
    ("line-opacity", NUM),
    ("line-pattern", STR),
    ("line-translate", UNSUPPORTED),
    ("line-translate-anchor", STR),
    ("line-width", NUM),
    // symbol
    ("icon-opacity", NUM),
    ("icon-color", STR),
    ("icon-halo-color", STR),
    ("icon-halo-width", NUM),
    ("icon-halo-blur", NUM),
    ("icon-translate", UNSUPPORTED),
    ("icon-translate-anchor", STR),
    ("text-opacity", NUM),
    ("text-color", STR),
    ("text-halo-color", STR),
    ("text-halo-width", NUM),
    ("text-halo-blur", NUM),
    ("text-translate", UNSUPPORTED),
    ("text-translate-anchor", STR),
    // circle
    ("circle-radius", NUM),
    ("circle-color", STR),
    ("circle-blur", NUM),
    ("circle-opacity", NUM),
    ("circle-translate", UNSUPPORTED),
    ("circle-translate-anchor", STR),
    ("circle-pitch-scale", ANCHOR),
    ("circle-pitch-alignment", ANCHOR),
    ("circle-stroke-width", NUM),
    ("circle-stroke-color", STR),
    ("circle-stroke-opacity", NUM),
    // heatmap
    ("heatmap-radius", NUM),
    ("heatmap-weight", NUM),
    ("heatmap-intensity", NUM),
    ("heatmap-color", UNSUPPORTED),
    ("heatmap-opacity", NUM),
    // fill extrusion
    ("fill-extrusion-opacity", NUM),
    ("fill-extrusion-color", STR),
    ("fill-extrusion-translate", UNSUPPORTED),
    ("fill-extrusion-translate-anchor", STR),
    ("fill-extrusion-pattern", STR),
    ("fill-extrusion-height", NUM),
    ("fill-extrusion-base", NUM),
    ("fill-extrusion-vertical-gradient", BOOL),
    // raster
    ("raster-opacity", NUM),
    ("raster-hue-rotate", NUM),
    ("raster-brightness-min", NUM),
    ("raster-brightness-max", NUM),
    ("raster-saturation", NUM),
    ("raster-contrast", NUM),
    ("raster-resampling", STR),
    ("raster-fade-duration", NUM),
    // hillshade
    ("hillshade-illumination-direction", NUM),
    ("hillshade-illumination-anchor", STR),
    ("hillshade-exaggeration", NUM),
    ("hillshade-shadow-color", STR),
    ("hillshade-highlight-color", STR),
    ("hillshade-accent-color", STR),
]);

pub static POSITION: Schema = Schema::new(&[
    ("lon", required(Coercer::Number)),
    ("lat", required(Coercer::Number)),
]);

pub static BOUNDS: Schema = Schema::new(&[("positions", Descriptor::Array)]);

pub static SOURCE: Schema = Schema::new(&[
    ("id", required(Coercer::String)),
    ("type", required(Coercer::String)),
    ("data", Descriptor::Object),
]);

pub static IMAGE: Schema = Schema::new(&[
    ("id", required(Coercer::String)),
    ("src", STR),
    ("width", NUM),
    ("height", NUM),
    ("pixel-ratio", NUM),
    ("sdf", BOOL),
]);

/// Renames options into the renderer's vocabulary and fills in the style.
///
/// A `center="lon,lat"` attribute stands in for a missing position child.
pub(crate) fn options(mut json: Map<String, Value>, attributes: &IndexMap<String, String>) -> Value {
    let attribution = json.shift_remove("attribution-control");
    let style = json
        .shift_remove("style-url")
        .unwrap_or_else(|| Value::from(DEFAULT_STYLE_URL));
    let center = json.shift_remove("center").or_else(|| {
        let text = attributes.get("center")?;
        Coercer::Coordinates.coerce("center", Some(text))
    });

    let mut out = Map::new();
    if let Some(attribution) = attribution {
        out.insert("attributionControl".into(), attribution);
    }
    out.insert("style".into(), style);
    if let Some(center) = center {
        out.insert("center".into(), center);
    }
    out.extend(json);
    Value::Object(out)
}

/// Smallest `[[west, south], [east, north]]` box enclosing every position.
pub(crate) fn bounds(json: &Map<String, Value>) -> Option<Value> {
    let positions = json.get("positions")?.as_array()?;
    let mut extent: Option<[f64; 4]> = None;
    for position in positions {
        let (Some(lon), Some(lat)) = (
            position.get(0).and_then(Value::as_f64),
            position.get(1).and_then(Value::as_f64),
        ) else {
            continue;
        };
        extent = Some(match extent {
            None => [lon, lat, lon, lat],
            Some([w, s, e, n]) => [w.min(lon), s.min(lat), e.max(lon), n.max(lat)],
        });
    }
    let [w, s, e, n] = extent?;
    Some(Value::Array(vec![
        Value::Array(vec![number_value(w), number_value(s)]),
        Value::Array(vec![number_value(e), number_value(n)]),
    ]))
}
