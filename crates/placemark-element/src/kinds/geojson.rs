//! GeoJSON element kinds: the subset needed for point and line features.

use serde_json::{Map, Value};

use crate::schema::{literal, required, Coercer, Descriptor, Schema};

pub static FEATURE_COLLECTION: Schema = Schema::new(&[
    ("type", literal("FeatureCollection")),
    ("features", Descriptor::Array),
]);

pub static FEATURE: Schema = Schema::new(&[
    ("type", literal("Feature")),
    ("geometry", Descriptor::Object),
    ("properties", Descriptor::Object),
]);

pub static POINT: Schema = Schema::new(&[
    ("type", literal("Point")),
    ("coordinates", Descriptor::Object),
]);

pub static LINE_STRING: Schema = Schema::new(&[
    ("type", literal("LineString")),
    ("coordinates", Descriptor::Array),
]);

pub static COORDINATE: Schema = Schema::new(&[
    ("lon", required(Coercer::Number)),
    ("lat", required(Coercer::Number)),
]);

pub static PROPERTIES: Schema = Schema::new(&[("name", required(Coercer::String))]);

/// Collapses `{lon, lat}` into a `[lon, lat]` position.
pub(crate) fn lon_lat(mut json: Map<String, Value>) -> Value {
    let lon = json.shift_remove("lon").unwrap_or(Value::Null);
    let lat = json.shift_remove("lat").unwrap_or(Value::Null);
    Value::Array(vec![lon, lat])
}
