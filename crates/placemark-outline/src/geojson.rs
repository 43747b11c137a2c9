//! GeoJSON views of places and routes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::extract::{Place, Route};

pub type Coordinate = [f64; 2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Coordinate },
    LineString { coordinates: Vec<Coordinate> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Geometry,
    pub properties: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl From<&Place> for Feature {
    fn from(place: &Place) -> Self {
        let mut properties = Map::new();
        properties.insert("name".into(), Value::from(place.name.as_str()));
        Feature {
            geometry: Geometry::Point {
                coordinates: place.position,
            },
            properties: Some(properties),
        }
    }
}

impl From<&Route> for Feature {
    fn from(route: &Route) -> Self {
        Feature {
            geometry: Geometry::LineString {
                coordinates: route.places.iter().map(|p| p.position).collect(),
            },
            properties: None,
        }
    }
}

pub fn places_to_geojson(places: &[Place]) -> FeatureCollection {
    FeatureCollection {
        features: places.iter().map(Feature::from).collect(),
    }
}

pub fn routes_to_geojson(routes: &[Route]) -> FeatureCollection {
    FeatureCollection {
        features: routes.iter().map(Feature::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn place(name: &str, lon: f64, lat: f64) -> Place {
        Place {
            name: name.into(),
            position: [lon, lat],
            navigate: None,
        }
    }

    #[test]
    fn places_become_points() {
        let collection = places_to_geojson(&[place("Home", 1.5, 2.5)]);
        assert_eq!(
            serde_json::to_value(&collection).unwrap(),
            json!({
                "type": "FeatureCollection",
                "features": [{
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [1.5, 2.5]},
                    "properties": {"name": "Home"}
                }]
            })
        );
    }

    #[test]
    fn routes_become_line_strings() {
        let route = Route {
            places: vec![place("a", 0.5, 0.5), place("b", 1.5, 1.5)],
        };
        let value = serde_json::to_value(routes_to_geojson(&[route])).unwrap();
        assert_eq!(
            value["features"][0]["geometry"],
            json!({"type": "LineString", "coordinates": [[0.5, 0.5], [1.5, 1.5]]})
        );
        assert_eq!(value["features"][0]["properties"], Value::Null);
    }

    #[test]
    fn reads_back_what_it_writes() {
        let collection = places_to_geojson(&[place("x", 3.0, 4.0)]);
        let json = serde_json::to_string(&collection).unwrap();
        let back: FeatureCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, collection);
    }
}
