//! Places and routes embedded in an outline.

use serde::{Deserialize, Serialize};

use crate::tree::{OutlineElement, Position};

/// Elements that claim the places below them: a place belongs to the
/// closest one of these.
const ROUTE_BOUNDARIES: [&str; 3] = ["route", "ordered_list", "bullet_list"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub position: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub places: Vec<Place>,
}

impl Place {
    /// Reads a `place` element. Places without a name or without numeric
    /// `lon`/`lat` attributes are skipped.
    pub fn from_element(el: &OutlineElement) -> Option<Self> {
        let name = el.attribute("name").filter(|name| !name.is_empty())?;
        let lon = coordinate(el.attribute("lon")?)?;
        let lat = coordinate(el.attribute("lat")?)?;
        Some(Place {
            name: name.to_string(),
            position: [lon, lat],
            navigate: el.attribute("navigate").map(str::to_string),
        })
    }
}

fn coordinate(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Places in the subtree around `position`, or in the whole outline.
pub fn places(root: &OutlineElement, position: Option<&Position>) -> Vec<Place> {
    let scope = position.and_then(|p| root.subtree(p)).unwrap_or(root);
    scope
        .query_all("place")
        .into_iter()
        .filter_map(Place::from_element)
        .collect()
}

/// Routes in the subtree around `position`, or in the whole outline.
///
/// Inside a subtree the subtree itself acts as the route. Routes without
/// any place are left out.
pub fn routes(root: &OutlineElement, position: Option<&Position>) -> Vec<Route> {
    let candidates = match position.and_then(|p| root.subtree(p)) {
        Some(subtree) => vec![subtree],
        None => root.query_all("route"),
    };
    candidates
        .into_iter()
        .filter_map(|route| {
            let mut places = Vec::new();
            collect_route_places(route, &mut places);
            (!places.is_empty()).then_some(Route { places })
        })
        .collect()
}

fn collect_route_places(el: &OutlineElement, out: &mut Vec<Place>) {
    for child in el.elements() {
        if child.name == "place" {
            out.extend(Place::from_element(child));
        }
        if !ROUTE_BOUNDARIES.contains(&child.name.as_str()) {
            collect_route_places(child, out);
        }
    }
}
