//! Outline documents with embedded places and routes.
//!
//! The outline is a tree of named elements (paragraphs, lists, routes,
//! places) and text. This crate reads the geocoded places and routes out of
//! it, converts them to GeoJSON, saves and opens documents, and keeps the
//! roster of collaborators.

pub mod extract;
pub mod file;
pub mod geojson;
pub mod presence;
pub mod tree;

pub use extract::{places, routes, Place, Route};
pub use file::{FileError, OutlineDocument, SavedFile};
pub use geojson::{places_to_geojson, routes_to_geojson, Feature, FeatureCollection, Geometry};
pub use presence::{random_color, random_user, random_username, Peer, PeerId, Presence, User};
pub use tree::{OutlineElement, OutlineNode, Position};
