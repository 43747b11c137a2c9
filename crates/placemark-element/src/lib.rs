//! Declarative element model.
//!
//! An element tree whose nodes carry string attributes and whose registered
//! kinds project themselves to JSON according to a static [`Schema`].
//! Mutations are batched per element, flushed at the next
//! [`Document::run_microtasks`], diffed against the previous projection and
//! bubbled to the nearest model ancestor.
//!
//! # Example
//!
//! ```
//! use placemark_element::{Document, ElementKind, Patch};
//! use serde_json::json;
//!
//! let mut doc = Document::new();
//! let options = doc.create_element_of(ElementKind::Options);
//! doc.set_attribute(options, "zoom", "4").unwrap();
//! let root = doc.root();
//! doc.append_child(root, options).unwrap();
//! doc.run_microtasks();
//! doc.take_events();
//!
//! doc.set_attribute(options, "zoom", "5").unwrap();
//! doc.run_microtasks();
//! let events = doc.take_events();
//! assert_eq!(events[0].patches, Some(vec![Patch::replace("/zoom", json!(5))]));
//! ```

pub mod document;
pub mod kinds;
pub mod queue;
pub mod registry;
pub mod schema;

pub use document::{ChangeEvent, Document, DocumentError, NodeId, SLOT_ATTRIBUTE};
pub use kinds::maplibre::DEFAULT_STYLE_URL;
pub use kinds::ElementKind;
pub use placemark_json_patch::Patch;
pub use registry::{Registration, Registry, RegistryError};
pub use schema::{Coercer, Descriptor, Literal, Schema};
