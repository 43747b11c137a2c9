//! placemark: a collaborative outline whose places and routes are drawn on
//! a live map.
//!
//! This crate ties the workspace together:
//!
//! - [`element`]: the declarative element model and its JSON projections;
//! - [`json_patch`]: the structural diff the element model reports with;
//! - [`map`]: the synchronizer that replays changes onto a map renderer;
//! - [`outline`]: the outline document, its places and routes;
//! - [`scene`]: the map scene built from an outline;
//! - [`config`], [`proxy`] and [`sprite`]: the serving side.

pub mod config;
pub mod proxy;
pub mod scene;
pub mod sprite;

pub use placemark_element as element;
pub use placemark_json_patch as json_patch;
pub use placemark_json_pointer as json_pointer;
pub use placemark_map as map;
pub use placemark_outline as outline;

pub use config::{Config, ConfigError};
pub use scene::Scene;
pub use sprite::{build_sprite, SpriteError};

use tracing_subscriber::EnvFilter;

/// Logs to stderr, filtered by `RUST_LOG` and defaulting to `warn`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}
