//! Map synchronizer.
//!
//! [`MapLibre`] hosts a declarative element tree and keeps a [`Renderer`]
//! in line with it: it builds the renderer from the options element, waits
//! for the style to load, then maps each change notification to the
//! renderer calls it implies.

pub mod error;
pub mod options;
pub mod recording;
pub mod renderer;
pub mod sync;

pub use error::SyncError;
pub use options::MapOptions;
pub use recording::{RecordingRenderer, RendererCall};
pub use renderer::{Renderer, SourceKind};
pub use sync::{MapLibre, MapState, HOST_TAG};
