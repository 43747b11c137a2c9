use thiserror::Error;

use placemark_element::DocumentError;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("No Map instance found")]
    NoRenderer,
    #[error("no <maplibre-options> element in the options slot")]
    MissingOptions,
    #[error("invalid map options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
    #[error(transparent)]
    Document(#[from] DocumentError),
}
