//! Saving and opening outline documents.
//!
//! The file format is the document encoded as CBOR.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::extract::{self, Place, Route};
use crate::tree::{OutlineElement, Position};

pub const OUTLINE_ROOT: &str = "outline";

#[derive(Debug, Error)]
pub enum FileError {
    #[error("could not encode document: {0}")]
    Encode(String),
    #[error("could not decode document: {0}")]
    Decode(String),
}

/// A file ready to be offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineDocument {
    pub outline: OutlineElement,
}

impl Default for OutlineDocument {
    fn default() -> Self {
        Self::new(OutlineElement::new(OUTLINE_ROOT))
    }
}

impl OutlineDocument {
    pub fn new(outline: OutlineElement) -> Self {
        Self { outline }
    }

    pub fn places(&self, position: Option<&Position>) -> Vec<Place> {
        extract::places(&self.outline, position)
    }

    pub fn routes(&self, position: Option<&Position>) -> Vec<Route> {
        extract::routes(&self.outline, position)
    }

    pub fn serialize(&self, filename: &str) -> Result<SavedFile, FileError> {
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(self, &mut bytes).map_err(|e| FileError::Encode(e.to_string()))?;
        debug!(name = filename, len = bytes.len(), "outline serialized");
        Ok(SavedFile {
            name: filename.to_string(),
            bytes,
        })
    }

    pub fn parse(data: &[u8]) -> Result<Self, FileError> {
        ciborium::de::from_reader(data).map_err(|e| FileError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_does_not_parse() {
        assert!(matches!(
            OutlineDocument::parse(&[0xff, 0x00, 0x13]),
            Err(FileError::Decode(_))
        ));
    }

    #[test]
    fn saved_file_keeps_the_name() {
        let file = OutlineDocument::default().serialize("trip.placemark").unwrap();
        assert_eq!(file.name, "trip.placemark");
        assert!(!file.bytes.is_empty());
    }
}
