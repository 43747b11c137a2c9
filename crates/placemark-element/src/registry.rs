//! Tag registry: which tag names create which element kinds.
//!
//! A binding is installed once. Re-defining a tag with the same kind is a
//! no-op; re-defining it with a different kind is reported and refused.

use std::collections::BTreeMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use thiserror::Error;
use tracing::warn;

use crate::kinds::ElementKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("<{0}> is not a valid element name: it must contain a hyphen")]
    InvalidName(String),
    #[error("<{tag}> already registered!")]
    Conflict {
        tag: String,
        existing: ElementKind,
        requested: ElementKind,
    },
}

/// Outcome of a successful [`Registry::define`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Installed,
    AlreadyDefined,
}

#[derive(Debug, Default, Clone)]
pub struct Registry {
    tags: BTreeMap<String, ElementKind>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, tag: &str, kind: ElementKind) -> Result<Registration, RegistryError> {
        if !tag.contains('-') {
            return Err(RegistryError::InvalidName(tag.to_string()));
        }
        match self.tags.get(tag) {
            Some(existing) if *existing == kind => Ok(Registration::AlreadyDefined),
            Some(existing) => {
                warn!("<{tag}> already registered!");
                Err(RegistryError::Conflict {
                    tag: tag.to_string(),
                    existing: *existing,
                    requested: kind,
                })
            }
            None => {
                self.tags.insert(tag.to_string(), kind);
                Ok(Registration::Installed)
            }
        }
    }

    /// Defines every kind under its default tag, or under the tag given in
    /// `overrides`. Returns the conflicts; the other kinds are still defined.
    pub fn define_all(&mut self, overrides: &BTreeMap<ElementKind, String>) -> Vec<RegistryError> {
        ElementKind::ALL
            .iter()
            .filter_map(|kind| {
                let tag = overrides.get(kind).map(String::as_str).unwrap_or(kind.tag());
                self.define(tag, *kind).err()
            })
            .collect()
    }

    pub fn get(&self, tag: &str) -> Option<ElementKind> {
        self.tags.get(tag).copied()
    }

    /// A tag bound to `kind`, preferring the default one.
    pub fn tag_of(&self, kind: ElementKind) -> Option<&str> {
        if self.get(kind.tag()) == Some(kind) {
            return Some(kind.tag());
        }
        self.tags
            .iter()
            .find(|(_, k)| **k == kind)
            .map(|(tag, _)| tag.as_str())
    }
}

// ── Process-wide registry ─────────────────────────────────────────────────

static GLOBAL: OnceLock<RwLock<Registry>> = OnceLock::new();

pub fn global() -> &'static RwLock<Registry> {
    GLOBAL.get_or_init(|| RwLock::new(Registry::new()))
}

/// Defines `tag` in the process-wide registry.
pub fn define(tag: &str, kind: ElementKind) -> Result<Registration, RegistryError> {
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .define(tag, kind)
}

/// Registers every kind in the process-wide registry, honouring overrides.
pub fn register(overrides: &BTreeMap<ElementKind, String>) -> Vec<RegistryError> {
    global()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .define_all(overrides)
}

/// Registers every kind under its default tag. Safe to call repeatedly.
pub fn register_defaults() {
    register(&BTreeMap::new());
}

pub fn lookup(tag: &str) -> Option<ElementKind> {
    global().read().unwrap_or_else(PoisonError::into_inner).get(tag)
}

pub fn tag_of(kind: ElementKind) -> String {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .tag_of(kind)
        .unwrap_or(kind.tag())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_installs_then_is_idempotent() {
        let mut registry = Registry::new();
        assert_eq!(registry.define("x-layer", ElementKind::Layer), Ok(Registration::Installed));
        assert_eq!(registry.define("x-layer", ElementKind::Layer), Ok(Registration::AlreadyDefined));
        assert_eq!(registry.get("x-layer"), Some(ElementKind::Layer));
    }

    #[test]
    fn define_refuses_to_overwrite() {
        let mut registry = Registry::new();
        registry.define("x-thing", ElementKind::Layer).unwrap();
        assert_eq!(
            registry.define("x-thing", ElementKind::Source),
            Err(RegistryError::Conflict {
                tag: "x-thing".into(),
                existing: ElementKind::Layer,
                requested: ElementKind::Source,
            })
        );
        assert_eq!(registry.get("x-thing"), Some(ElementKind::Layer));
    }

    #[test]
    fn names_need_a_hyphen() {
        let mut registry = Registry::new();
        assert_eq!(
            registry.define("layer", ElementKind::Layer),
            Err(RegistryError::InvalidName("layer".into()))
        );
    }

    #[test]
    fn define_all_with_overrides() {
        let mut registry = Registry::new();
        let overrides = BTreeMap::from([(ElementKind::Layer, "my-layer".to_string())]);
        assert!(registry.define_all(&overrides).is_empty());
        assert_eq!(registry.get("my-layer"), Some(ElementKind::Layer));
        assert_eq!(registry.get("maplibre-layer"), None);
        assert_eq!(registry.tag_of(ElementKind::Layer), Some("my-layer"));
        assert_eq!(registry.get("geojson-feature"), Some(ElementKind::Feature));
        // a second pass is a no-op
        assert!(registry.define_all(&overrides).is_empty());
    }

    #[test]
    fn global_defaults_are_idempotent() {
        register_defaults();
        register_defaults();
        assert_eq!(lookup("maplibre-options"), Some(ElementKind::Options));
        assert_eq!(tag_of(ElementKind::Options), "maplibre-options");
    }
}
