//! Icon sprite: every SVG of a directory as a `<symbol>` of one document.
//!
//! Icons are referenced as `icons.svg#<file stem>`.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("Failed to read icons at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0} has no <svg> root element")]
    NotSvg(PathBuf),
}

fn read_error(path: &Path) -> impl FnOnce(std::io::Error) -> SpriteError {
    let path = path.to_path_buf();
    move |source| SpriteError::Read { path, source }
}

fn svg_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<svg\b([^>]*)>(.*)</svg>").unwrap())
}

fn view_box_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\bviewBox\s*=\s*"([^"]*)""#).unwrap())
}

/// Turns one SVG document into a `<symbol>` with the given id.
pub fn symbol(id: &str, svg: &str) -> Option<String> {
    let captures = svg_regex().captures(svg)?;
    let attributes = captures.get(1).map_or("", |m| m.as_str());
    let body = captures.get(2).map_or("", |m| m.as_str()).trim();
    let view_box = view_box_regex()
        .captures(attributes)
        .and_then(|c| c.get(1))
        .map(|m| format!(r#" viewBox="{}""#, m.as_str()))
        .unwrap_or_default();
    Some(format!(r#"<symbol id="{id}"{view_box}>{body}</symbol>"#))
}

/// Builds the sprite document from every `*.svg` file in `dir`, in file
/// name order.
pub fn build_sprite(dir: &Path) -> Result<String, SpriteError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(read_error(dir))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "svg"))
        .collect();
    files.sort();

    let mut sprite = format!(r#"<svg xmlns="{SVG_NS}">"#);
    for path in &files {
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let svg = std::fs::read_to_string(path).map_err(read_error(path))?;
        let symbol = symbol(id, &svg).ok_or_else(|| SpriteError::NotSvg(path.clone()))?;
        sprite.push_str(&symbol);
    }
    sprite.push_str("</svg>");
    debug!(icons = files.len(), dir = %dir.display(), "sprite built");
    Ok(sprite)
}
