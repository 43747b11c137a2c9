use std::fs;

use placemark::{build_sprite, SpriteError};
use tempfile::TempDir;

#[test]
fn test_sprite_wraps_icons_in_name_order() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("star.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><path d="M5 0"/></svg>"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("pin.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><circle r="4"/></svg>"#,
    )
    .unwrap();
    fs::write(dir.path().join("README.md"), "not an icon").unwrap();

    let sprite = build_sprite(dir.path()).unwrap();
    assert_eq!(
        sprite,
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg">"#,
            r#"<symbol id="pin" viewBox="0 0 24 24"><circle r="4"/></symbol>"#,
            r#"<symbol id="star" viewBox="0 0 10 10"><path d="M5 0"/></symbol>"#,
            "</svg>"
        )
    );
}

#[test]
fn test_missing_directory_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = build_sprite(&dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, SpriteError::Read { .. }));
}

#[test]
fn test_non_svg_content_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.svg"), "<png/>").unwrap();
    assert!(matches!(build_sprite(dir.path()), Err(SpriteError::NotSvg(_))));
}
