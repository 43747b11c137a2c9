//! `placemark-sprite` prints the icon sprite for a directory of SVGs.
//!
//! Usage:
//!   placemark-sprite [--config <path>] [dir]
//!
//! Without `dir`, the `[icons] dir` setting of the config file is used.

use std::path::PathBuf;

use placemark::{build_sprite, Config};

fn main() {
    placemark::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path = PathBuf::from("placemark.toml");
    let mut dir: Option<PathBuf> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                if let Some(path) = args.get(i) {
                    config_path = PathBuf::from(path);
                }
            }
            other => dir = Some(PathBuf::from(other)),
        }
        i += 1;
    }

    let config = match Config::load_from_path(&config_path) {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let dir = dir.unwrap_or(config.icons.dir);

    match build_sprite(&dir) {
        Ok(svg) => println!("{svg}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
