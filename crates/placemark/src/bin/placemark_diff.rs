//! `placemark-diff` prints the patches that turn one JSON file into another.
//!
//! Usage:
//!   placemark-diff <prev.json> <next.json>

use placemark::json_patch::{diff, to_json};
use serde_json::Value;

fn read_json(path: &str) -> Result<Value, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
    serde_json::from_str(&text).map_err(|e| format!("{path}: {e}"))
}

fn main() {
    placemark::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: placemark-diff <prev.json> <next.json>");
        std::process::exit(1);
    }

    let (prev, next) = match (read_json(&args[1]), read_json(&args[2])) {
        (Ok(prev), Ok(next)) => (prev, next),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let patches = diff(Some(&prev), &next);
    match serde_json::to_string_pretty(&to_json(&patches)) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
