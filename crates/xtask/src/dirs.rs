//! Content directory resolution

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

/// Environment variable overriding the content directory.
pub const DATA_DIR_ENV: &str = "ITEM_DATA_DIR";

/// Resolve the content directory.
///
/// Order of precedence:
/// 1. `--data-dir` argument
/// 2. `ITEM_DATA_DIR` environment variable (also read from `.env`)
/// 3. The bundled `crates/items/content/data` directory
pub fn data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let dir = explicit
        .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(bundled_data_dir);

    if !dir.is_dir() {
        bail!(
            "Content directory does not exist: {}\n\
             Pass --data-dir or set {}.",
            dir.display(),
            DATA_DIR_ENV
        );
    }
    Ok(dir)
}

fn bundled_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("items")
        .join("content")
        .join("data")
}
