//! Dev-time `.env` bootstrap.
//!
//! Production injects env vars directly, so a missing file is not an error.
//! A file that exists but cannot be read or parsed is.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

/// Load `.env` from the working directory (or a parent). Returns the path loaded.
pub fn load() -> Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(anyhow!("ENV_FILE_INVALID: failed to load .env: {e}")),
    }
}

/// Load a specific env file. Missing file is `Ok(false)`.
pub fn load_from(path: &Path) -> Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(anyhow!(
            "ENV_FILE_INVALID: failed to load {}: {e}",
            path.display()
        )),
    }
}
