use crate::error::{MtgError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File name constants
// ---------------------------------------------------------------------------

pub const BLOB_FILE: &str = ".mtgrc.json";
pub const CONFIG_FILE: &str = ".mtgrc.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn blob_path(home: &Path) -> PathBuf {
    home.join(BLOB_FILE)
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join(CONFIG_FILE)
}

pub fn home_dir() -> Result<PathBuf> {
    home::home_dir().ok_or(MtgError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
