use std::{env, fs, path::{Path, PathBuf}};

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".fintrack_core";

/// Returns the application data directory, defaulting to `~/.fintrack_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("FINTRACK_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
