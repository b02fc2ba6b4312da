use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use super::{paths::ensure_dir, StorageBackend};
use crate::errors::Result;

const COLLECTION_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// File-backed blob store: one `<collection>.json` per named collection,
/// written atomically by staging to a temporary file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(super::paths::app_data_dir);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", collection, COLLECTION_EXTENSION))
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self, collection: &str) -> Result<Option<String>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn save(&self, collection: &str, payload: &str) -> Result<()> {
        let path = self.collection_path(collection);
        let tmp = tmp_path(&path);
        write_file(&tmp, payload)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(collection, bytes = payload.len(), "collection saved");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
