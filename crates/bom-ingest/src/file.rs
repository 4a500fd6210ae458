//! JSON snapshot files: a saved copy of the items endpoint response.

use std::path::{Path, PathBuf};

use tracing::debug;

use bom_model::Item;

use crate::error::{FetchError, Result};
use crate::source::ItemSource;

pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ItemSource for SnapshotFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_items(&self) -> Result<Vec<Item>> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| {
            FetchError::SnapshotRead {
                path: self.path.clone(),
                source,
            }
        })?;
        let items: Vec<Item> =
            serde_json::from_str(&text).map_err(|e| FetchError::SnapshotParse {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        debug!(path = %self.path.display(), items = items.len(), "read snapshot");
        Ok(items)
    }
}
