use std::{
    io::ErrorKind,
    path::{
        Path,
        PathBuf,
    },
};

use axum::async_trait;
use serde_json::Value;
use tokio::fs;

use super::BlobStore;
use crate::error::StoreError;

/// Keeps each blob as `<root>/<store name>/<key>.json`.
///
/// A write lands in a temporary sibling first and is renamed over the old document, so readers
/// see either the previous document or the new one in full.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(root: impl AsRef<Path>, store_name: &str) -> Self {
        Self {
            dir: root.as_ref().join(store_name),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn blob_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(|c: char| c == '/' || c == '\\');
        if !valid {
            return Err(io_err(
                key,
                std::io::Error::new(ErrorKind::InvalidInput, "blob keys must be plain names"),
            ));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_err(key: &str, source: std::io::Error) -> StoreError {
    StoreError::Io {
        key: key.to_string(),
        source,
    }
}

#[async_trait]
impl BlobStore for FileStore {
    async fn get_json(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.blob_path(key)?;
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err(key, e)),
        };
        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                key: key.to_string(),
                source,
            })
    }

    async fn set_json(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let path = self.blob_path(key)?;
        let raw = serde_json::to_vec(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_err(key, e))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, raw).await.map_err(|e| io_err(key, e))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| io_err(key, e))?;
        tracing::debug!("Wrote blob {}", path.display());
        Ok(())
    }
}
