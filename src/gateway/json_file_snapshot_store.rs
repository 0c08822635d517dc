use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use crate::domain::gateway::{SnapshotStore, SnapshotStoreError};

/// Keeps each snapshot in `<directory>/<key>.json`. Writes go to a temporary
/// file first and are renamed into place, so a crash never leaves a half
/// written snapshot behind.
#[derive(Clone, Debug)]
pub struct JsonFileSnapshotStore {
    directory: PathBuf,
}

impl JsonFileSnapshotStore {
    pub async fn open(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        tokio::fs::create_dir_all(&directory).await?;
        tracing::info!(directory = %directory.display(), "Snapshot directory ready");
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SnapshotStoreError> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(anyhow!("Snapshot key `{key}` is not a valid file name").into());
        }
        Ok(self.directory.join(format!("{key}.json")))
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    async fn load(&self, key: &str) -> Result<Option<String>, SnapshotStoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SnapshotStoreError::Io(key.into(), err)),
        }
    }

    async fn save(&self, key: &str, contents: &str) -> Result<(), SnapshotStoreError> {
        let path = self.path_for(key)?;
        let temporary = path.with_extension("json.tmp");
        tokio::fs::write(&temporary, contents)
            .await
            .map_err(|err| SnapshotStoreError::Io(key.into(), err))?;
        tokio::fs::rename(&temporary, &path)
            .await
            .map_err(|err| SnapshotStoreError::Io(key.into(), err))?;
        Ok(())
    }
}
