use super::IKVRepo;
use anyhow::Context;
use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Key value store kept as a single JSON object on disk.
/// The whole file is read and rewritten on every operation.
pub struct FileKVRepo {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process
    lock: Mutex<()>,
}

impl FileKVRepo {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        PathBuf::from(temp)
    }

    async fn read_content(&self) -> anyhow::Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Unable to read {:?}", self.path)),
        }
    }

    fn parse_values(&self, content: &str) -> anyhow::Result<HashMap<String, String>> {
        serde_json::from_str(content)
            .with_context(|| format!("Malformed key value store at {:?}", self.path))
    }

    async fn read_values(&self) -> anyhow::Result<HashMap<String, String>> {
        match self.read_content().await? {
            Some(content) => self.parse_values(&content),
            None => Ok(HashMap::new()),
        }
    }

    /// Like `read_values`, but a malformed store is discarded so that
    /// writes can replace it
    async fn read_values_for_update(&self) -> anyhow::Result<HashMap<String, String>> {
        let content = match self.read_content().await? {
            Some(content) => content,
            None => return Ok(HashMap::new()),
        };
        match self.parse_values(&content) {
            Ok(values) => Ok(values),
            Err(e) => {
                warn!("Discarding key value store. Err: {:?}", e);
                Ok(HashMap::new())
            }
        }
    }

    /// Writes to a sibling file first and renames it over the store,
    /// so the store is never left half written
    async fn write_values(&self, values: &HashMap<String, String>) -> anyhow::Result<()> {
        let content = serde_json::to_string(values)?;
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, content)
            .await
            .with_context(|| format!("Unable to write {:?}", temp_path))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .with_context(|| format!("Unable to replace {:?}", self.path))?;
        debug!("Wrote {} keys to {:?}", values.len(), self.path);
        Ok(())
    }
}

#[async_trait::async_trait]
impl IKVRepo for FileKVRepo {
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut values = self.read_values_for_update().await?;
        values.insert(key.to_string(), value.to_string());
        self.write_values(&values).await
    }

    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let _guard = self.lock.lock().await;
        let mut values = self.read_values().await?;
        Ok(values.remove(key))
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut values = self.read_values_for_update().await?;
        if values.remove(key).is_some() {
            self.write_values(&values).await?;
        }
        Ok(())
    }
}
