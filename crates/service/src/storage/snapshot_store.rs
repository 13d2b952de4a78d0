use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{debug, info};

use crate::errors::ServiceError;

/// Ordered record list guarded by a single lock.
///
/// Readers share the lock; every mutation runs under the write guard from
/// start to finish. With a file path configured the whole list is written as
/// JSON before the guard is released, so the file always reflects the latest
/// committed mutation.
pub struct SnapshotStore<T> {
    inner: RwLock<Vec<T>>,
    file_path: Option<PathBuf>,
}

impl<T> SnapshotStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Store without durability.
    pub fn in_memory(initial: Vec<T>) -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(initial), file_path: None })
    }

    /// Load from `path`, or create it from `initial` when missing.
    ///
    /// A file that exists but cannot be parsed is an error; it is never
    /// silently replaced.
    pub async fn open<P: Into<PathBuf>>(path: P, initial: Vec<T>) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        let records = match fs::read(&file_path).await {
            Ok(bytes) => {
                let records: Vec<T> = serde_json::from_slice(&bytes)
                    .map_err(|e| ServiceError::Storage(format!("{}: {e}", file_path.display())))?;
                info!(path = %file_path.display(), count = records.len(), "loaded snapshot");
                records
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                common::env::ensure_parent_dir(&file_path)
                    .await
                    .map_err(|e| ServiceError::Storage(e.to_string()))?;
                write_snapshot(&file_path, &initial).await?;
                info!(path = %file_path.display(), count = initial.len(), "created snapshot");
                initial
            }
            Err(e) => return Err(ServiceError::Storage(format!("{}: {e}", file_path.display()))),
        };
        Ok(Arc::new(Self { inner: RwLock::new(records), file_path: Some(file_path) }))
    }

    pub fn is_persistent(&self) -> bool {
        self.file_path.is_some()
    }

    /// Clone of every record, in order.
    pub async fn list(&self) -> Vec<T> {
        self.inner.read().await.clone()
    }

    /// Run `f` against the records under the read guard.
    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[T]) -> R,
    {
        let records = self.inner.read().await;
        f(&records)
    }

    /// Apply a mutation under the write guard and persist it.
    ///
    /// A persistent store runs `f` on a copy and only commits it once the
    /// snapshot is on disk, so a failure from `f` or from the write leaves
    /// both memory and file as they were.
    pub async fn update<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let mut records = self.inner.write().await;
        let Some(path) = &self.file_path else {
            return f(&mut records);
        };
        let mut staged = records.clone();
        let out = f(&mut staged)?;
        write_snapshot(path, &staged).await?;
        debug!(path = %path.display(), count = staged.len(), "snapshot written");
        *records = staged;
        Ok(out)
    }
}

/// Write to a sibling temp file then rename so a crash never leaves half a file.
async fn write_snapshot<T: Serialize>(path: &Path, records: &[T]) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(records).map_err(|e| ServiceError::Storage(e.to_string()))?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, data).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
    fs::rename(&tmp, path).await.map_err(|e| ServiceError::Storage(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("snapshot_store_{tag}_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn in_memory_update_and_read() -> Result<(), anyhow::Error> {
        let store = SnapshotStore::in_memory(vec![1u32, 2, 3]);
        assert!(!store.is_persistent());

        store.update(|v| { v.push(4); Ok(()) }).await?;
        assert_eq!(store.list().await, vec![1, 2, 3, 4]);
        assert_eq!(store.read(|v| v.iter().sum::<u32>()).await, 10);
        Ok(())
    }

    #[tokio::test]
    async fn failed_update_is_reported() {
        let store = SnapshotStore::in_memory(vec![1u32]);
        let res: Result<(), _> = store.update(|_| Err(ServiceError::NotFound("x".into()))).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn persists_and_reloads() -> Result<(), anyhow::Error> {
        let tmp = temp_path("reload");
        let store = SnapshotStore::<String>::open(&tmp, vec!["a".into()]).await?;
        assert!(store.is_persistent());
        store.update(|v| { v.push("b".into()); Ok(()) }).await?;

        // existing file wins over the initial records
        let reloaded = SnapshotStore::<String>::open(&tmp, vec!["ignored".into()]).await?;
        assert_eq!(reloaded.list().await, vec!["a".to_string(), "b".to_string()]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_write_does_not_commit() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("snapshot_store_gone_{}", uuid::Uuid::new_v4()));
        let store = SnapshotStore::<String>::open(dir.join("records.json"), vec!["a".into()]).await?;
        tokio::fs::remove_dir_all(&dir).await?;

        let res = store.update(|v| { v.push("b".into()); Ok(()) }).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))));
        assert_eq!(store.list().await, vec!["a".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() -> Result<(), anyhow::Error> {
        let tmp = temp_path("corrupt");
        tokio::fs::write(&tmp, b"{not json").await?;
        let res = SnapshotStore::<String>::open(&tmp, Vec::new()).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))));
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
