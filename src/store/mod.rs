//! JSON-backed record collections.
//!
//! Each collection is one JSON array held by a [`Persistence`] backend. Every
//! load/save cycle runs under the collection's writer lock.

mod repository;
mod uploads;

pub use repository::*;
pub use uploads::*;

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use crate::errors::AppError;

/// Raw byte storage for a single collection.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Current contents, `None` if nothing has been written yet.
    async fn read(&self) -> Result<Option<Vec<u8>>, AppError>;

    /// Replace the contents entirely.
    async fn write(&self, contents: &[u8]) -> Result<(), AppError>;
}

/// Collection stored in a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Persistence for FileBackend {
    async fn read(&self) -> Result<Option<Vec<u8>>, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, contents: &[u8]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write beside the target and rename so a crash never leaves a torn file
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Collection held in memory, used by tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryBackend {
    contents: std::sync::Mutex<Option<Vec<u8>>>,
}

#[cfg(test)]
impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-filled with raw bytes.
    pub fn with_contents(contents: &[u8]) -> Self {
        Self {
            contents: std::sync::Mutex::new(Some(contents.to_vec())),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl Persistence for MemoryBackend {
    async fn read(&self) -> Result<Option<Vec<u8>>, AppError> {
        let guard = self
            .contents
            .lock()
            .map_err(|_| AppError::Internal("Memory backend poisoned".to_string()))?;
        Ok(guard.clone())
    }

    async fn write(&self, contents: &[u8]) -> Result<(), AppError> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|_| AppError::Internal("Memory backend poisoned".to_string()))?;
        *guard = Some(contents.to_vec());
        Ok(())
    }
}

/// An ordered collection of records persisted as one JSON array.
pub struct RecordStore<T> {
    name: &'static str,
    backend: Box<dyn Persistence>,
    writer: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> RecordStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(name: &'static str, backend: Box<dyn Persistence>) -> Self {
        Self {
            name,
            backend,
            writer: Mutex::new(()),
            _records: PhantomData,
        }
    }

    /// Load the full collection, persisting an empty one if none exists.
    pub async fn load(&self) -> Result<Vec<T>, AppError> {
        let _guard = self.writer.lock().await;
        self.load_locked().await
    }

    /// Overwrite the full collection.
    #[cfg(test)]
    pub async fn save(&self, records: &[T]) -> Result<(), AppError> {
        let _guard = self.writer.lock().await;
        self.save_locked(records).await
    }

    /// Read-modify-write under the writer lock.
    ///
    /// The collection is saved only when `apply` succeeds; an error leaves the
    /// stored records untouched.
    pub async fn update<R, F>(&self, apply: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, AppError>,
    {
        let _guard = self.writer.lock().await;
        let mut records = self.load_locked().await?;
        let result = apply(&mut records)?;
        self.save_locked(&records).await?;
        Ok(result)
    }

    async fn load_locked(&self) -> Result<Vec<T>, AppError> {
        let Some(bytes) = self.backend.read().await? else {
            tracing::debug!("Creating empty {} collection", self.name);
            self.save_locked(&[]).await?;
            return Ok(Vec::new());
        };

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!("Corrupt {} collection: {:?}", self.name, e);
            AppError::Storage(format!("Failed to parse {} collection: {}", self.name, e))
        })
    }

    async fn save_locked(&self, records: &[T]) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|e| {
            AppError::Internal(format!("Failed to serialize {} collection: {}", self.name, e))
        })?;
        self.backend.write(&bytes).await
    }
}
