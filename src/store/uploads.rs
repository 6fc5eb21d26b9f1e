//! Storage for uploaded driver and bus files.

use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// URL prefix uploaded files are served under, also the prefix of stored paths.
pub const UPLOADS_ROUTE: &str = "uploads";

const MAX_EXTENSION_LEN: usize = 8;

/// Writes uploaded bytes under server-generated names.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Store `bytes` and return the public path recorded on the owning record.
    pub async fn save(&self, bytes: &[u8], file_name: Option<&str>) -> Result<String, AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut name = uuid::Uuid::new_v4().simple().to_string();
        if let Some(ext) = file_name.and_then(safe_extension) {
            name.push('.');
            name.push_str(&ext);
        }

        tokio::fs::write(self.dir.join(&name), bytes).await?;
        tracing::debug!("Stored upload {} ({} bytes)", name, bytes.len());

        Ok(format!("{}/{}", UPLOADS_ROUTE, name))
    }
}

/// Lowercased extension of the client-supplied name, if it is short and alphanumeric.
fn safe_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
