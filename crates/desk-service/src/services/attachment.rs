//! Local-disk attachment storage
//!
//! Every upload lands in one directory under a generated, collision-free name.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use desk_common::AppError;
use desk_core::value_objects::StoredFilename;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};

/// A file received with a ticket submission
#[derive(Debug, Clone)]
pub struct Upload {
    /// Filename as sent by the client (untrusted)
    pub client_filename: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(client_filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            client_filename: client_filename.into(),
            bytes,
        }
    }
}

/// Attachment directory on local disk
#[derive(Debug, Clone)]
pub struct AttachmentStore {
    root: PathBuf,
    max_bytes: usize,
}

impl AttachmentStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    /// Upload directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Largest accepted upload in bytes
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Create the upload directory if it does not exist
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Absolute location of a stored attachment
    pub fn path_of(&self, name: &StoredFilename) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// Write an upload to disk and return the name it was stored under
    #[instrument(skip(self, upload), fields(client_filename = %upload.client_filename, size = upload.bytes.len()))]
    pub async fn save(&self, upload: &Upload) -> ServiceResult<StoredFilename> {
        if upload.bytes.len() > self.max_bytes {
            return Err(AppError::PayloadTooLarge {
                max_bytes: self.max_bytes,
            }
            .into());
        }

        let name = StoredFilename::generate(Uuid::new_v4().simple(), &upload.client_filename);
        let path = self.path_of(&name);

        // create_new: a generated name must never clobber an existing file
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(storage_error)?;
        file.write_all(&upload.bytes).await.map_err(storage_error)?;
        file.flush().await.map_err(storage_error)?;

        debug!(stored = %name, "Attachment written");
        Ok(name)
    }

    /// Delete a stored attachment, logging instead of failing
    #[instrument(skip(self))]
    pub async fn remove(&self, name: &StoredFilename) {
        match tokio::fs::remove_file(self.path_of(name)).await {
            Ok(()) => debug!("Attachment removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(error = %e, "Failed to remove attachment"),
        }
    }

    /// Whether the attachment is present on disk
    pub async fn exists(&self, name: &StoredFilename) -> bool {
        tokio::fs::try_exists(self.path_of(name))
            .await
            .unwrap_or(false)
    }
}

fn storage_error(e: std::io::Error) -> ServiceError {
    AppError::Storage(e.to_string()).into()
}
