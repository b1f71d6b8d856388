//! Transient storage for uploaded receipts.
//!
//! [`UploadStore`] writes uploads under generated names and hands back a
//! [`TransientFile`] guard. Releasing the guard deletes the file; dropping it
//! without a release deletes it synchronously, so an early return or a panic
//! in the request handler still cleans up.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use nanoid::nanoid;
use tracing::{debug, warn};

use crate::error::Result;

const NAME_SUFFIX_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the upload directory if it does not exist yet.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` under a fresh name that keeps the original extension.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<TransientFile> {
        let extension = file_extension(original_name);
        let stored_name = generate_stored_name(&extension);
        let path = self.dir.join(&stored_name);

        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), size = bytes.len(), "Stored upload");

        Ok(TransientFile {
            path,
            stored_name,
            original_name: original_name.to_string(),
            extension,
            size: bytes.len() as u64,
            armed: true,
        })
    }
}

/// Lowercased extension of `name` including the leading dot, or empty.
pub fn file_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

fn generate_stored_name(extension: &str) -> String {
    format!(
        "{}-{}{}",
        Utc::now().timestamp_millis(),
        nanoid!(8, &NAME_SUFFIX_ALPHABET),
        extension
    )
}

/// An uploaded file owned by exactly one request.
#[derive(Debug)]
pub struct TransientFile {
    path: PathBuf,
    stored_name: String,
    original_name: String,
    extension: String,
    size: u64,
    armed: bool,
}

impl TransientFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stored_name(&self) -> &str {
        &self.stored_name
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Delete the file. Failures are logged and never returned; a file that
    /// is already gone counts as released.
    pub async fn release(mut self) {
        self.armed = false;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => debug!(path = %self.path.display(), "Removed transient upload"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove upload"),
        }
    }

    /// Keep the file on disk and return its stored name.
    pub fn persist(mut self) -> String {
        self.armed = false;
        std::mem::take(&mut self.stored_name)
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed unreleased upload on drop"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove upload"),
        }
    }
}
