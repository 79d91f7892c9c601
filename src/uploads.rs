//! Storage for uploaded listing images.
//!
//! Each accepted upload is written under the uploads directory with a
//! generated UUID filename, keeping a sanitized version of the original
//! extension. The returned path is the URL the image is later served from.

use anyhow::{Context, Result};
use std::path::PathBuf;
use uuid::Uuid;

/// Longest extension carried over from the client's filename.
const MAX_EXT_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    // ---
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        // ---
        UploadStore { dir: dir.into() }
    }

    /// Create the uploads directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<()> {
        // ---
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create uploads dir {}", self.dir.display()))
    }

    /// Persist one uploaded file and return its public `/images/...` path.
    pub async fn save(&self, original_name: Option<&str>, data: &[u8]) -> Result<String> {
        // ---
        let filename = match original_name.and_then(sanitized_extension) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };

        let path = self.dir.join(&filename);
        tokio::fs::write(&path, data)
            .await
            .with_context(|| format!("failed to write upload to {}", path.display()))?;

        tracing::debug!("stored upload {} ({} bytes)", filename, data.len());

        Ok(format!("/images/{filename}"))
    }
}

/// Extension of the client-supplied filename, lowercased and restricted to
/// alphanumerics. Anything else is dropped rather than trusted.
fn sanitized_extension(name: &str) -> Option<String> {
    // ---
    let ext = name.rsplit_once('.')?.1;
    if ext.is_empty()
        || ext.len() > MAX_EXT_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
