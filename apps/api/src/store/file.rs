use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{ResumeStore, StoredResume};
use crate::errors::AppError;
use crate::models::resume::{OwnerId, ResumeData, ResumeStyle};

/// File-backed store: one pretty-printed JSON document per owner under a
/// configured directory. Writes go to a sibling temp file first and are
/// renamed into place, so a crashed save never leaves a torn document.
pub struct FileResumeStore {
    dir: PathBuf,
}

impl FileResumeStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileResumeStore { dir: dir.into() }
    }

    fn document_path(&self, owner: OwnerId) -> PathBuf {
        self.dir.join(format!("{owner}.json"))
    }
}

#[async_trait]
impl ResumeStore for FileResumeStore {
    async fn load(&self, owner: OwnerId) -> Result<Option<StoredResume>, AppError> {
        let path = self.document_path(owner);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AppError::Storage(format!("read {}: {e}", path.display()))),
        };

        let stored: StoredResume = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Storage(format!("parse {}: {e}", path.display())))?;
        Ok(Some(stored))
    }

    async fn save(
        &self,
        owner: OwnerId,
        data: &ResumeData,
        style: ResumeStyle,
    ) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Storage(format!("create {}: {e}", self.dir.display())))?;

        let stored = StoredResume {
            resume_data: data.clone(),
            style,
        };
        let bytes = serde_json::to_vec_pretty(&stored)
            .map_err(|e| AppError::Storage(format!("serialize resume: {e}")))?;

        let path = self.document_path(owner);
        let tmp = path.with_extension("json.tmp");
        write_replace(&tmp, &path, &bytes).await
    }
}

async fn write_replace(tmp: &Path, path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    tokio::fs::write(tmp, bytes)
        .await
        .map_err(|e| AppError::Storage(format!("write {}: {e}", tmp.display())))?;
    tokio::fs::rename(tmp, path)
        .await
        .map_err(|e| AppError::Storage(format!("replace {}: {e}", path.display())))?;
    Ok(())
}
