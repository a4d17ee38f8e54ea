use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ResumeStore, StoredResume};
use crate::errors::AppError;
use crate::models::resume::{OwnerId, ResumeData, ResumeStyle};

/// Volatile in-process store. Documents live for the lifetime of the
/// process. The default backend, and the one tests use.
#[derive(Default)]
pub struct MemoryResumeStore {
    documents: RwLock<HashMap<OwnerId, StoredResume>>,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn load(&self, owner: OwnerId) -> Result<Option<StoredResume>, AppError> {
        Ok(self.documents.read().await.get(&owner).cloned())
    }

    async fn save(
        &self,
        owner: OwnerId,
        data: &ResumeData,
        style: ResumeStyle,
    ) -> Result<(), AppError> {
        let stored = StoredResume {
            resume_data: data.clone(),
            style,
        };
        self.documents.write().await.insert(owner, stored);
        Ok(())
    }
}
