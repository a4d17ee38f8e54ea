//! Persistence gateway: the abstract store the autosave pipeline writes
//! through. Four interchangeable backends satisfy the one contract; the
//! core pipeline depends only on the trait, and the choice is made once at
//! startup from configuration.

pub mod file;
pub mod memory;
pub mod postgres;
pub mod remote;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::{OwnerId, ResumeData, ResumeStyle};

/// A persisted document plus its presentation style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResume {
    pub resume_data: ResumeData,
    pub style: ResumeStyle,
}

/// The gateway contract. `save` must be an idempotent upsert keyed by the
/// owner: repeated calls with the same content are safe.
///
/// Carried as `Arc<dyn ResumeStore>` in `AppState` and by the autosave
/// coordinator.
#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn load(&self, owner: OwnerId) -> Result<Option<StoredResume>, AppError>;

    async fn save(
        &self,
        owner: OwnerId,
        data: &ResumeData,
        style: ResumeStyle,
    ) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::file::FileResumeStore;
    use super::memory::MemoryResumeStore;
    use super::*;
    use crate::models::resume::{EducationEntry, ExperienceEntry};
    use uuid::Uuid;

    fn sample_document() -> ResumeData {
        let mut data = ResumeData::empty();
        data.personal_info.name = "Grace Hopper".to_string();
        data.personal_info.email = "grace@example.com".to_string();
        for school in ["Vassar", "Yale"] {
            let mut e = EducationEntry::new();
            e.school = school.to_string();
            data.education.push(e);
        }
        let mut x = ExperienceEntry::new();
        x.company = "US Navy".to_string();
        data.experience.push(x);
        data
    }

    /// Same contract checks against any backend: absent document loads as
    /// None, save-then-load round-trips content (order included), repeated
    /// saves upsert rather than duplicate.
    async fn exercise_contract(store: &dyn ResumeStore) {
        let owner = OwnerId(Uuid::new_v4());
        assert_eq!(store.load(owner).await.unwrap(), None);

        let doc = sample_document();
        store.save(owner, &doc, ResumeStyle::Style2).await.unwrap();

        let stored = store.load(owner).await.unwrap().unwrap();
        assert_eq!(stored.resume_data, doc);
        assert_eq!(stored.style, ResumeStyle::Style2);
        let order: Vec<&str> = stored
            .resume_data
            .education
            .iter()
            .map(|e| e.school.as_str())
            .collect();
        assert_eq!(order, vec!["Vassar", "Yale"]);

        // Idempotent upsert: saving again with a new style replaces in place.
        store.save(owner, &doc, ResumeStyle::Style3).await.unwrap();
        let stored = store.load(owner).await.unwrap().unwrap();
        assert_eq!(stored.style, ResumeStyle::Style3);

        // Other owners are unaffected.
        assert_eq!(store.load(OwnerId(Uuid::new_v4())).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_contract() {
        exercise_contract(&MemoryResumeStore::new()).await;
    }

    #[tokio::test]
    async fn test_file_store_contract() {
        let dir = tempfile::tempdir().unwrap();
        exercise_contract(&FileResumeStore::new(dir.path())).await;
    }

    #[tokio::test]
    async fn test_file_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let owner = OwnerId(Uuid::new_v4());
        let doc = sample_document();

        {
            let store = FileResumeStore::new(dir.path());
            store.save(owner, &doc, ResumeStyle::Style1).await.unwrap();
        }

        // A fresh instance over the same directory sees the document.
        let store = FileResumeStore::new(dir.path());
        let stored = store.load(owner).await.unwrap().unwrap();
        assert_eq!(stored.resume_data, doc);
    }
}
