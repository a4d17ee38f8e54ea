use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ResumeStore, StoredResume};
use crate::errors::AppError;
use crate::models::resume::{OwnerId, ResumeData, ResumeStyle};

/// How long a gateway round-trip may take before it counts as a failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote store speaking the `/resume/load` + `/resume/save` wire contract
/// against another instance of this service (or any other implementor).
/// Transport failures and timeouts surface as storage errors, which the
/// autosave coordinator turns into `SaveStatus::Error`.
pub struct RemoteResumeStore {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoadBody {
    resume_data: Option<ResumeData>,
    style: Option<ResumeStyle>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveBody<'a> {
    user_id: OwnerId,
    resume_data: &'a ResumeData,
    style: ResumeStyle,
}

impl RemoteResumeStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(RemoteResumeStore {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ResumeStore for RemoteResumeStore {
    async fn load(&self, owner: OwnerId) -> Result<Option<StoredResume>, AppError> {
        let url = format!("{}/resume/load", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("userId", owner.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Storage(format!(
                "load returned {} from {url}",
                response.status()
            )));
        }

        let body: LoadBody = response.json().await?;
        match body.resume_data {
            Some(resume_data) => Ok(Some(StoredResume {
                resume_data,
                style: body.style.unwrap_or_default(),
            })),
            None => Ok(None),
        }
    }

    async fn save(
        &self,
        owner: OwnerId,
        data: &ResumeData,
        style: ResumeStyle,
    ) -> Result<(), AppError> {
        let url = format!("{}/resume/save", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&SaveBody {
                user_id: owner,
                resume_data: data,
                style,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Storage(format!(
                "save returned {} from {url}",
                response.status()
            )));
        }
        Ok(())
    }
}
