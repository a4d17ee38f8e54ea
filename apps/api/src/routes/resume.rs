use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{OwnerId, ResumeData, ResumeStyle};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoadQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResponse {
    pub resume_data: Option<ResumeData>,
    pub style: Option<ResumeStyle>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub user_id: Uuid,
    pub resume_data: ResumeData,
    #[serde(default)]
    pub style: ResumeStyle,
}

#[derive(Serialize)]
pub struct SaveResponse {
    pub style: ResumeStyle,
}

/// GET /resume/load?userId=<id>
///
/// An absent document is a normal outcome (`null` fields), not an error;
/// the editor opens blank. A missing or malformed `userId` is rejected
/// synchronously.
pub async fn handle_load(
    State(state): State<AppState>,
    Query(query): Query<LoadQuery>,
) -> Result<Json<LoadResponse>, AppError> {
    let raw = query
        .user_id
        .ok_or_else(|| AppError::Validation("User ID is required".to_string()))?;
    let owner = OwnerId(
        Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::Validation("User ID is invalid".to_string()))?,
    );

    let response = match state.store.load(owner).await? {
        Some(stored) => LoadResponse {
            resume_data: Some(stored.resume_data),
            style: Some(stored.style),
        },
        None => LoadResponse {
            resume_data: None,
            style: None,
        },
    };
    Ok(Json(response))
}

/// POST /resume/save
///
/// Idempotent upsert keyed by `userId`; safe to call repeatedly with the
/// same content, which is exactly what the autosave coordinator does.
pub async fn handle_save(
    State(state): State<AppState>,
    Json(req): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, AppError> {
    tracing::debug!(
        "Save request for {}: {} education, {} experience, {} skill entries",
        req.user_id,
        req.resume_data.education.len(),
        req.resume_data.experience.len(),
        req.resume_data.skills.len(),
    );

    state
        .store
        .save(OwnerId(req.user_id), &req.resume_data, req.style)
        .await?;

    Ok(Json(SaveResponse { style: req.style }))
}
