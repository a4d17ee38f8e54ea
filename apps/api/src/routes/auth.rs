use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::auth::session::{issue_token, Language};
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Interface language to bake into the session token. Defaults to zh,
    /// the product's primary locale.
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

/// POST /auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state
        .auth
        .register(&req.email, &req.password, &req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /auth/login
///
/// Returns the public user record plus the opaque session token the shell
/// carries as its cookie-like value.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state.auth.login(&req.email, &req.password).await?;
    let token = issue_token(&user, req.language.unwrap_or_default(), Utc::now());
    Ok(Json(LoginResponse { user, token }))
}
