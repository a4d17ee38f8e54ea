//! Registration and login for the authentication collaborator. Credential
//! failures map to two fixed user-facing messages ("Email already exists",
//! "Invalid email or password") and are never conflated with transport or
//! storage failures.

pub mod session;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bcrypt::DEFAULT_COST;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{User, UserRecord};

/// Credential storage seam. The backend choice (memory, file, database) is
/// an external concern; the service depends only on this contract.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Inserts a new record. Rejects with `EmailTaken` when the email is
    /// already registered.
    async fn create(&self, record: UserRecord) -> Result<(), AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError>;
}

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserDirectory>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        AuthService { users }
    }

    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<User, AppError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let password_hash = hash_password(password.to_string()).await?;
        let record = UserRecord {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.trim().to_string(),
            password_hash,
            created_at: Utc::now(),
        };
        let user = record.public();
        self.users.create(record).await?;
        Ok(user)
    }

    /// Unknown email and wrong password produce the identical message, so a
    /// caller cannot probe which addresses are registered.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let record = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let valid = verify_password(password.to_string(), record.password_hash.clone()).await?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }
        Ok(record.public())
    }
}

// bcrypt is CPU-bound; keep it off the async executor.
async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, DEFAULT_COST))
        .await
        .map_err(anyhow::Error::new)?
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))
}

async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(anyhow::Error::new)?
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))
}

/// In-process credential store. Accounts last as long as the process.
#[derive(Default)]
pub struct MemoryUserDirectory {
    by_email: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn create(&self, record: UserRecord) -> Result<(), AppError> {
        let mut users = self.by_email.write().await;
        if users.contains_key(&record.email) {
            return Err(AppError::EmailTaken);
        }
        users.insert(record.email.clone(), record);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self.by_email.read().await.get(email).cloned())
    }
}
