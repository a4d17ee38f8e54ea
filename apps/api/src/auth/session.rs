#![allow(dead_code)]

//! The opaque session carrier. The shell hands the token string around as a
//! cookie-like value; only this module decodes it, and everything past the
//! boundary works with the explicit [`Session`]; core logic never reads
//! ambient state.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::resume::OwnerId;
use crate::models::user::User;

/// Token lifetime. One day, like the cookie it replaces.
const TOKEN_TTL_SECS: i64 = 86_400;

/// Interface language carried with the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Zh,
    En,
}

impl Default for Language {
    fn default() -> Self {
        Language::Zh
    }
}

/// The resolved editing session: who owns the document, how to label the
/// export, which language the UI speaks. Threaded explicitly through the
/// autosave and export pipelines.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub owner: OwnerId,
    pub display_name: String,
    pub locale: Language,
}

#[derive(Serialize, Deserialize)]
struct TokenClaims {
    owner: OwnerId,
    name: String,
    locale: Language,
    exp: i64,
}

/// Issues the opaque carrier for a freshly authenticated user.
/// The token is an unsigned claim set; expiry is enforced at decode.
pub fn issue_token(user: &User, locale: Language, now: DateTime<Utc>) -> String {
    let claims = TokenClaims {
        owner: OwnerId(user.id),
        name: user.name.clone(),
        locale,
        exp: now.timestamp() + TOKEN_TTL_SECS,
    };
    // Serializing a plain struct of strings and ints cannot fail.
    let json = serde_json::to_vec(&claims).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Resolves a carrier token into an explicit session. Malformed or expired
/// tokens resolve to `None`, meaning "no owner", which disables both
/// autosave and export.
pub fn resolve_token(token: &str, now: DateTime<Utc>) -> Option<Session> {
    let bytes = URL_SAFE_NO_PAD.decode(token.trim()).ok()?;
    let claims: TokenClaims = serde_json::from_slice(&bytes).ok()?;
    if claims.exp <= now.timestamp() {
        return None;
    }
    Some(Session {
        owner: claims.owner,
        display_name: claims.name,
        locale: claims.locale,
    })
}
