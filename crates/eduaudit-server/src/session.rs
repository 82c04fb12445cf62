//! Session-cookie authentication.
//!
//! Sessions are opaque UUID tokens in an in-process map, delivered via an
//! HttpOnly cookie. Like the storage layer they are volatile: a restart logs
//! everyone out. Passwords are stored and checked as argon2 PHC strings.

use std::collections::HashMap;

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use eduaudit_core::{store::GrievanceStore, user::User};
use parking_lot::RwLock;
use rand_core::OsRng;
use uuid::Uuid;

use crate::{AppState, error::Error};

/// Cookie name carrying the session token.
pub const SESSION_COOKIE: &str = "eduaudit_session";

// ─── Session store ───────────────────────────────────────────────────────────

/// Token → user id map. One entry per live login.
#[derive(Default)]
pub struct SessionStore {
  sessions: RwLock<HashMap<Uuid, i64>>,
}

impl SessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Open a session for `user_id` and return its token.
  pub fn create(&self, user_id: i64) -> Uuid {
    let token = Uuid::new_v4();
    self.sessions.write().insert(token, user_id);
    token
  }

  pub fn user_id(&self, token: Uuid) -> Option<i64> {
    self.sessions.read().get(&token).copied()
  }

  pub fn remove(&self, token: Uuid) {
    self.sessions.write().remove(&token);
  }
}

// ─── Cookie plumbing ─────────────────────────────────────────────────────────

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(token: Uuid) -> String {
  format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value expiring the session cookie.
pub fn clear_session_cookie() -> String {
  format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Pull the session token out of the `Cookie` header, if present and valid.
pub fn token_from_headers(headers: &HeaderMap) -> Option<Uuid> {
  let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
  cookies.split(';').find_map(|pair| {
    let (name, value) = pair.trim().split_once('=')?;
    if name == SESSION_COOKIE {
      Uuid::parse_str(value).ok()
    } else {
      None
    }
  })
}

// ─── Extractor ───────────────────────────────────────────────────────────────

/// The authenticated caller. Present in a handler's signature means the
/// request carried a live session; otherwise the request was rejected 401.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token =
      token_from_headers(&parts.headers).ok_or(Error::Unauthorized)?;
    let user_id = state.sessions.user_id(token).ok_or(Error::Unauthorized)?;

    // A session can outlive its user only if the store were swapped out at
    // runtime; treat that as an expired session rather than a 500.
    let user = state
      .store
      .get_user(user_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::Unauthorized)?;

    Ok(CurrentUser(user))
  }
}

// ─── Passwords ───────────────────────────────────────────────────────────────

/// Hash a plaintext password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, Error> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| Error::Internal(format!("argon2 error: {e}")))
}

/// Check a plaintext password against a stored PHC string.
pub fn verify_password(password: &str, phc: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(phc) else {
    return false;
  };
  Argon2::default()
    .verify_password(password.as_bytes(), &parsed)
    .is_ok()
}
