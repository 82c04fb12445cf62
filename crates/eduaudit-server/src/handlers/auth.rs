//! Handlers for `/api/auth/*`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/auth/register` | 201 + session cookie; school-role side effect |
//! | `POST` | `/api/auth/login`    | 200 + session cookie |
//! | `GET`  | `/api/auth/session`  | current user or 401 |
//! | `POST` | `/api/auth/logout`   | always 200 |

use axum::{
  Json,
  extract::State,
  http::{HeaderMap, StatusCode, header},
  response::IntoResponse,
};
use eduaudit_core::{
  school::NewSchool,
  store::GrievanceStore,
  user::{NewUser, User, UserRole, UserUpdate},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState,
  error::{Error, Result},
  session::{
    self, CurrentUser, clear_session_cookie, hash_password, session_cookie,
    verify_password,
  },
};

/// `POST /api/auth/register`
///
/// Validates role invariants, rejects duplicate username/email, hashes the
/// password, and logs the new user straight in. A `school`-role registration
/// additionally creates a School row and backfills the user's `schoolId` —
/// best-effort: a failure there is logged and the registration still
/// succeeds.
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(mut body): Json<NewUser>,
) -> Result<impl IntoResponse>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  body.validate()?;

  if state
    .store
    .get_user_by_username(&body.username)
    .await
    .map_err(Error::store)?
    .is_some()
  {
    return Err(Error::BadRequest("Username already exists".to_string()));
  }
  if state
    .store
    .get_user_by_email(&body.email)
    .await
    .map_err(Error::store)?
    .is_some()
  {
    return Err(Error::BadRequest("Email already registered".to_string()));
  }

  body.password = hash_password(&body.password)?;
  let is_school_admin =
    body.user_type == UserRole::School && body.school_name.is_some();

  let mut user = state.store.create_user(body).await.map_err(Error::store)?;

  if is_school_admin {
    match create_school_for_admin(&state, &user).await {
      Ok(updated) => user = updated,
      Err(e) => {
        // Partial failure is swallowed: the account exists, the school row
        // can be created later through a profile edit.
        tracing::warn!(user_id = user.id, error = %e, "school creation failed during registration");
      }
    }
  }

  let token = state.sessions.create(user.id);
  Ok((
    StatusCode::CREATED,
    [(header::SET_COOKIE, session_cookie(token))],
    Json(user),
  ))
}

/// Create the School row for a freshly registered school admin and backfill
/// their `schoolId`.
async fn create_school_for_admin<S>(
  state: &AppState<S>,
  user: &User,
) -> Result<User>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let name = user
    .school_name
    .clone()
    .ok_or_else(|| Error::Internal("school admin without school name".to_string()))?;

  let school = state
    .store
    .create_school(NewSchool {
      name,
      district: user
        .district
        .clone()
        .unwrap_or_else(|| "Unknown".to_string()),
      category: "Government".to_string(),
      address: String::new(),
      pincode: String::new(),
      admin_id: Some(user.id),
      contact_phone: user.phone_number.clone(),
      contact_email: Some(user.email.clone()),
    })
    .await
    .map_err(Error::store)?;

  state
    .store
    .update_user(user.id, UserUpdate {
      school_id: Some(school.id),
      ..Default::default()
    })
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::Internal("registered user vanished".to_string()))
}

// ─── Login / logout ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub username: String,
  pub password: String,
}

/// `POST /api/auth/login`
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<impl IntoResponse>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user = state
    .store
    .get_user_by_username(&body.username)
    .await
    .map_err(Error::store)?
    .ok_or(Error::Unauthorized)?;

  if !verify_password(&body.password, &user.password_hash) {
    return Err(Error::Unauthorized);
  }

  let token = state.sessions.create(user.id);
  Ok(([(header::SET_COOKIE, session_cookie(token))], Json(user)))
}

/// `GET /api/auth/session` — the 401 is produced by the extractor.
pub async fn current_session<S>(CurrentUser(user): CurrentUser) -> Json<User>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Json(user)
}

/// `POST /api/auth/logout` — succeeds whether or not a session existed.
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
) -> impl IntoResponse
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
{
  if let Some(token) = session::token_from_headers(&headers) {
    state.sessions.remove(token);
  }
  (
    [(header::SET_COOKIE, clear_session_cookie())],
    Json(json!({ "message": "Logged out successfully" })),
  )
}
