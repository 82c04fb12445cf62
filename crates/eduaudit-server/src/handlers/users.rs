//! Handlers for `/api/user/:id`.

use axum::{
  Json,
  extract::{Path, State},
};
use eduaudit_core::{
  store::GrievanceStore,
  user::{User, UserUpdate},
};

use crate::{
  AppState,
  error::{Error, Result},
  session::CurrentUser,
};

/// `GET /api/user/:id` — any authenticated user may look up any profile;
/// the password hash never serializes.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentUser(_): CurrentUser,
  Path(id): Path<i64>,
) -> Result<Json<User>>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user = state
    .store
    .get_user(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
  Ok(Json(user))
}

/// `PUT /api/user/:id` — self-service only.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<i64>,
  Json(update): Json<UserUpdate>,
) -> Result<Json<User>>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if actor.id != id {
    return Err(Error::Forbidden(
      "You can only update your own profile".to_string(),
    ));
  }

  let user = state
    .store
    .update_user(id, update)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
  Ok(Json(user))
}
