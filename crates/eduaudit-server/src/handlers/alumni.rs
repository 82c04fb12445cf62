//! Handlers for `/api/alumni`.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use eduaudit_core::{
  alumni::{Alumni, NewAlumni},
  store::GrievanceStore,
};
use serde::Deserialize;

use crate::{
  AppState,
  error::{Error, Result},
  session::CurrentUser,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
  pub school_id: Option<i64>,
}

/// `GET /api/alumni[?schoolId=<id>]` — without the parameter the list is
/// empty; the web client always scopes to a school.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentUser(_): CurrentUser,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Alumni>>>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let alumni = match params.school_id {
    Some(school_id) => state
      .store
      .list_alumni_by_school(school_id)
      .await
      .map_err(Error::store)?,
    None => Vec::new(),
  };
  Ok(Json(alumni))
}

/// `GET /api/alumni/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentUser(_): CurrentUser,
  Path(id): Path<i64>,
) -> Result<Json<Alumni>>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let alumni = state
    .store
    .get_alumni(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound("Alumni not found".to_string()))?;
  Ok(Json(alumni))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub school_id:          i64,
  pub graduation_year:    i32,
  pub current_occupation: String,
  pub organization:       Option<String>,
  pub expertise_areas:    Vec<String>,
  pub bio:                Option<String>,
  #[serde(default = "default_available")]
  pub available_for_mentoring: bool,
}

fn default_available() -> bool {
  true
}

/// `POST /api/alumni` — create a mentorship profile for the calling user.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(actor): CurrentUser,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let alumni = state
    .store
    .create_alumni(NewAlumni {
      user_id:                 actor.id,
      school_id:               body.school_id,
      graduation_year:         body.graduation_year,
      current_occupation:      body.current_occupation,
      organization:            body.organization,
      expertise_areas:         body.expertise_areas,
      bio:                     body.bio,
      available_for_mentoring: body.available_for_mentoring,
    })
    .await
    .map_err(Error::store)?;

  Ok((StatusCode::CREATED, Json(alumni)))
}
