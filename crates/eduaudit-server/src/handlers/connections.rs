//! Handlers for `/api/connections` — mentorship requests and their replies.
//!
//! A connection is visible to exactly two parties: the student who opened it
//! and the alumnus it addresses. Only the addressed alumnus may reply.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use eduaudit_core::{
  alumni::{
    AlumniConnection, AlumniResponse, NewAlumniConnection, NewAlumniResponse,
  },
  store::GrievanceStore,
  user::{User, UserRole},
};
use serde::Deserialize;

use crate::{
  AppState,
  error::{Error, Result},
  session::CurrentUser,
};

/// `GET /api/connections` — students list requests they opened; everyone
/// else lists requests addressed to their alumni profile (empty without
/// one).
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentUser(actor): CurrentUser,
) -> Result<Json<Vec<AlumniConnection>>>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let connections = if actor.user_type == UserRole::Student {
    state
      .store
      .list_connections_by_student(actor.id)
      .await
      .map_err(Error::store)?
  } else {
    match state
      .store
      .get_alumni_by_user(actor.id)
      .await
      .map_err(Error::store)?
    {
      Some(alumni) => state
        .store
        .list_connections_by_alumni(alumni.id)
        .await
        .map_err(Error::store)?,
      None => Vec::new(),
    }
  };
  Ok(Json(connections))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub alumni_id:        i64,
  pub question_title:   String,
  pub question_details: String,
  pub category:         String,
  #[serde(default)]
  pub is_public:        bool,
}

/// `POST /api/connections` — students only.
///
/// Best-effort AI matching runs over the addressed alumnus's school cohort
/// and is stored on the row as received; a failure there falls back to a
/// canned payload and never blocks the request.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentUser(actor): CurrentUser,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if actor.user_type != UserRole::Student {
    return Err(Error::Forbidden("Forbidden".to_string()));
  }

  let candidates = match state
    .store
    .get_alumni(body.alumni_id)
    .await
    .map_err(Error::store)?
  {
    Some(addressed) => state
      .store
      .list_alumni_by_school(addressed.school_id)
      .await
      .map_err(Error::store)?,
    None => Vec::new(),
  };

  let matches = state
    .ai
    .match_alumni(
      &body.question_title,
      &body.question_details,
      &body.category,
      &candidates,
    )
    .await;
  let ai_recommendation = serde_json::to_value(&matches).ok();

  let connection = state
    .store
    .create_connection(NewAlumniConnection {
      student_id: actor.id,
      alumni_id: body.alumni_id,
      question_title: body.question_title,
      question_details: body.question_details,
      category: body.category,
      is_public: body.is_public,
      status: "pending".to_string(),
      ai_recommendation,
    })
    .await
    .map_err(Error::store)?;

  Ok((StatusCode::CREATED, Json(connection)))
}

// ─── Detail and responses ────────────────────────────────────────────────────

/// Allow the owning student and the addressed alumnus; reject everyone else.
async fn check_participant<S>(
  state: &AppState<S>,
  actor: &User,
  connection: &AlumniConnection,
  action: &str,
) -> Result<()>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if actor.user_type == UserRole::Student && connection.student_id == actor.id {
    return Ok(());
  }
  let alumni = state
    .store
    .get_alumni_by_user(actor.id)
    .await
    .map_err(Error::store)?;
  if alumni.is_some_and(|a| a.id == connection.alumni_id) {
    return Ok(());
  }
  Err(Error::Forbidden(format!(
    "You don't have permission to {action} this connection"
  )))
}

async fn fetch_connection<S>(
  state: &AppState<S>,
  id: i64,
) -> Result<AlumniConnection>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .get_connection(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound("Connection not found".to_string()))
}

/// `GET /api/connections/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<i64>,
) -> Result<Json<AlumniConnection>>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let connection = fetch_connection(&state, id).await?;
  check_participant(&state, &actor, &connection, "view").await?;
  Ok(Json(connection))
}

/// `GET /api/connections/:id/responses`
pub async fn list_responses<S>(
  State(state): State<AppState<S>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<i64>,
) -> Result<Json<Vec<AlumniResponse>>>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let connection = fetch_connection(&state, id).await?;
  check_participant(&state, &actor, &connection, "view responses for").await?;

  let responses = state
    .store
    .list_alumni_responses(id)
    .await
    .map_err(Error::store)?;
  Ok(Json(responses))
}

#[derive(Debug, Deserialize)]
pub struct ResponseBody {
  pub response: String,
}

/// `POST /api/connections/:id/responses` — addressed alumnus only.
pub async fn create_response<S>(
  State(state): State<AppState<S>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<i64>,
  Json(body): Json<ResponseBody>,
) -> Result<impl IntoResponse>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let connection = fetch_connection(&state, id).await?;

  let alumni = state
    .store
    .get_alumni_by_user(actor.id)
    .await
    .map_err(Error::store)?;
  if !alumni.is_some_and(|a| a.id == connection.alumni_id) {
    return Err(Error::Forbidden(
      "You don't have permission to respond to this connection".to_string(),
    ));
  }

  let response = state
    .store
    .add_alumni_response(NewAlumniResponse {
      connection_id: connection.id,
      response:      body.response,
    })
    .await
    .map_err(Error::store)?;

  Ok((StatusCode::CREATED, Json(response)))
}
