//! Handlers for `/api/complaints` — the role-scoped heart of the API.
//!
//! Visibility rules:
//! - students see complaints they filed;
//! - school admins see complaints against their school;
//! - authorities see one district (`?district=`) or the union across every
//!   district that currently has a statistics row.

use std::str::FromStr as _;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use eduaudit_core::{
  complaint::{
    Complaint, ComplaintResponse, ComplaintStatus, NewComplaint,
    NewComplaintResponse, new_token_id,
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

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub district: Option<String>,
}

/// `GET /api/complaints[?district=<district>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentUser(actor): CurrentUser,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Complaint>>>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let complaints = match actor.user_type {
    UserRole::Student => state
      .store
      .list_complaints_by_user(actor.id)
      .await
      .map_err(Error::store)?,

    UserRole::School => match actor.school_id {
      Some(school_id) => state
        .store
        .list_complaints_by_school(school_id)
        .await
        .map_err(Error::store)?,
      // A school admin without a resolved school sees nothing.
      None => Vec::new(),
    },

    UserRole::Authority => match params.district {
      Some(district) => state
        .store
        .list_complaints_by_district(&district)
        .await
        .map_err(Error::store)?,
      None => {
        // Union across every district with a stats row. Districts without
        // one are invisible here, mirroring the rollup gap.
        let mut all = Vec::new();
        for stats in
          state.store.all_district_stats().await.map_err(Error::store)?
        {
          let mut district_complaints = state
            .store
            .list_complaints_by_district(&stats.district)
            .await
            .map_err(Error::store)?;
          all.append(&mut district_complaints);
        }
        all
      }
    },
  };

  Ok(Json(complaints))
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub title:       String,
  pub description: String,
  pub category:    String,
  pub evidence:    Option<String>,
}

/// `POST /api/complaints` — students only.
///
/// The server fills owner, school, district snapshot, token id, and initial
/// status; the submitter controls only the narrative fields. The AI triage
/// blob is best-effort and stored as returned, without re-validation.
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

  let Some(school_id) = actor.school_id else {
    return Err(Error::BadRequest(
      "School ID is required. Please update your profile with your school information."
        .to_string(),
    ));
  };
  let Some(district) = actor.district.clone() else {
    return Err(Error::BadRequest(
      "District is required. Please update your profile with your district."
        .to_string(),
    ));
  };

  let analysis = state
    .ai
    .analyze_complaint(&body.title, &body.description, &body.category)
    .await;
  let ai_analysis = serde_json::to_value(&analysis).ok();

  let complaint = state
    .store
    .create_complaint(NewComplaint {
      title: body.title,
      description: body.description,
      category: body.category,
      status: ComplaintStatus::Pending,
      user_id: actor.id,
      school_id,
      token_id: new_token_id(),
      assigned_to_id: None,
      ai_analysis,
      district,
      evidence: body.evidence,
    })
    .await
    .map_err(Error::store)?;

  Ok((StatusCode::CREATED, Json(complaint)))
}

// ─── Detail ──────────────────────────────────────────────────────────────────

/// Scope check shared by detail, status update, and the response thread.
/// Authorities pass unconditionally.
fn check_scope(actor: &User, complaint: &Complaint, action: &str) -> Result<()> {
  let out_of_scope = match actor.user_type {
    UserRole::Student => complaint.user_id != actor.id,
    UserRole::School => actor.school_id != Some(complaint.school_id),
    UserRole::Authority => false,
  };
  if out_of_scope {
    return Err(Error::Forbidden(format!(
      "You don't have permission to {action} this complaint"
    )));
  }
  Ok(())
}

async fn fetch_complaint<S>(state: &AppState<S>, id: i64) -> Result<Complaint>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .get_complaint(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound("Complaint not found".to_string()))
}

/// `GET /api/complaints/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<i64>,
) -> Result<Json<Complaint>>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let complaint = fetch_complaint(&state, id).await?;
  check_scope(&actor, &complaint, "view")?;
  Ok(Json(complaint))
}

// ─── Status update ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: String,
}

/// `PUT /api/complaints/:id/status`
///
/// Any of the five status values is accepted from any current status — there
/// is no transition graph. Unknown values are 400.
pub async fn update_status<S>(
  State(state): State<AppState<S>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<i64>,
  Json(body): Json<StatusBody>,
) -> Result<Json<Complaint>>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let status = ComplaintStatus::from_str(&body.status)
    .map_err(|_| Error::BadRequest("Invalid status".to_string()))?;

  let complaint = fetch_complaint(&state, id).await?;
  check_scope(&actor, &complaint, "update")?;

  let updated = state
    .store
    .update_complaint_status(id, status)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound("Complaint not found".to_string()))?;
  Ok(Json(updated))
}

// ─── Response thread ─────────────────────────────────────────────────────────

/// `GET /api/complaints/:id/responses`
pub async fn list_responses<S>(
  State(state): State<AppState<S>>,
  CurrentUser(actor): CurrentUser,
  Path(id): Path<i64>,
) -> Result<Json<Vec<ComplaintResponse>>>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let complaint = fetch_complaint(&state, id).await?;
  check_scope(&actor, &complaint, "view responses for")?;

  let responses = state
    .store
    .list_complaint_responses(id)
    .await
    .map_err(Error::store)?;
  Ok(Json(responses))
}

#[derive(Debug, Deserialize)]
pub struct ResponseBody {
  pub response:    String,
  pub attachments: Option<String>,
}

/// `POST /api/complaints/:id/responses` — append a reply tagged with the
/// caller's id and role.
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
  let complaint = fetch_complaint(&state, id).await?;
  check_scope(&actor, &complaint, "respond to")?;

  let response = state
    .store
    .add_complaint_response(NewComplaintResponse {
      complaint_id: complaint.id,
      user_id:      actor.id,
      user_type:    actor.user_type,
      response:     body.response,
      attachments:  body.attachments,
    })
    .await
    .map_err(Error::store)?;

  Ok((StatusCode::CREATED, Json(response)))
}
