//! `/api/metadata` and `/api/translate` — form vocabularies and the
//! English/Kannada helper.

use axum::{Json, extract::State};
use eduaudit_core::{
  complaint::ComplaintStatus,
  store::GrievanceStore,
  vocab::{ALUMNI_EXPERTISE_AREAS, COMPLAINT_CATEGORIES, KARNATAKA_DISTRICTS},
};
use eduaudit_ai::TargetLanguage;
use serde::Deserialize;
use serde_json::{Value, json};
use strum::IntoEnumIterator as _;

use crate::AppState;

/// `GET /api/metadata` — the fixed vocabularies the client builds its forms
/// from. Public.
pub async fn metadata() -> Json<Value> {
  let statuses: Vec<String> =
    ComplaintStatus::iter().map(|s| s.to_string()).collect();
  Json(json!({
    "districts": KARNATAKA_DISTRICTS,
    "complaintCategories": COMPLAINT_CATEGORIES,
    "expertiseAreas": ALUMNI_EXPERTISE_AREAS,
    "complaintStatus": statuses,
  }))
}

#[derive(Debug, Deserialize)]
pub struct TranslateBody {
  pub text:   String,
  pub target: TargetLanguage,
}

/// `POST /api/translate` — returns the input unchanged when translation is
/// unavailable.
pub async fn translate<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<TranslateBody>,
) -> Json<Value>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
{
  let translated = state.ai.translate(&body.text, body.target).await;
  Json(json!({ "text": body.text, "translated": translated }))
}
