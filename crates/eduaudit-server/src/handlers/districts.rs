//! Handlers for `/api/districts` — the public statistics surface.

use axum::{
  Json,
  extract::{Path, State},
};
use eduaudit_core::{district::DistrictStats, store::GrievanceStore};
use serde_json::{Value, json};

use crate::{
  AppState,
  error::{Error, Result},
};

/// `GET /api/districts/stats` — every district that has a stats row.
/// Public: dashboards render this before login.
pub async fn all_stats<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<DistrictStats>>>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let stats = state.store.all_district_stats().await.map_err(Error::store)?;
  Ok(Json(stats))
}

/// `GET /api/districts/:district/stats`
pub async fn one_stats<S>(
  State(state): State<AppState<S>>,
  Path(district): Path<String>,
) -> Result<Json<DistrictStats>>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let stats = state
    .store
    .get_district_stats(&district)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound("District stats not found".to_string()))?;
  Ok(Json(stats))
}

/// `GET /api/districts/:district/insights` — an AI-generated paragraph over
/// the district's rollup; falls back to an apology string when the model is
/// unreachable.
pub async fn insights<S>(
  State(state): State<AppState<S>>,
  Path(district): Path<String>,
) -> Result<Json<Value>>
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let stats = state
    .store
    .get_district_stats(&district)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::NotFound("District stats not found".to_string()))?;

  let insights = state.ai.district_insights(&stats).await;
  Ok(Json(json!({ "district": stats.district, "insights": insights })))
}
