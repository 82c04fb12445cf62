//! Per-district statistics — a materialized rollup over complaints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One category's share of a district's complaints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
  pub category: String,
  pub count:    usize,
}

/// Denormalized counters for one district, recomputed synchronously whenever
/// a complaint in that district is created or changes status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictStats {
  pub id:                  i64,
  pub district:            String,
  pub total_schools:       i64,
  pub total_complaints:    i64,
  pub resolved_complaints: i64,
  pub pending_complaints:  i64,
  /// Mean resolution time over resolved complaints, in whole days.
  pub avg_resolution_time: i64,
  /// Top 3 categories by count, descending.
  pub top_categories:      Vec<CategoryCount>,
  pub updated_at:          DateTime<Utc>,
}

/// Partial update for a stats row, applied field-by-field where `Some`.
#[derive(Debug, Clone, Default)]
pub struct DistrictStatsUpdate {
  pub total_schools:       Option<i64>,
  pub total_complaints:    Option<i64>,
  pub resolved_complaints: Option<i64>,
  pub pending_complaints:  Option<i64>,
  pub avg_resolution_time: Option<i64>,
  pub top_categories:      Option<Vec<CategoryCount>>,
}
