//! Complaints and their append-only response threads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::UserRole;

/// Complaint lifecycle status.
///
/// There is deliberately no transition graph: any status may be set from any
/// other by an authorized role. The value is still validated, so unknown
/// strings are rejected at the API boundary.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ComplaintStatus {
  Pending,
  InProgress,
  Resolved,
  Rejected,
  UnderReview,
}

/// A filed grievance.
///
/// `district` is copied from the submitter at creation time — a denormalized
/// snapshot, so later profile edits do not move the complaint between
/// district rollups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
  pub id:             i64,
  pub title:          String,
  pub description:    String,
  pub category:       String,
  pub status:         ComplaintStatus,
  pub user_id:        i64,
  pub school_id:      i64,
  /// Human-readable reference code, `KA<year>-<4-char code>`.
  pub token_id:       String,
  pub assigned_to_id: Option<i64>,
  pub ai_analysis:    Option<serde_json::Value>,
  pub district:       String,
  pub evidence:       Option<String>,
  pub created_at:     DateTime<Utc>,
  pub updated_at:     DateTime<Utc>,
}

/// Insert payload for a complaint. The server fills in everything beyond
/// title/description/category/evidence from the submitting user's profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComplaint {
  pub title:          String,
  pub description:    String,
  pub category:       String,
  pub status:         ComplaintStatus,
  pub user_id:        i64,
  pub school_id:      i64,
  pub token_id:       String,
  pub assigned_to_id: Option<i64>,
  pub ai_analysis:    Option<serde_json::Value>,
  pub district:       String,
  pub evidence:       Option<String>,
}

/// Generate a citizen-facing reference code for the current year.
pub fn new_token_id() -> String {
  let year = Utc::now().format("%Y");
  let code: String = Uuid::new_v4()
    .simple()
    .to_string()
    .chars()
    .take(4)
    .collect::<String>()
    .to_uppercase();
  format!("KA{year}-{code}")
}

// ─── Responses ───────────────────────────────────────────────────────────────

/// A reply on a complaint thread, tagged with the responder's role.
/// Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintResponse {
  pub id:           i64,
  pub complaint_id: i64,
  pub user_id:      i64,
  pub user_type:    UserRole,
  pub response:     String,
  pub attachments:  Option<String>,
  pub created_at:   DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComplaintResponse {
  pub complaint_id: i64,
  pub user_id:      i64,
  pub user_type:    UserRole,
  pub response:     String,
  pub attachments:  Option<String>,
}
