//! Alumni mentorship: profiles, connection requests, and replies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An alumni profile layered on a user account. One-to-one with `User` by
/// convention only; nothing enforces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alumni {
  pub id:                      i64,
  pub user_id:                 i64,
  pub school_id:               i64,
  pub graduation_year:         i32,
  pub current_occupation:      String,
  pub organization:            Option<String>,
  pub expertise_areas:         Vec<String>,
  pub bio:                     Option<String>,
  pub available_for_mentoring: bool,
  pub created_at:              DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlumni {
  pub user_id:            i64,
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

/// Partial update, applied field-by-field where `Some`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniUpdate {
  pub graduation_year:         Option<i32>,
  pub current_occupation:      Option<String>,
  pub organization:            Option<String>,
  pub expertise_areas:         Option<Vec<String>>,
  pub bio:                     Option<String>,
  pub available_for_mentoring: Option<bool>,
}

// ─── Connections ─────────────────────────────────────────────────────────────

/// A student's mentorship request directed at one alumnus.
///
/// `status` is a free string (default `"pending"`), unlike complaint status
/// which is a closed enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniConnection {
  pub id:                i64,
  pub student_id:        i64,
  pub alumni_id:         i64,
  pub question_title:    String,
  pub question_details:  String,
  pub category:          String,
  pub is_public:         bool,
  pub status:            String,
  pub ai_recommendation: Option<serde_json::Value>,
  pub created_at:        DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlumniConnection {
  pub student_id:        i64,
  pub alumni_id:         i64,
  pub question_title:    String,
  pub question_details:  String,
  pub category:          String,
  #[serde(default)]
  pub is_public:         bool,
  #[serde(default = "default_status")]
  pub status:            String,
  pub ai_recommendation: Option<serde_json::Value>,
}

fn default_status() -> String {
  "pending".to_string()
}

/// An alumnus's reply on a connection thread. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniResponse {
  pub id:            i64,
  pub connection_id: i64,
  pub response:      String,
  pub created_at:    DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAlumniResponse {
  pub connection_id: i64,
  pub response:      String,
}
