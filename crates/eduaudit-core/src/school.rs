//! School records.
//!
//! A school row is created either directly or as a side effect of a
//! `school`-role registration, in which case `admin_id` points back at the
//! registering user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
  pub id:            i64,
  pub name:          String,
  pub district:      String,
  pub address:       String,
  pub pincode:       String,
  /// Govt, Aided or Private; stored as free text.
  pub category:      String,
  pub admin_id:      Option<i64>,
  pub contact_phone: Option<String>,
  pub contact_email: Option<String>,
  pub created_at:    DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchool {
  pub name:          String,
  pub district:      String,
  pub address:       String,
  pub pincode:       String,
  pub category:      String,
  pub admin_id:      Option<i64>,
  pub contact_phone: Option<String>,
  pub contact_email: Option<String>,
}

/// Partial update, applied field-by-field where `Some`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolUpdate {
  pub name:          Option<String>,
  pub district:      Option<String>,
  pub address:       Option<String>,
  pub pincode:       Option<String>,
  pub category:      Option<String>,
  pub admin_id:      Option<i64>,
  pub contact_phone: Option<String>,
  pub contact_email: Option<String>,
}
