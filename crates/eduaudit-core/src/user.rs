//! User accounts and the three access roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The role a user account acts under. Determines complaint visibility and
/// which endpoints the account may call.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
  Student,
  School,
  Authority,
}

/// A registered account. The password hash is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id:              i64,
  pub username:        String,
  #[serde(skip_serializing, default)]
  pub password_hash:   String,
  pub email:           String,
  pub name:            String,
  pub user_type:       UserRole,
  pub district:        Option<String>,
  pub school_id:       Option<i64>,
  pub school_name:     Option<String>,
  pub class_info:      Option<String>,
  pub designation:     Option<String>,
  pub phone_number:    Option<String>,
  pub profile_picture: Option<String>,
  pub created_at:      DateTime<Utc>,
}

/// Registration payload. `password` is plaintext here; the server hashes it
/// before the record reaches the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
  pub username:        String,
  pub password:        String,
  pub email:           String,
  pub name:            String,
  pub user_type:       UserRole,
  pub district:        Option<String>,
  pub school_id:       Option<i64>,
  pub school_name:     Option<String>,
  pub class_info:      Option<String>,
  pub designation:     Option<String>,
  pub phone_number:    Option<String>,
  pub profile_picture: Option<String>,
}

impl NewUser {
  /// Role-specific invariants checked at registration.
  pub fn validate(&self) -> Result<()> {
    match self.user_type {
      UserRole::School if self.school_name.is_none() => Err(Error::Validation(
        "School name is required for school admin accounts".to_string(),
      )),
      UserRole::Authority if self.district.is_none() => Err(Error::Validation(
        "District is required for authority accounts".to_string(),
      )),
      _ => Ok(()),
    }
  }
}

/// Partial profile update, applied field-by-field where `Some`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
  pub email:           Option<String>,
  pub name:            Option<String>,
  pub district:        Option<String>,
  pub school_id:       Option<i64>,
  pub school_name:     Option<String>,
  pub class_info:      Option<String>,
  pub designation:     Option<String>,
  pub phone_number:    Option<String>,
  pub profile_picture: Option<String>,
}
