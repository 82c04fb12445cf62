//! The `GrievanceStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `eduaudit-store-mem`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  alumni::{
    Alumni, AlumniConnection, AlumniResponse, AlumniUpdate, NewAlumni,
    NewAlumniConnection, NewAlumniResponse,
  },
  complaint::{
    Complaint, ComplaintResponse, ComplaintStatus, NewComplaint,
    NewComplaintResponse,
  },
  district::{DistrictStats, DistrictStatsUpdate},
  school::{NewSchool, School, SchoolUpdate},
  user::{NewUser, User, UserUpdate},
};

/// Abstraction over an EduAudit storage backend.
///
/// Lookups return `Ok(None)` for missing rows; errors are reserved for
/// backend failures. Implementations must recompute the owning district's
/// statistics rollup after every complaint insert and status change.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait GrievanceStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  fn get_user(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn get_user_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  fn get_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + 'a;

  /// Persist a new user. `password` in the input must already be hashed —
  /// the store never sees plaintext.
  fn create_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn update_user(
    &self,
    id: i64,
    update: UserUpdate,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  // ── Schools ───────────────────────────────────────────────────────────

  fn get_school(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<School>, Self::Error>> + Send + '_;

  fn list_schools_by_district<'a>(
    &'a self,
    district: &'a str,
  ) -> impl Future<Output = Result<Vec<School>, Self::Error>> + Send + 'a;

  fn create_school(
    &self,
    input: NewSchool,
  ) -> impl Future<Output = Result<School, Self::Error>> + Send + '_;

  fn update_school(
    &self,
    id: i64,
    update: SchoolUpdate,
  ) -> impl Future<Output = Result<Option<School>, Self::Error>> + Send + '_;

  // ── Complaints ────────────────────────────────────────────────────────

  fn get_complaint(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Complaint>, Self::Error>> + Send + '_;

  fn list_complaints_by_user(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Vec<Complaint>, Self::Error>> + Send + '_;

  fn list_complaints_by_school(
    &self,
    school_id: i64,
  ) -> impl Future<Output = Result<Vec<Complaint>, Self::Error>> + Send + '_;

  fn list_complaints_by_district<'a>(
    &'a self,
    district: &'a str,
  ) -> impl Future<Output = Result<Vec<Complaint>, Self::Error>> + Send + 'a;

  /// Insert a complaint, then recompute its district's rollup.
  fn create_complaint(
    &self,
    input: NewComplaint,
  ) -> impl Future<Output = Result<Complaint, Self::Error>> + Send + '_;

  /// Set a complaint's status and bump `updated_at`, then recompute its
  /// district's rollup. No transition graph is enforced.
  fn update_complaint_status(
    &self,
    id: i64,
    status: ComplaintStatus,
  ) -> impl Future<Output = Result<Option<Complaint>, Self::Error>> + Send + '_;

  // ── Complaint responses ───────────────────────────────────────────────

  fn list_complaint_responses(
    &self,
    complaint_id: i64,
  ) -> impl Future<Output = Result<Vec<ComplaintResponse>, Self::Error>> + Send + '_;

  fn add_complaint_response(
    &self,
    input: NewComplaintResponse,
  ) -> impl Future<Output = Result<ComplaintResponse, Self::Error>> + Send + '_;

  // ── Alumni ────────────────────────────────────────────────────────────

  fn get_alumni(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Alumni>, Self::Error>> + Send + '_;

  fn get_alumni_by_user(
    &self,
    user_id: i64,
  ) -> impl Future<Output = Result<Option<Alumni>, Self::Error>> + Send + '_;

  fn list_alumni_by_school(
    &self,
    school_id: i64,
  ) -> impl Future<Output = Result<Vec<Alumni>, Self::Error>> + Send + '_;

  fn create_alumni(
    &self,
    input: NewAlumni,
  ) -> impl Future<Output = Result<Alumni, Self::Error>> + Send + '_;

  fn update_alumni(
    &self,
    id: i64,
    update: AlumniUpdate,
  ) -> impl Future<Output = Result<Option<Alumni>, Self::Error>> + Send + '_;

  // ── Connections ───────────────────────────────────────────────────────

  fn get_connection(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<AlumniConnection>, Self::Error>> + Send + '_;

  fn list_connections_by_student(
    &self,
    student_id: i64,
  ) -> impl Future<Output = Result<Vec<AlumniConnection>, Self::Error>> + Send + '_;

  fn list_connections_by_alumni(
    &self,
    alumni_id: i64,
  ) -> impl Future<Output = Result<Vec<AlumniConnection>, Self::Error>> + Send + '_;

  fn create_connection(
    &self,
    input: NewAlumniConnection,
  ) -> impl Future<Output = Result<AlumniConnection, Self::Error>> + Send + '_;

  fn update_connection_status<'a>(
    &'a self,
    id: i64,
    status: &'a str,
  ) -> impl Future<Output = Result<Option<AlumniConnection>, Self::Error>> + Send + 'a;

  // ── Alumni responses ──────────────────────────────────────────────────

  fn list_alumni_responses(
    &self,
    connection_id: i64,
  ) -> impl Future<Output = Result<Vec<AlumniResponse>, Self::Error>> + Send + '_;

  fn add_alumni_response(
    &self,
    input: NewAlumniResponse,
  ) -> impl Future<Output = Result<AlumniResponse, Self::Error>> + Send + '_;

  // ── District statistics ───────────────────────────────────────────────

  fn get_district_stats<'a>(
    &'a self,
    district: &'a str,
  ) -> impl Future<Output = Result<Option<DistrictStats>, Self::Error>> + Send + 'a;

  fn all_district_stats(
    &self,
  ) -> impl Future<Output = Result<Vec<DistrictStats>, Self::Error>> + Send + '_;

  /// Apply a partial update to a district's stats row. Returns `Ok(None)` —
  /// a silent no-op — when the district has no seeded row.
  fn update_district_stats<'a>(
    &'a self,
    district: &'a str,
    update: DistrictStatsUpdate,
  ) -> impl Future<Output = Result<Option<DistrictStats>, Self::Error>> + Send + 'a;
}
