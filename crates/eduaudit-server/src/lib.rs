//! HTTP layer for EduAudit.
//!
//! Exposes an axum [`Router`] over any
//! [`GrievanceStore`](eduaudit_core::store::GrievanceStore), with
//! session-cookie authentication and role-scoped visibility. Binding,
//! config loading, and tracing init live in the binary.

pub mod error;
pub mod handlers;
pub mod session;

pub use error::Error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use eduaudit_ai::AiServices;
use eduaudit_core::store::GrievanceStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use session::SessionStore;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `EDUAUDIT_*` environment variables. Every field has a default so the
/// server runs with no config file at all.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:            String,
  #[serde(default = "default_port")]
  pub port:            u16,
  /// Seed the ten pilot districts' statistics rows at startup.
  #[serde(default = "default_seed")]
  pub seed_districts:  bool,
  /// Absent key disables AI calls; every operation then uses its fallback.
  #[serde(default)]
  pub openai_api_key:  Option<String>,
  #[serde(default = "default_openai_base_url")]
  pub openai_base_url: String,
  #[serde(default = "default_openai_model")]
  pub openai_model:    String,
}

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  5000
}

fn default_seed() -> bool {
  true
}

fn default_openai_base_url() -> String {
  eduaudit_ai::OPENAI_BASE_URL.to_string()
}

fn default_openai_model() -> String {
  eduaudit_ai::OPENAI_MODEL.to_string()
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: GrievanceStore> {
  pub store:    Arc<S>,
  pub sessions: Arc<SessionStore>,
  pub ai:       Arc<AiServices>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: GrievanceStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  use handlers::{alumni, auth, complaints, connections, districts, metadata, users};

  Router::new()
    // Auth
    .route("/api/auth/register", post(auth::register::<S>))
    .route("/api/auth/login", post(auth::login::<S>))
    .route("/api/auth/session", get(auth::current_session::<S>))
    .route("/api/auth/logout", post(auth::logout::<S>))
    // Users
    .route(
      "/api/user/{id}",
      get(users::get_one::<S>).put(users::update::<S>),
    )
    // Complaints
    .route(
      "/api/complaints",
      get(complaints::list::<S>).post(complaints::create::<S>),
    )
    .route("/api/complaints/{id}", get(complaints::get_one::<S>))
    .route(
      "/api/complaints/{id}/status",
      put(complaints::update_status::<S>),
    )
    .route(
      "/api/complaints/{id}/responses",
      get(complaints::list_responses::<S>)
        .post(complaints::create_response::<S>),
    )
    // Alumni
    .route("/api/alumni", get(alumni::list::<S>).post(alumni::create::<S>))
    .route("/api/alumni/{id}", get(alumni::get_one::<S>))
    // Connections
    .route(
      "/api/connections",
      get(connections::list::<S>).post(connections::create::<S>),
    )
    .route("/api/connections/{id}", get(connections::get_one::<S>))
    .route(
      "/api/connections/{id}/responses",
      get(connections::list_responses::<S>)
        .post(connections::create_response::<S>),
    )
    // Districts (public)
    .route("/api/districts/stats", get(districts::all_stats::<S>))
    .route("/api/districts/{district}/stats", get(districts::one_stats::<S>))
    .route(
      "/api/districts/{district}/insights",
      get(districts::insights::<S>),
    )
    // Metadata and translation (public)
    .route("/api/metadata", get(metadata::metadata))
    .route("/api/translate", post(metadata::translate::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use eduaudit_core::store::GrievanceStore as _;
  use eduaudit_store_mem::MemStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  fn make_state() -> AppState<MemStore> {
    AppState {
      store:    Arc::new(MemStore::seeded()),
      sessions: Arc::new(SessionStore::new()),
      ai:       Arc::new(AiServices::disabled()),
    }
  }

  async fn send(
    state: &AppState<MemStore>,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
      builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
      Some(value) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(value.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    router(state.clone()).oneshot(request).await.unwrap()
  }

  async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  /// The `name=value` pair from a response's `Set-Cookie`, ready to replay.
  fn cookie_of(response: &Response) -> String {
    response
      .headers()
      .get(header::SET_COOKIE)
      .expect("response sets a cookie")
      .to_str()
      .unwrap()
      .split(';')
      .next()
      .unwrap()
      .to_string()
  }

  async fn register(
    state: &AppState<MemStore>,
    body: Value,
  ) -> (StatusCode, String, Value) {
    let response = send(state, "POST", "/api/auth/register", None, Some(body)).await;
    let status = response.status();
    let cookie = if status == StatusCode::CREATED {
      cookie_of(&response)
    } else {
      String::new()
    };
    (status, cookie, body_json(response).await)
  }

  fn student_body(username: &str, district: &str, school_id: Option<i64>) -> Value {
    json!({
      "username": username,
      "password": "secret",
      "email": format!("{username}@example.com"),
      "name": username,
      "userType": "student",
      "district": district,
      "schoolId": school_id,
    })
  }

  async fn register_student(
    state: &AppState<MemStore>,
    username: &str,
    district: &str,
    school_id: Option<i64>,
  ) -> String {
    let (status, cookie, _) =
      register(state, student_body(username, district, school_id)).await;
    assert_eq!(status, StatusCode::CREATED);
    cookie
  }

  async fn file_complaint(
    state: &AppState<MemStore>,
    cookie: &str,
    category: &str,
  ) -> Value {
    let response = send(
      state,
      "POST",
      "/api/complaints",
      Some(cookie),
      Some(json!({
        "title": "Leaking roof",
        "description": "Classroom 4 floods when it rains",
        "category": category,
      })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
  }

  // ── Registration ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn register_sets_session_and_hides_password() {
    let state = make_state();
    let (status, cookie, user) =
      register(&state, student_body("asha", "Mysuru", Some(1))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());
    assert_eq!(user["username"], "asha");

    let session = send(&state, "GET", "/api/auth/session", Some(&cookie), None).await;
    assert_eq!(session.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn register_rejects_duplicates() {
    let state = make_state();
    register_student(&state, "asha", "Mysuru", None).await;

    let (status, _, body) =
      register(&state, student_body("asha", "Mysuru", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already exists");

    let mut other = student_body("asha2", "Mysuru", None);
    other["email"] = json!("asha@example.com");
    let (status, _, body) = register(&state, other).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already registered");
  }

  #[tokio::test]
  async fn register_enforces_role_invariants() {
    let state = make_state();

    let (status, _, _) = register(
      &state,
      json!({
        "username": "ghs", "password": "secret", "email": "ghs@example.com",
        "name": "GHS Admin", "userType": "school",
      }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = register(
      &state,
      json!({
        "username": "deo", "password": "secret", "email": "deo@example.com",
        "name": "DEO", "userType": "authority",
      }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn school_registration_creates_school_row() {
    let state = make_state();
    let (status, _, user) = register(
      &state,
      json!({
        "username": "ghs", "password": "secret", "email": "ghs@example.com",
        "name": "GHS Admin", "userType": "school",
        "schoolName": "GHS Mandya", "district": "Mandya",
      }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let schools = state.store.list_schools_by_district("Mandya").await.unwrap();
    assert_eq!(schools.len(), 1);
    assert_eq!(schools[0].name, "GHS Mandya");
    assert_eq!(schools[0].admin_id, Some(user["id"].as_i64().unwrap()));
    // The registered user's schoolId was backfilled.
    assert_eq!(user["schoolId"], json!(schools[0].id));
  }

  // ── Login / logout ────────────────────────────────────────────────────

  #[tokio::test]
  async fn login_verifies_password() {
    let state = make_state();
    register_student(&state, "asha", "Mysuru", None).await;

    let bad = send(
      &state,
      "POST",
      "/api/auth/login",
      None,
      Some(json!({ "username": "asha", "password": "wrong" })),
    )
    .await;
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);

    let good = send(
      &state,
      "POST",
      "/api/auth/login",
      None,
      Some(json!({ "username": "asha", "password": "secret" })),
    )
    .await;
    assert_eq!(good.status(), StatusCode::OK);
    let cookie = cookie_of(&good);

    let session = send(&state, "GET", "/api/auth/session", Some(&cookie), None).await;
    assert_eq!(session.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn logout_invalidates_the_session() {
    let state = make_state();
    let cookie = register_student(&state, "asha", "Mysuru", None).await;

    let out = send(&state, "POST", "/api/auth/logout", Some(&cookie), None).await;
    assert_eq!(out.status(), StatusCode::OK);

    let session = send(&state, "GET", "/api/auth/session", Some(&cookie), None).await;
    assert_eq!(session.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn gated_routes_require_a_session() {
    let state = make_state();
    for (method, uri) in [
      ("GET", "/api/complaints"),
      ("GET", "/api/auth/session"),
      ("GET", "/api/user/1"),
      ("GET", "/api/connections"),
    ] {
      let response = send(&state, method, uri, None, None).await;
      assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
  }

  // ── Profiles ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn profile_updates_are_self_service_only() {
    let state = make_state();
    let asha = register_student(&state, "asha", "Mysuru", None).await;
    register_student(&state, "ravi", "Mysuru", None).await;

    // Asha is user 1, Ravi is user 2.
    let forbidden = send(
      &state,
      "PUT",
      "/api/user/2",
      Some(&asha),
      Some(json!({ "name": "Hacked" })),
    )
    .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let ok = send(
      &state,
      "PUT",
      "/api/user/1",
      Some(&asha),
      Some(json!({ "classInfo": "Class 9B" })),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_json(ok).await["classInfo"], "Class 9B");
  }

  // ── Complaints ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn complaint_requires_resolved_school_id() {
    let state = make_state();
    let cookie = register_student(&state, "asha", "Mysuru", None).await;

    let response = send(
      &state,
      "POST",
      "/api/complaints",
      Some(&cookie),
      Some(json!({
        "title": "t", "description": "d", "category": "Infrastructure",
      })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn complaint_creation_fills_server_side_fields() {
    let state = make_state();
    let cookie = register_student(&state, "asha", "Mysuru", Some(1)).await;

    let complaint = file_complaint(&state, &cookie, "Infrastructure").await;
    assert_eq!(complaint["status"], "pending");
    assert_eq!(complaint["district"], "Mysuru");
    assert_eq!(complaint["schoolId"], 1);
    assert!(
      complaint["tokenId"].as_str().unwrap().starts_with("KA"),
      "tokenId: {}",
      complaint["tokenId"]
    );
    // The disabled AI client still leaves its canned analysis behind.
    assert_eq!(complaint["aiAnalysis"]["summary"], "AI analysis unavailable");
  }

  #[tokio::test]
  async fn only_students_may_file_complaints() {
    let state = make_state();
    let (_, cookie, _) = register(
      &state,
      json!({
        "username": "ghs", "password": "secret", "email": "ghs@example.com",
        "name": "GHS Admin", "userType": "school",
        "schoolName": "GHS Mysuru", "district": "Mysuru",
      }),
    )
    .await;

    let response = send(
      &state,
      "POST",
      "/api/complaints",
      Some(&cookie),
      Some(json!({
        "title": "t", "description": "d", "category": "Others",
      })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
  }

  #[tokio::test]
  async fn students_see_only_their_own_complaints() {
    let state = make_state();
    let asha = register_student(&state, "asha", "Mysuru", Some(1)).await;
    let ravi = register_student(&state, "ravi", "Hassan", Some(2)).await;

    file_complaint(&state, &asha, "Infrastructure").await;
    file_complaint(&state, &asha, "Transportation").await;
    file_complaint(&state, &ravi, "Mid-day Meal").await;

    let listed = body_json(
      send(&state, "GET", "/api/complaints", Some(&asha), None).await,
    )
    .await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|c| c["userId"] == 1));
  }

  #[tokio::test]
  async fn school_admins_see_their_school_only() {
    let state = make_state();
    let asha = register_student(&state, "asha", "Mysuru", Some(1)).await;
    let ravi = register_student(&state, "ravi", "Mysuru", Some(2)).await;
    file_complaint(&state, &asha, "Infrastructure").await;
    file_complaint(&state, &ravi, "Others").await;

    // School admin for school 1 (store-level shortcut to pin the id).
    let (_, cookie, user) = register(
      &state,
      json!({
        "username": "ghs", "password": "secret", "email": "ghs@example.com",
        "name": "GHS Admin", "userType": "school",
        "schoolName": "GHS Mysuru", "district": "Mysuru",
      }),
    )
    .await;
    // Point the admin at school 1 regardless of the auto-created row.
    let user_id = user["id"].as_i64().unwrap();
    let me = send(
      &state,
      "PUT",
      &format!("/api/user/{user_id}"),
      Some(&cookie),
      Some(json!({ "schoolId": 1 })),
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);

    let listed = body_json(
      send(&state, "GET", "/api/complaints", Some(&cookie), None).await,
    )
    .await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["schoolId"], 1);
  }

  #[tokio::test]
  async fn authority_sees_district_or_union() {
    let state = make_state();
    let asha = register_student(&state, "asha", "Mysuru", Some(1)).await;
    let ravi = register_student(&state, "ravi", "Hassan", Some(2)).await;
    file_complaint(&state, &asha, "Infrastructure").await;
    file_complaint(&state, &ravi, "Others").await;

    let (_, deo, _) = register(
      &state,
      json!({
        "username": "deo", "password": "secret", "email": "deo@example.com",
        "name": "DEO", "userType": "authority", "district": "Mysuru",
      }),
    )
    .await;

    let one = body_json(
      send(&state, "GET", "/api/complaints?district=Mysuru", Some(&deo), None)
        .await,
    )
    .await;
    assert_eq!(one.as_array().unwrap().len(), 1);

    let all = body_json(
      send(&state, "GET", "/api/complaints", Some(&deo), None).await,
    )
    .await;
    assert_eq!(all.as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn complaint_detail_respects_scope() {
    let state = make_state();
    let asha = register_student(&state, "asha", "Mysuru", Some(1)).await;
    let ravi = register_student(&state, "ravi", "Hassan", Some(2)).await;
    let complaint = file_complaint(&state, &asha, "Infrastructure").await;
    let id = complaint["id"].as_i64().unwrap();

    let own = send(
      &state,
      "GET",
      &format!("/api/complaints/{id}"),
      Some(&asha),
      None,
    )
    .await;
    assert_eq!(own.status(), StatusCode::OK);

    let other = send(
      &state,
      "GET",
      &format!("/api/complaints/{id}"),
      Some(&ravi),
      None,
    )
    .await;
    assert_eq!(other.status(), StatusCode::FORBIDDEN);

    // Authority may view anything, even outside their own district.
    let (_, deo, _) = register(
      &state,
      json!({
        "username": "deo", "password": "secret", "email": "deo@example.com",
        "name": "DEO", "userType": "authority", "district": "Hassan",
      }),
    )
    .await;
    let any = send(
      &state,
      "GET",
      &format!("/api/complaints/{id}"),
      Some(&deo),
      None,
    )
    .await;
    assert_eq!(any.status(), StatusCode::OK);

    let missing = send(&state, "GET", "/api/complaints/999", Some(&asha), None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn every_status_value_is_accepted_and_unknown_is_rejected() {
    let state = make_state();
    let asha = register_student(&state, "asha", "Mysuru", Some(1)).await;
    let complaint = file_complaint(&state, &asha, "Infrastructure").await;
    let id = complaint["id"].as_i64().unwrap();

    for status in ["in_progress", "resolved", "rejected", "under_review", "pending"] {
      let response = send(
        &state,
        "PUT",
        &format!("/api/complaints/{id}/status"),
        Some(&asha),
        Some(json!({ "status": status })),
      )
      .await;
      assert_eq!(response.status(), StatusCode::OK, "status {status}");
      assert_eq!(body_json(response).await["status"], status);
    }

    let bad = send(
      &state,
      "PUT",
      &format!("/api/complaints/{id}/status"),
      Some(&asha),
      Some(json!({ "status": "escalated" })),
    )
    .await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn complaint_responses_round_trip() {
    let state = make_state();
    let asha = register_student(&state, "asha", "Mysuru", Some(1)).await;
    let complaint = file_complaint(&state, &asha, "Infrastructure").await;
    let id = complaint["id"].as_i64().unwrap();

    let created = send(
      &state,
      "POST",
      &format!("/api/complaints/{id}/responses"),
      Some(&asha),
      Some(json!({ "response": "Any update on this?" })),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let listed = body_json(
      send(
        &state,
        "GET",
        &format!("/api/complaints/{id}/responses"),
        Some(&asha),
        None,
      )
      .await,
    )
    .await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["response"], "Any update on this?");
    assert_eq!(listed[0]["userType"], "student");
  }

  // ── District stats ────────────────────────────────────────────────────

  #[tokio::test]
  async fn district_stats_are_public_and_follow_mutations() {
    let state = make_state();

    let all = send(&state, "GET", "/api/districts/stats", None, None).await;
    assert_eq!(all.status(), StatusCode::OK);
    assert_eq!(body_json(all).await.as_array().unwrap().len(), 10);

    let asha = register_student(&state, "asha", "Mysuru", Some(1)).await;
    let complaint = file_complaint(&state, &asha, "Infrastructure").await;
    let id = complaint["id"].as_i64().unwrap();
    send(
      &state,
      "PUT",
      &format!("/api/complaints/{id}/status"),
      Some(&asha),
      Some(json!({ "status": "resolved" })),
    )
    .await;

    let mysuru = body_json(
      send(&state, "GET", "/api/districts/Mysuru/stats", None, None).await,
    )
    .await;
    assert_eq!(mysuru["totalComplaints"], 1);
    assert_eq!(mysuru["resolvedComplaints"], 1);
    assert_eq!(mysuru["pendingComplaints"], 0);
    assert_eq!(mysuru["topCategories"][0]["category"], "Infrastructure");

    let missing = send(&state, "GET", "/api/districts/Kodagu/stats", None, None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn district_insights_fall_back_without_a_model() {
    let state = make_state();
    let response =
      send(&state, "GET", "/api/districts/Mysuru/insights", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["district"], "Mysuru");
    assert!(
      body["insights"].as_str().unwrap().contains("Unable to generate"),
      "insights: {}",
      body["insights"]
    );
  }

  // ── Metadata and translation ──────────────────────────────────────────

  #[tokio::test]
  async fn metadata_lists_the_fixed_vocabularies() {
    let state = make_state();
    let body =
      body_json(send(&state, "GET", "/api/metadata", None, None).await).await;
    assert_eq!(body["districts"].as_array().unwrap().len(), 30);
    assert_eq!(body["complaintCategories"].as_array().unwrap().len(), 8);
    assert_eq!(body["expertiseAreas"].as_array().unwrap().len(), 10);
    assert_eq!(body["complaintStatus"].as_array().unwrap().len(), 5);
  }

  #[tokio::test]
  async fn translate_returns_input_when_disabled() {
    let state = make_state();
    let body = body_json(
      send(
        &state,
        "POST",
        "/api/translate",
        None,
        Some(json!({ "text": "ನಮಸ್ಕಾರ", "target": "en" })),
      )
      .await,
    )
    .await;
    assert_eq!(body["translated"], "ನಮಸ್ಕಾರ");
  }

  // ── Alumni and connections ────────────────────────────────────────────

  async fn make_alumnus(state: &AppState<MemStore>, username: &str) -> (String, i64) {
    let cookie = register_student(state, username, "Mysuru", Some(1)).await;
    let created = send(
      state,
      "POST",
      "/api/alumni",
      Some(&cookie),
      Some(json!({
        "schoolId": 1,
        "graduationYear": 2015,
        "currentOccupation": "Engineer",
        "expertiseAreas": ["Technology"],
      })),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = body_json(created).await["id"].as_i64().unwrap();
    (cookie, id)
  }

  #[tokio::test]
  async fn alumni_list_is_scoped_to_a_school() {
    let state = make_state();
    let (_, _) = make_alumnus(&state, "kiran").await;

    let viewer = register_student(&state, "asha", "Mysuru", Some(1)).await;
    let with_school = body_json(
      send(&state, "GET", "/api/alumni?schoolId=1", Some(&viewer), None).await,
    )
    .await;
    assert_eq!(with_school.as_array().unwrap().len(), 1);

    let without = body_json(
      send(&state, "GET", "/api/alumni", Some(&viewer), None).await,
    )
    .await;
    assert!(without.as_array().unwrap().is_empty());

    let missing = send(&state, "GET", "/api/alumni/99", Some(&viewer), None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn connection_thread_is_private_to_its_participants() {
    let state = make_state();
    let (mentor_cookie, mentor_alumni_id) = make_alumnus(&state, "kiran").await;
    let (outsider_cookie, _) = make_alumnus(&state, "vijay").await;
    let student = register_student(&state, "asha", "Mysuru", Some(1)).await;

    let created = send(
      &state,
      "POST",
      "/api/connections",
      Some(&student),
      Some(json!({
        "alumniId": mentor_alumni_id,
        "questionTitle": "Engineering entrance",
        "questionDetails": "How should I prepare?",
        "category": "Higher Education",
      })),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let connection = body_json(created).await;
    assert_eq!(connection["status"], "pending");
    let id = connection["id"].as_i64().unwrap();

    // The addressed alumnus may reply; another alumnus may not.
    let reply = send(
      &state,
      "POST",
      &format!("/api/connections/{id}/responses"),
      Some(&mentor_cookie),
      Some(json!({ "response": "Start with the NCERT syllabus" })),
    )
    .await;
    assert_eq!(reply.status(), StatusCode::CREATED);

    let outsider_reply = send(
      &state,
      "POST",
      &format!("/api/connections/{id}/responses"),
      Some(&outsider_cookie),
      Some(json!({ "response": "butting in" })),
    )
    .await;
    assert_eq!(outsider_reply.status(), StatusCode::FORBIDDEN);

    // The student sees the thread; the outsider cannot view it either.
    let listed = body_json(
      send(
        &state,
        "GET",
        &format!("/api/connections/{id}/responses"),
        Some(&student),
        None,
      )
      .await,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let denied = send(
      &state,
      "GET",
      &format!("/api/connections/{id}"),
      Some(&outsider_cookie),
      None,
    )
    .await;
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
  }

  #[tokio::test]
  async fn connection_listing_follows_role() {
    let state = make_state();
    let (mentor_cookie, mentor_alumni_id) = make_alumnus(&state, "kiran").await;
    let student = register_student(&state, "asha", "Mysuru", Some(1)).await;

    send(
      &state,
      "POST",
      "/api/connections",
      Some(&student),
      Some(json!({
        "alumniId": mentor_alumni_id,
        "questionTitle": "t",
        "questionDetails": "d",
        "category": "Technology",
      })),
    )
    .await;

    let mine = body_json(
      send(&state, "GET", "/api/connections", Some(&student), None).await,
    )
    .await;
    assert_eq!(mine.as_array().unwrap().len(), 1);

    // The mentor's account is student-typed, so their own listing goes by
    // student id and comes back empty.
    let mentors = body_json(
      send(&state, "GET", "/api/connections", Some(&mentor_cookie), None).await,
    )
    .await;
    assert_eq!(mentors.as_array().unwrap().len(), 0);
  }
}
