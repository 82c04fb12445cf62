//! [`MemStore`] internals.

use std::{collections::BTreeMap, convert::Infallible, sync::Arc};

use chrono::Utc;
use parking_lot::RwLock;

use eduaudit_core::{
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
  store::GrievanceStore,
  user::{NewUser, User, UserUpdate},
};

use crate::stats;

/// Districts that receive a statistics row at startup. Complaints filed
/// against any other district are counted nowhere — the rollup update is a
/// silent no-op without a seeded row.
pub const SEED_DISTRICTS: &[&str] = &[
  "Bengaluru Urban",
  "Mysuru",
  "Dharwad",
  "Ballari",
  "Belagavi",
  "Dakshina Kannada",
  "Hassan",
  "Kalaburagi",
  "Mandya",
  "Shivamogga",
];

// ─── Store ───────────────────────────────────────────────────────────────────

/// An in-memory EduAudit store.
///
/// Cloning is cheap — the inner maps are reference-counted. Ordered maps keep
/// listing (and therefore category tie-breaking) in insertion order.
#[derive(Clone, Default)]
pub struct MemStore {
  inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
  users:               BTreeMap<i64, User>,
  schools:             BTreeMap<i64, School>,
  complaints:          BTreeMap<i64, Complaint>,
  complaint_responses: BTreeMap<i64, ComplaintResponse>,
  alumni:              BTreeMap<i64, Alumni>,
  connections:         BTreeMap<i64, AlumniConnection>,
  alumni_responses:    BTreeMap<i64, AlumniResponse>,
  district_stats:      BTreeMap<String, DistrictStats>,
  ids:                 IdCounters,
}

#[derive(Default)]
struct IdCounters {
  user:           i64,
  school:         i64,
  complaint:      i64,
  response:       i64,
  alumni:         i64,
  connection:     i64,
  alumni_response: i64,
  district_stats: i64,
}

fn next(counter: &mut i64) -> i64 {
  *counter += 1;
  *counter
}

impl MemStore {
  /// An empty store with no districts seeded.
  pub fn new() -> Self {
    Self::default()
  }

  /// A store with [`SEED_DISTRICTS`] seeded, each holding a deterministic
  /// school count and zeroed complaint counters.
  pub fn seeded() -> Self {
    let store = Self::new();
    for (i, district) in SEED_DISTRICTS.iter().enumerate() {
      store.seed_district(district, 50 + 5 * i as i64);
    }
    store
  }

  /// Insert a zeroed statistics row for `district`. Replaces any existing
  /// row for the same district.
  pub fn seed_district(&self, district: &str, total_schools: i64) {
    let mut inner = self.inner.write();
    let id = next(&mut inner.ids.district_stats);
    inner.district_stats.insert(district.to_string(), DistrictStats {
      id,
      district: district.to_string(),
      total_schools,
      total_complaints: 0,
      resolved_complaints: 0,
      pending_complaints: 0,
      avg_resolution_time: 0,
      top_categories: Vec::new(),
      updated_at: Utc::now(),
    });
  }
}

/// Recompute the rollup for `district` from the complaints currently tagged
/// with it. Skipped silently when the district has no seeded stats row.
fn recompute_district_stats(inner: &mut Inner, district: &str) {
  let rollup =
    stats::rollup(inner.complaints.values().filter(|c| c.district == district));

  let Some(row) = inner.district_stats.get_mut(district) else {
    tracing::debug!(%district, "no stats row seeded; skipping rollup");
    return;
  };

  row.total_complaints = rollup.total;
  row.resolved_complaints = rollup.resolved;
  row.pending_complaints = rollup.pending;
  row.avg_resolution_time = rollup.avg_days;
  row.top_categories = rollup.top_categories;
  row.updated_at = Utc::now();
}

// ─── Trait implementation ────────────────────────────────────────────────────

impl GrievanceStore for MemStore {
  type Error = Infallible;

  // ── Users ─────────────────────────────────────────────────────────────

  async fn get_user(&self, id: i64) -> Result<Option<User>, Infallible> {
    Ok(self.inner.read().users.get(&id).cloned())
  }

  async fn get_user_by_username<'a>(
    &'a self,
    username: &'a str,
  ) -> Result<Option<User>, Infallible> {
    let inner = self.inner.read();
    Ok(inner.users.values().find(|u| u.username == username).cloned())
  }

  async fn get_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> Result<Option<User>, Infallible> {
    let inner = self.inner.read();
    Ok(inner.users.values().find(|u| u.email == email).cloned())
  }

  async fn create_user(&self, input: NewUser) -> Result<User, Infallible> {
    let mut inner = self.inner.write();
    let id = next(&mut inner.ids.user);
    let user = User {
      id,
      username: input.username,
      password_hash: input.password,
      email: input.email,
      name: input.name,
      user_type: input.user_type,
      district: input.district,
      school_id: input.school_id,
      school_name: input.school_name,
      class_info: input.class_info,
      designation: input.designation,
      phone_number: input.phone_number,
      profile_picture: input.profile_picture,
      created_at: Utc::now(),
    };
    inner.users.insert(id, user.clone());
    Ok(user)
  }

  async fn update_user(
    &self,
    id: i64,
    update: UserUpdate,
  ) -> Result<Option<User>, Infallible> {
    let mut inner = self.inner.write();
    let Some(user) = inner.users.get_mut(&id) else {
      return Ok(None);
    };
    if let Some(email) = update.email {
      user.email = email;
    }
    if let Some(name) = update.name {
      user.name = name;
    }
    if let Some(district) = update.district {
      user.district = Some(district);
    }
    if let Some(school_id) = update.school_id {
      user.school_id = Some(school_id);
    }
    if let Some(school_name) = update.school_name {
      user.school_name = Some(school_name);
    }
    if let Some(class_info) = update.class_info {
      user.class_info = Some(class_info);
    }
    if let Some(designation) = update.designation {
      user.designation = Some(designation);
    }
    if let Some(phone_number) = update.phone_number {
      user.phone_number = Some(phone_number);
    }
    if let Some(profile_picture) = update.profile_picture {
      user.profile_picture = Some(profile_picture);
    }
    Ok(Some(user.clone()))
  }

  // ── Schools ───────────────────────────────────────────────────────────

  async fn get_school(&self, id: i64) -> Result<Option<School>, Infallible> {
    Ok(self.inner.read().schools.get(&id).cloned())
  }

  async fn list_schools_by_district<'a>(
    &'a self,
    district: &'a str,
  ) -> Result<Vec<School>, Infallible> {
    let inner = self.inner.read();
    Ok(
      inner
        .schools
        .values()
        .filter(|s| s.district == district)
        .cloned()
        .collect(),
    )
  }

  async fn create_school(&self, input: NewSchool) -> Result<School, Infallible> {
    let mut inner = self.inner.write();
    let id = next(&mut inner.ids.school);
    let school = School {
      id,
      name: input.name,
      district: input.district,
      address: input.address,
      pincode: input.pincode,
      category: input.category,
      admin_id: input.admin_id,
      contact_phone: input.contact_phone,
      contact_email: input.contact_email,
      created_at: Utc::now(),
    };
    inner.schools.insert(id, school.clone());
    Ok(school)
  }

  async fn update_school(
    &self,
    id: i64,
    update: SchoolUpdate,
  ) -> Result<Option<School>, Infallible> {
    let mut inner = self.inner.write();
    let Some(school) = inner.schools.get_mut(&id) else {
      return Ok(None);
    };
    if let Some(name) = update.name {
      school.name = name;
    }
    if let Some(district) = update.district {
      school.district = district;
    }
    if let Some(address) = update.address {
      school.address = address;
    }
    if let Some(pincode) = update.pincode {
      school.pincode = pincode;
    }
    if let Some(category) = update.category {
      school.category = category;
    }
    if let Some(admin_id) = update.admin_id {
      school.admin_id = Some(admin_id);
    }
    if let Some(contact_phone) = update.contact_phone {
      school.contact_phone = Some(contact_phone);
    }
    if let Some(contact_email) = update.contact_email {
      school.contact_email = Some(contact_email);
    }
    Ok(Some(school.clone()))
  }

  // ── Complaints ────────────────────────────────────────────────────────

  async fn get_complaint(&self, id: i64) -> Result<Option<Complaint>, Infallible> {
    Ok(self.inner.read().complaints.get(&id).cloned())
  }

  async fn list_complaints_by_user(
    &self,
    user_id: i64,
  ) -> Result<Vec<Complaint>, Infallible> {
    let inner = self.inner.read();
    Ok(
      inner
        .complaints
        .values()
        .filter(|c| c.user_id == user_id)
        .cloned()
        .collect(),
    )
  }

  async fn list_complaints_by_school(
    &self,
    school_id: i64,
  ) -> Result<Vec<Complaint>, Infallible> {
    let inner = self.inner.read();
    Ok(
      inner
        .complaints
        .values()
        .filter(|c| c.school_id == school_id)
        .cloned()
        .collect(),
    )
  }

  async fn list_complaints_by_district<'a>(
    &'a self,
    district: &'a str,
  ) -> Result<Vec<Complaint>, Infallible> {
    let inner = self.inner.read();
    Ok(
      inner
        .complaints
        .values()
        .filter(|c| c.district == district)
        .cloned()
        .collect(),
    )
  }

  async fn create_complaint(
    &self,
    input: NewComplaint,
  ) -> Result<Complaint, Infallible> {
    let mut inner = self.inner.write();
    let id = next(&mut inner.ids.complaint);
    let now = Utc::now();
    let complaint = Complaint {
      id,
      title: input.title,
      description: input.description,
      category: input.category,
      status: input.status,
      user_id: input.user_id,
      school_id: input.school_id,
      token_id: input.token_id,
      assigned_to_id: input.assigned_to_id,
      ai_analysis: input.ai_analysis,
      district: input.district,
      evidence: input.evidence,
      created_at: now,
      updated_at: now,
    };
    inner.complaints.insert(id, complaint.clone());
    recompute_district_stats(&mut inner, &complaint.district);
    Ok(complaint)
  }

  async fn update_complaint_status(
    &self,
    id: i64,
    status: ComplaintStatus,
  ) -> Result<Option<Complaint>, Infallible> {
    let mut inner = self.inner.write();
    let Some(complaint) = inner.complaints.get_mut(&id) else {
      return Ok(None);
    };
    complaint.status = status;
    complaint.updated_at = Utc::now();
    let updated = complaint.clone();
    recompute_district_stats(&mut inner, &updated.district);
    Ok(Some(updated))
  }

  // ── Complaint responses ───────────────────────────────────────────────

  async fn list_complaint_responses(
    &self,
    complaint_id: i64,
  ) -> Result<Vec<ComplaintResponse>, Infallible> {
    let inner = self.inner.read();
    Ok(
      inner
        .complaint_responses
        .values()
        .filter(|r| r.complaint_id == complaint_id)
        .cloned()
        .collect(),
    )
  }

  async fn add_complaint_response(
    &self,
    input: NewComplaintResponse,
  ) -> Result<ComplaintResponse, Infallible> {
    let mut inner = self.inner.write();
    let id = next(&mut inner.ids.response);
    let response = ComplaintResponse {
      id,
      complaint_id: input.complaint_id,
      user_id: input.user_id,
      user_type: input.user_type,
      response: input.response,
      attachments: input.attachments,
      created_at: Utc::now(),
    };
    inner.complaint_responses.insert(id, response.clone());
    Ok(response)
  }

  // ── Alumni ────────────────────────────────────────────────────────────

  async fn get_alumni(&self, id: i64) -> Result<Option<Alumni>, Infallible> {
    Ok(self.inner.read().alumni.get(&id).cloned())
  }

  async fn get_alumni_by_user(
    &self,
    user_id: i64,
  ) -> Result<Option<Alumni>, Infallible> {
    let inner = self.inner.read();
    Ok(inner.alumni.values().find(|a| a.user_id == user_id).cloned())
  }

  async fn list_alumni_by_school(
    &self,
    school_id: i64,
  ) -> Result<Vec<Alumni>, Infallible> {
    let inner = self.inner.read();
    Ok(
      inner
        .alumni
        .values()
        .filter(|a| a.school_id == school_id)
        .cloned()
        .collect(),
    )
  }

  async fn create_alumni(&self, input: NewAlumni) -> Result<Alumni, Infallible> {
    let mut inner = self.inner.write();
    let id = next(&mut inner.ids.alumni);
    let alumni = Alumni {
      id,
      user_id: input.user_id,
      school_id: input.school_id,
      graduation_year: input.graduation_year,
      current_occupation: input.current_occupation,
      organization: input.organization,
      expertise_areas: input.expertise_areas,
      bio: input.bio,
      available_for_mentoring: input.available_for_mentoring,
      created_at: Utc::now(),
    };
    inner.alumni.insert(id, alumni.clone());
    Ok(alumni)
  }

  async fn update_alumni(
    &self,
    id: i64,
    update: AlumniUpdate,
  ) -> Result<Option<Alumni>, Infallible> {
    let mut inner = self.inner.write();
    let Some(alumni) = inner.alumni.get_mut(&id) else {
      return Ok(None);
    };
    if let Some(graduation_year) = update.graduation_year {
      alumni.graduation_year = graduation_year;
    }
    if let Some(current_occupation) = update.current_occupation {
      alumni.current_occupation = current_occupation;
    }
    if let Some(organization) = update.organization {
      alumni.organization = Some(organization);
    }
    if let Some(expertise_areas) = update.expertise_areas {
      alumni.expertise_areas = expertise_areas;
    }
    if let Some(bio) = update.bio {
      alumni.bio = Some(bio);
    }
    if let Some(available) = update.available_for_mentoring {
      alumni.available_for_mentoring = available;
    }
    Ok(Some(alumni.clone()))
  }

  // ── Connections ───────────────────────────────────────────────────────

  async fn get_connection(
    &self,
    id: i64,
  ) -> Result<Option<AlumniConnection>, Infallible> {
    Ok(self.inner.read().connections.get(&id).cloned())
  }

  async fn list_connections_by_student(
    &self,
    student_id: i64,
  ) -> Result<Vec<AlumniConnection>, Infallible> {
    let inner = self.inner.read();
    Ok(
      inner
        .connections
        .values()
        .filter(|c| c.student_id == student_id)
        .cloned()
        .collect(),
    )
  }

  async fn list_connections_by_alumni(
    &self,
    alumni_id: i64,
  ) -> Result<Vec<AlumniConnection>, Infallible> {
    let inner = self.inner.read();
    Ok(
      inner
        .connections
        .values()
        .filter(|c| c.alumni_id == alumni_id)
        .cloned()
        .collect(),
    )
  }

  async fn create_connection(
    &self,
    input: NewAlumniConnection,
  ) -> Result<AlumniConnection, Infallible> {
    let mut inner = self.inner.write();
    let id = next(&mut inner.ids.connection);
    let connection = AlumniConnection {
      id,
      student_id: input.student_id,
      alumni_id: input.alumni_id,
      question_title: input.question_title,
      question_details: input.question_details,
      category: input.category,
      is_public: input.is_public,
      status: input.status,
      ai_recommendation: input.ai_recommendation,
      created_at: Utc::now(),
    };
    inner.connections.insert(id, connection.clone());
    Ok(connection)
  }

  async fn update_connection_status<'a>(
    &'a self,
    id: i64,
    status: &'a str,
  ) -> Result<Option<AlumniConnection>, Infallible> {
    let mut inner = self.inner.write();
    let Some(connection) = inner.connections.get_mut(&id) else {
      return Ok(None);
    };
    connection.status = status.to_string();
    Ok(Some(connection.clone()))
  }

  // ── Alumni responses ──────────────────────────────────────────────────

  async fn list_alumni_responses(
    &self,
    connection_id: i64,
  ) -> Result<Vec<AlumniResponse>, Infallible> {
    let inner = self.inner.read();
    Ok(
      inner
        .alumni_responses
        .values()
        .filter(|r| r.connection_id == connection_id)
        .cloned()
        .collect(),
    )
  }

  async fn add_alumni_response(
    &self,
    input: NewAlumniResponse,
  ) -> Result<AlumniResponse, Infallible> {
    let mut inner = self.inner.write();
    let id = next(&mut inner.ids.alumni_response);
    let response = AlumniResponse {
      id,
      connection_id: input.connection_id,
      response: input.response,
      created_at: Utc::now(),
    };
    inner.alumni_responses.insert(id, response.clone());
    Ok(response)
  }

  // ── District statistics ───────────────────────────────────────────────

  async fn get_district_stats<'a>(
    &'a self,
    district: &'a str,
  ) -> Result<Option<DistrictStats>, Infallible> {
    Ok(self.inner.read().district_stats.get(district).cloned())
  }

  async fn all_district_stats(&self) -> Result<Vec<DistrictStats>, Infallible> {
    Ok(self.inner.read().district_stats.values().cloned().collect())
  }

  async fn update_district_stats<'a>(
    &'a self,
    district: &'a str,
    update: DistrictStatsUpdate,
  ) -> Result<Option<DistrictStats>, Infallible> {
    let mut inner = self.inner.write();
    let Some(row) = inner.district_stats.get_mut(district) else {
      return Ok(None);
    };
    if let Some(total_schools) = update.total_schools {
      row.total_schools = total_schools;
    }
    if let Some(total_complaints) = update.total_complaints {
      row.total_complaints = total_complaints;
    }
    if let Some(resolved) = update.resolved_complaints {
      row.resolved_complaints = resolved;
    }
    if let Some(pending) = update.pending_complaints {
      row.pending_complaints = pending;
    }
    if let Some(avg) = update.avg_resolution_time {
      row.avg_resolution_time = avg;
    }
    if let Some(top_categories) = update.top_categories {
      row.top_categories = top_categories;
    }
    row.updated_at = Utc::now();
    Ok(Some(row.clone()))
  }
}
