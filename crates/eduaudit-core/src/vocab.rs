//! Fixed vocabularies served by `/api/metadata` and used for validation.

/// The 30 districts of Karnataka.
pub const KARNATAKA_DISTRICTS: &[&str] = &[
  "Bagalkot",
  "Ballari",
  "Belagavi",
  "Bengaluru Rural",
  "Bengaluru Urban",
  "Bidar",
  "Chamarajanagar",
  "Chikballapur",
  "Chikkamagaluru",
  "Chitradurga",
  "Dakshina Kannada",
  "Davanagere",
  "Dharwad",
  "Gadag",
  "Hassan",
  "Haveri",
  "Kalaburagi",
  "Kodagu",
  "Kolar",
  "Koppal",
  "Mandya",
  "Mysuru",
  "Raichur",
  "Ramanagara",
  "Shivamogga",
  "Tumakuru",
  "Udupi",
  "Uttara Kannada",
  "Vijayapura",
  "Yadgir",
];

/// Complaint categories offered on the submission form.
pub const COMPLAINT_CATEGORIES: &[&str] = &[
  "Infrastructure",
  "Teaching Staff",
  "Basic Amenities",
  "Educational Materials",
  "Administrative Issues",
  "Transportation",
  "Mid-day Meal",
  "Others",
];

/// Expertise areas an alumni profile can advertise.
pub const ALUMNI_EXPERTISE_AREAS: &[&str] = &[
  "Career Guidance",
  "Higher Education",
  "Technology",
  "Medicine",
  "Engineering",
  "Arts & Humanities",
  "Government Services",
  "Entrepreneurship",
  "Science",
  "Sports",
];
