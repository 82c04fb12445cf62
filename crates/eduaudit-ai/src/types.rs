//! Payloads returned by the AI operations, each with its canned fallback.
//!
//! Fields carry `#[serde(default)]` liberally — model output is best-effort
//! and a missing key must not turn into a hard failure.

use serde::{Deserialize, Serialize};

/// Triage analysis of a filed complaint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintAnalysis {
  #[serde(default)]
  pub priority:            String,
  #[serde(default)]
  pub suggested_category:  String,
  #[serde(default)]
  pub sentiment:           String,
  #[serde(default)]
  pub key_issues:          Vec<String>,
  #[serde(default)]
  pub recommended_actions: Vec<String>,
  #[serde(default)]
  pub summary:             String,
}

impl ComplaintAnalysis {
  /// Returned when the hosted model is unreachable or unconfigured.
  pub fn fallback(category: &str) -> Self {
    Self {
      priority:            "medium".to_string(),
      suggested_category:  category.to_string(),
      sentiment:           "neutral".to_string(),
      key_issues:          vec!["Could not analyze with AI".to_string()],
      recommended_actions: vec!["Manual review required".to_string()],
      summary:             "AI analysis unavailable".to_string(),
    }
  }
}

/// Mentorship-matching recommendation for a student question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlumniMatches {
  /// Alumni ids best suited to answer, up to 3.
  #[serde(default)]
  pub suggested_alumni:            Vec<i64>,
  /// Object mapping alumni ids to 0-100 relevance scores. Left untyped:
  /// the model is free-form here and the value is stored, not interpreted.
  #[serde(default)]
  pub relevance_scores:            serde_json::Value,
  #[serde(default)]
  pub recommended_expertise_areas: Vec<String>,
  #[serde(default)]
  pub query_classification:        String,
}

impl AlumniMatches {
  pub fn fallback(category: &str) -> Self {
    Self {
      suggested_alumni:            Vec::new(),
      relevance_scores:            serde_json::json!({}),
      recommended_expertise_areas: vec![category.to_string()],
      query_classification:        category.to_string(),
    }
  }
}

/// Translation direction for [`translate`](crate::AiServices::translate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
  /// Kannada source, English output.
  En,
  /// English source, Kannada output.
  Kn,
}
