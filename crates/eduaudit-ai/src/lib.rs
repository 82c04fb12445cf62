//! Hosted-LLM helpers for EduAudit: complaint triage, alumni matching,
//! district insights, and English/Kannada translation.
//!
//! Every public operation is infallible: any transport, API, or parse
//! failure is logged and replaced with a canned fallback payload, and
//! a client built without an API key short-circuits to the fallbacks without
//! touching the network. The model's output is stored as received — there is
//! no server-side re-validation of what it claims.

mod error;
mod types;

#[cfg(test)]
mod tests;

use std::time::Duration;

use eduaudit_core::{alumni::Alumni, district::DistrictStats};
use serde::{Deserialize, Serialize};

pub use error::{AiError, Result};
pub use types::{AlumniMatches, ComplaintAnalysis, TargetLanguage};

/// Default chat-completions endpoint prefix.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const OPENAI_MODEL: &str = "gpt-4o";

// ─── Configuration ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AiConfig {
  /// Bearer token; `None` disables all network calls.
  pub api_key:  Option<String>,
  /// Overridable so tests can point at a local mock server.
  pub base_url: String,
  pub model:    String,
}

impl Default for AiConfig {
  fn default() -> Self {
    Self {
      api_key:  None,
      base_url: OPENAI_BASE_URL.to_string(),
      model:    OPENAI_MODEL.to_string(),
    }
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// A thin chat-completions client with canned fallbacks.
pub struct AiServices {
  config: AiConfig,
  client: reqwest::Client,
}

impl AiServices {
  /// Build a client.
  ///
  /// # Panics
  ///
  /// Panics if the HTTP client cannot be created (should never happen with
  /// default TLS).
  #[must_use]
  pub fn new(config: AiConfig) -> Self {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .expect("failed to create HTTP client");
    Self { config, client }
  }

  /// A client with no API key: every operation returns its fallback.
  #[must_use]
  pub fn disabled() -> Self {
    Self::new(AiConfig::default())
  }

  // ── Operations ────────────────────────────────────────────────────────

  /// Triage a complaint: priority, sentiment, key issues, suggested actions.
  pub async fn analyze_complaint(
    &self,
    title: &str,
    description: &str,
    category: &str,
  ) -> ComplaintAnalysis {
    let prompt = format!(
      "You are an AI assistant for Karnataka's education department. \
       Analyze this educational complaint:\n\n\
       Title: {title}\nDescription: {description}\nCategory: {category}\n\n\
       Provide the following analysis in JSON format:\n\
       1. priority: high, medium, or low, based on urgency and impact\n\
       2. suggestedCategory: the most appropriate category (keep the \
       original if correct)\n\
       3. sentiment: negative, neutral, or positive\n\
       4. keyIssues: up to 3 key issues identified\n\
       5. recommendedActions: up to 3 recommended actions for Karnataka \
       education officials\n\
       6. summary: a brief one-sentence summary\n\n\
       Format the response as valid JSON."
    );

    match self.chat_json(&prompt).await {
      Ok(value) => serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "complaint analysis did not parse; using fallback");
        ComplaintAnalysis::fallback(category)
      }),
      Err(e) => {
        tracing::warn!(error = %e, "complaint analysis failed; using fallback");
        ComplaintAnalysis::fallback(category)
      }
    }
  }

  /// Rank `candidates` by suitability for a student's question.
  pub async fn match_alumni(
    &self,
    question_title: &str,
    question_details: &str,
    category: &str,
    candidates: &[Alumni],
  ) -> AlumniMatches {
    let roster = candidates
      .iter()
      .map(|a| {
        format!(
          "Alumni ID: {}, Expertise: {}, Occupation: {}",
          a.id,
          a.expertise_areas.join(", "),
          a.current_occupation
        )
      })
      .collect::<Vec<_>>()
      .join("\n");

    let prompt = format!(
      "You are an AI assistant for Karnataka's education system. Match this \
       student question with appropriate alumni:\n\n\
       Question Title: {question_title}\n\
       Question Details: {question_details}\nCategory: {category}\n\n\
       Available Alumni:\n{roster}\n\n\
       Based on the question content and alumni expertise, provide the \
       following in JSON format:\n\
       1. suggestedAlumni: an array of up to 3 best-suited alumni IDs\n\
       2. relevanceScores: an object mapping alumni IDs to 0-100 scores\n\
       3. recommendedExpertiseAreas: most relevant expertise areas\n\
       4. queryClassification: what this question is about\n\n\
       Format the response as valid JSON."
    );

    match self.chat_json(&prompt).await {
      Ok(value) => serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "alumni matching did not parse; using fallback");
        AlumniMatches::fallback(category)
      }),
      Err(e) => {
        tracing::warn!(error = %e, "alumni matching failed; using fallback");
        AlumniMatches::fallback(category)
      }
    }
  }

  /// Generate a short insights paragraph for a district's statistics.
  pub async fn district_insights(&self, stats: &DistrictStats) -> String {
    let prompt = format!(
      "You are an AI education advisor for Karnataka state in India. \
       Generate insights for this district's education data:\n\n\
       District Name: {}\n\nStatistics:\n\
       - Total Schools: {}\n- Total Complaints: {}\n\
       - Resolved Complaints: {}\n- Pending Complaints: {}\n\
       - Average Resolution Time: {} days\n- Top Categories: {}\n\n\
       Provide a concise paragraph (3-5 sentences) with actionable insights \
       about the district's performance, areas of concern based on complaint \
       categories, and specific recommendations for improvement.",
      stats.district,
      stats.total_schools,
      stats.total_complaints,
      stats.resolved_complaints,
      stats.pending_complaints,
      stats.avg_resolution_time,
      serde_json::to_string(&stats.top_categories).unwrap_or_default(),
    );

    match self.chat_text(&prompt).await {
      Ok(text) => text,
      Err(e) => {
        tracing::warn!(error = %e, district = %stats.district, "insights failed; using fallback");
        "Unable to generate insights at this time. Please try again later."
          .to_string()
      }
    }
  }

  /// Translate between English and Kannada. Returns the input unchanged on
  /// any failure.
  pub async fn translate(&self, text: &str, target: TargetLanguage) -> String {
    let direction = match target {
      TargetLanguage::En => "Kannada to English",
      TargetLanguage::Kn => "English to Kannada",
    };
    let prompt = format!(
      "Translate the following text from {direction}:\n\nText: {text}\n\n\
       Provide only the translated text, with no additional commentary."
    );

    match self.chat_text(&prompt).await {
      Ok(translated) => translated,
      Err(e) => {
        tracing::warn!(error = %e, "translation failed; returning input");
        text.to_string()
      }
    }
  }

  // ── Transport ─────────────────────────────────────────────────────────

  /// One-shot chat completion in JSON mode, parsed into a `Value`.
  async fn chat_json(&self, prompt: &str) -> Result<serde_json::Value> {
    let content = self.complete(prompt, true).await?;
    Ok(serde_json::from_str(&content)?)
  }

  /// One-shot chat completion returning the raw assistant text.
  async fn chat_text(&self, prompt: &str) -> Result<String> {
    self.complete(prompt, false).await
  }

  async fn complete(&self, prompt: &str, json_mode: bool) -> Result<String> {
    let api_key = self.config.api_key.as_deref().ok_or(AiError::NoApiKey)?;

    let request = ChatRequest {
      model:           &self.config.model,
      messages:        vec![ChatMessage { role: "user", content: prompt }],
      response_format: json_mode.then_some(ResponseFormat { kind: "json_object" }),
    };

    let url = format!("{}/chat/completions", self.config.base_url);
    let response = self
      .client
      .post(&url)
      .bearer_auth(api_key)
      .json(&request)
      .send()
      .await?;

    let status = response.status();
    if !status.is_success() {
      return Err(AiError::Api {
        status: status.as_u16(),
        body:   response.text().await.unwrap_or_default(),
      });
    }

    let completion: ChatResponse = response.json().await?;
    completion
      .choices
      .into_iter()
      .next()
      .and_then(|c| c.message.content)
      .filter(|c| !c.is_empty())
      .ok_or(AiError::EmptyCompletion)
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
  model:    &'a str,
  messages: Vec<ChatMessage<'a>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
  role:    &'a str,
  content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
  #[serde(rename = "type")]
  kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
  choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
  message: Message,
}

#[derive(Deserialize)]
struct Message {
  content: Option<String>,
}
