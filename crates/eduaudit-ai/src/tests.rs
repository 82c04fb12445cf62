//! Tests for the chat-completions client against a local mock server.

use serde_json::json;
use wiremock::{
  Mock, MockServer, ResponseTemplate,
  matchers::{header_exists, method, path},
};

use crate::{AiConfig, AiServices, TargetLanguage};

fn client_for(server: &MockServer) -> AiServices {
  AiServices::new(AiConfig {
    api_key:  Some("test-key".to_string()),
    base_url: server.uri(),
    model:    "gpt-4o".to_string(),
  })
}

fn completion_body(content: &str) -> serde_json::Value {
  json!({
    "choices": [{ "message": { "role": "assistant", "content": content } }]
  })
}

#[tokio::test]
async fn analysis_parses_model_output() {
  let server = MockServer::start().await;
  let analysis = json!({
    "priority": "high",
    "suggestedCategory": "Infrastructure",
    "sentiment": "negative",
    "keyIssues": ["Roof damage"],
    "recommendedActions": ["Request school inspection"],
    "summary": "Roof leak endangers a classroom."
  });
  Mock::given(method("POST"))
    .and(path("/chat/completions"))
    .and(header_exists("authorization"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(completion_body(&analysis.to_string())),
    )
    .mount(&server)
    .await;

  let result = client_for(&server)
    .analyze_complaint("Leaking roof", "Classroom 4 floods", "Infrastructure")
    .await;

  assert_eq!(result.priority, "high");
  assert_eq!(result.key_issues, vec!["Roof damage"]);
  assert_eq!(result.summary, "Roof leak endangers a classroom.");
}

#[tokio::test]
async fn analysis_tolerates_partial_model_output() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/chat/completions"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(completion_body(r#"{"priority":"low"}"#)),
    )
    .mount(&server)
    .await;

  let result = client_for(&server)
    .analyze_complaint("t", "d", "Others")
    .await;

  // Missing keys default rather than trip the fallback.
  assert_eq!(result.priority, "low");
  assert!(result.key_issues.is_empty());
}

#[tokio::test]
async fn api_failure_yields_canned_fallback() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/chat/completions"))
    .respond_with(ResponseTemplate::new(500))
    .mount(&server)
    .await;

  let result = client_for(&server)
    .analyze_complaint("t", "d", "Mid-day Meal")
    .await;

  assert_eq!(result.priority, "medium");
  assert_eq!(result.suggested_category, "Mid-day Meal");
  assert_eq!(result.summary, "AI analysis unavailable");
}

#[tokio::test]
async fn garbage_completion_yields_canned_fallback() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/chat/completions"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(completion_body("not json at all")),
    )
    .mount(&server)
    .await;

  let result = client_for(&server).analyze_complaint("t", "d", "Others").await;
  assert_eq!(result.summary, "AI analysis unavailable");
}

#[tokio::test]
async fn disabled_client_never_touches_the_network() {
  let result = AiServices::disabled()
    .analyze_complaint("t", "d", "Transportation")
    .await;
  assert_eq!(result.suggested_category, "Transportation");

  let matches = AiServices::disabled().match_alumni("t", "d", "Science", &[]).await;
  assert!(matches.suggested_alumni.is_empty());
  assert_eq!(matches.query_classification, "Science");

  let text = AiServices::disabled()
    .translate("ನಮಸ್ಕಾರ", TargetLanguage::En)
    .await;
  assert_eq!(text, "ನಮಸ್ಕಾರ");
}

#[tokio::test]
async fn translation_returns_assistant_text() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/chat/completions"))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(completion_body("Hello")),
    )
    .mount(&server)
    .await;

  let text = client_for(&server).translate("ನಮಸ್ಕಾರ", TargetLanguage::En).await;
  assert_eq!(text, "Hello");
}
