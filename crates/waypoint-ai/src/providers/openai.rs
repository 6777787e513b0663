//! OpenAI Chat Completions API provider (non-streaming)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    providers::LlmProvider,
    types::{ChatMessage, CompletionOptions, ResponseFormat},
};

/// Default base URL for the OpenAI API
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI API client
pub struct OpenAIProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the provider at an OpenAI-compatible server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request<'a>(
        &self,
        model: &'a str,
        messages: &'a [ChatMessage],
        options: &CompletionOptions,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            stream: false,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            response_format: match options.response_format {
                ResponseFormat::Text => None,
                ResponseFormat::JsonObject => Some(WireResponseFormat {
                    format_type: "json_object",
                }),
            },
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String> {
        let request = self.build_request(model, messages, options);
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!("OpenAI API URL: {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let text = response.text().await.unwrap_or_default();
            return Err(error_from_status(status.as_u16(), retry_after, &text));
        }

        let body: ChatCompletionResponse = response.json().await?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::UnexpectedResponse("response contained no choices".into()))?;

        if let Some(reason) = choice.finish_reason.as_deref() {
            tracing::debug!("OpenAI finish reason: {}", reason);
        }

        Ok(choice.message.content.unwrap_or_default())
    }
}

/// Map a non-success HTTP status and body to an error
fn error_from_status(status: u16, retry_after: Option<u64>, body: &str) -> Error {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let message = parsed
        .as_ref()
        .map(|e| e.error.message.clone())
        .unwrap_or_else(|| body.to_string());

    match status {
        401 | 403 => Error::Auth(message),
        429 => Error::RateLimited { retry_after },
        _ => {
            let error_type = parsed
                .and_then(|e| e.error.error_type)
                .unwrap_or_else(|| format!("http_{}", status));
            Error::api(error_type, message)
        }
    }
}

// Request types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<WireResponseFormat>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct WireResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

// Response types

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::post};

    /// Serve a single canned response for `/chat/completions` on an ephemeral port.
    async fn mock_server(status: StatusCode, body: serde_json::Value) -> String {
        let app = Router::new().route(
            "/chat/completions",
            post(move |Json(req): Json<serde_json::Value>| {
                let body = body.clone();
                async move {
                    // Echo the request back so tests can inspect the wire format.
                    let mut body = body;
                    if let Some(obj) = body.as_object_mut() {
                        obj.insert("echo".to_string(), req);
                    }
                    (status, Json(body))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_build_request_json_mode() {
        let provider = OpenAIProvider::new("sk-test");
        let messages = vec![ChatMessage::system("rules"), ChatMessage::user("hi")];
        let request = provider.build_request("gpt-4o-mini", &messages, &CompletionOptions::json(0.4));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["stream"], false);
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        let temperature = value["temperature"].as_f64().unwrap();
        assert!((temperature - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_build_request_text_mode_omits_optional_fields() {
        let provider = OpenAIProvider::new("sk-test");
        let messages = vec![ChatMessage::user("hi")];
        let request = provider.build_request("m", &messages, &CompletionOptions::default());
        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("response_format").is_none());
        assert!(value.get("temperature").is_none());
        assert!(value.get("max_tokens").is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = OpenAIProvider::new("k").with_base_url("http://localhost:1234/v1/");
        assert_eq!(provider.base_url(), "http://localhost:1234/v1");
    }

    #[test]
    fn test_error_from_status_auth() {
        let body = r#"{"error": {"message": "Incorrect API key", "type": "invalid_request_error"}}"#;
        let err = error_from_status(401, None, body);
        assert!(matches!(err, Error::Auth(ref m) if m == "Incorrect API key"));
    }

    #[test]
    fn test_error_from_status_rate_limited() {
        let err = error_from_status(429, Some(7), "{}");
        assert!(matches!(err, Error::RateLimited { retry_after: Some(7) }));
    }

    #[test]
    fn test_error_from_status_unparseable_body() {
        let err = error_from_status(502, None, "Bad Gateway");
        match err {
            Error::Api {
                error_type,
                message,
            } => {
                assert_eq!(error_type, "http_502");
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let base = mock_server(
            StatusCode::OK,
            serde_json::json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "{\"ok\":true}"}, "finish_reason": "stop"}
                ]
            }),
        )
        .await;
        let provider = OpenAIProvider::new("sk-test").with_base_url(base);

        let text = provider
            .complete(
                "gpt-4o-mini",
                &[ChatMessage::user("hello")],
                &CompletionOptions::json(0.4),
            )
            .await
            .unwrap();
        assert_eq!(text, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_complete_null_content_is_empty() {
        let base = mock_server(
            StatusCode::OK,
            serde_json::json!({"choices": [{"message": {"content": null}}]}),
        )
        .await;
        let provider = OpenAIProvider::new("sk-test").with_base_url(base);

        let text = provider
            .complete("m", &[ChatMessage::user("x")], &CompletionOptions::default())
            .await
            .unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_complete_no_choices_is_unexpected() {
        let base = mock_server(StatusCode::OK, serde_json::json!({"choices": []})).await;
        let provider = OpenAIProvider::new("sk-test").with_base_url(base);

        let err = provider
            .complete("m", &[ChatMessage::user("x")], &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn test_complete_server_error_maps_to_api() {
        let base = mock_server(
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({"error": {"message": "boom", "type": "server_error"}}),
        )
        .await;
        let provider = OpenAIProvider::new("sk-test").with_base_url(base);

        let err = provider
            .complete("m", &[ChatMessage::user("x")], &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_transient());
        assert!(err.to_string().contains("boom"));
    }
}
