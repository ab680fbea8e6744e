// src/providers/gemini.rs

use reqwest::Client;
use serde_json::json;
use std::time::Instant;

use crate::config::GeminiConfig;
use crate::errors::{ProbeError, Result};
use crate::providers::{Generation, ProbeTarget};

/// Message used when a failure response carries no `error.message` field.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// A probe target backed by Google's generativelanguage REST API.
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Creates a new `GeminiProvider`.
    pub fn new(client: Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }
}

impl ProbeTarget for GeminiProvider {
    /// Calls `generateContent` once and returns the model's reply text.
    ///
    /// No timeout and no retry: one POST per call, and the caller decides
    /// what a failure means for the overall run.
    async fn generate(&self, api_version: &str, model: &str, prompt: &str) -> Result<Generation> {
        let url = format!(
            "{}/{}/models/{}:generateContent?key={}",
            self.config.api_base.trim_end_matches('/'),
            api_version,
            model,
            self.config.api_key
        );

        log::info!("Calling Gemini {} with model {}", api_version, model);

        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}]
        });

        let start = Instant::now();

        let resp = self.client.post(&url).json(&body).send().await?;

        let status = resp.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        println!("Status Code: {} ({}ms)", status.as_u16(), latency_ms);

        if !status.is_success() {
            let error_body = resp.text().await.unwrap_or_default();
            return Err(ProbeError::Api {
                status: status.as_u16(),
                message: extract_error_message(&error_body),
            });
        }

        let response_json: serde_json::Value = resp.json().await?;

        let text = response_json
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("text"))
            .and_then(|t| t.as_str())
            .ok_or_else(|| ProbeError::UnexpectedResponse(response_json.to_string()))?;

        Ok(Generation {
            text: text.to_string(),
            status: status.as_u16(),
            latency_ms,
        })
    }
}

/// Pulls `error.message` out of a failure body, falling back to a generic
/// message when the body is not JSON or the field is absent.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error": {"code": 404, "message": "Model not found", "status": "NOT_FOUND"}}"#;
        assert_eq!(extract_error_message(body), "Model not found");
    }

    #[test]
    fn test_extract_error_message_missing_field() {
        assert_eq!(extract_error_message(r#"{"error": {}}"#), UNKNOWN_ERROR);
        assert_eq!(extract_error_message(r#"{}"#), UNKNOWN_ERROR);
    }

    #[test]
    fn test_extract_error_message_non_json_body() {
        assert_eq!(extract_error_message("<html>502</html>"), UNKNOWN_ERROR);
        assert_eq!(extract_error_message(""), UNKNOWN_ERROR);
    }
}
