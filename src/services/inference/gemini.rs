//! Gemini `generateContent` provider
//!
//! Authenticates with the API key as a query parameter. One POST per call,
//! no retry and no client-side timeout.

use crate::{
    error::{AppError, AppResult},
    services::inference::InferenceClient,
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

/// Text used when the response has no candidate text, or an empty one
const EMPTY_RESPONSE_TEXT: &str = "{}";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// `candidates[0].content.parts[0].text`
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl InferenceClient for GeminiClient {
    async fn infer(&self, prompt: &str) -> AppResult<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Inference(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Inference(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Inference(format!("invalid response body: {}", e)))?;

        let text = payload
            .into_text()
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| {
                tracing::warn!(provider = self.name(), "Response carried no candidate text");
                EMPTY_RESPONSE_TEXT.to_string()
            });

        tracing::info!(
            provider = self.name(),
            prompt_chars = prompt.len(),
            response_chars = text.len(),
            "Inference completed"
        );

        Ok(text)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
