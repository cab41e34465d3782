// ABOUTME: AI service for making text generation calls to Google Gemini
// ABOUTME: Handles model normalization, API requests, and error message extraction

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

const GEMINI_DEFAULT_MODEL: &str = "gemini-2.5-flash";
const GEMINI_LITE_MODEL: &str = "gemini-2.5-flash-lite-latest";
const NO_RESPONSE_PLACEHOLDER: &str = "No response generated.";
const GENERIC_FAILURE_MESSAGE: &str = "Failed to call Gemini API";

/// Map a requested model name onto the identifier actually dispatched.
///
/// Only the lite/non-lite distinction survives: any name containing "lite"
/// goes to the lite variant, everything else to the default flash model.
pub fn normalize_model_name(model: &str) -> &'static str {
    if model.contains("lite") {
        GEMINI_LITE_MODEL
    } else {
        GEMINI_DEFAULT_MODEL
    }
}

#[derive(Debug, Error)]
pub enum AIServiceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("{0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl AIServiceError {
    /// Human-readable message, falling back to a generic one when the source has none
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}

pub type AIServiceResult<T> = Result<T, AIServiceError>;

/// Parameters for a single generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    message: String,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate, if it has any
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client for the Gemini `generateContent` endpoint
#[derive(Debug, Clone)]
pub struct GeminiService {
    client: Client,
    base_url: String,
}

impl GeminiService {
    /// Create HTTP client. Only connecting is bounded; a generation call may take arbitrarily long.
    fn create_client() -> AIServiceResult<Client> {
        Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| AIServiceError::ClientBuild(e.to_string()))
    }

    pub fn new(base_url: impl Into<String>) -> AIServiceResult<Self> {
        Ok(Self {
            client: Self::create_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Makes a text generation call to Gemini
    pub async fn generate(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> AIServiceResult<String> {
        let model = normalize_model_name(&request.model);
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);

        let body = GeminiRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(request.system_prompt.clone()),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(request.user_prompt.clone()),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
            },
        };

        info!(
            "Making Gemini API request: requested_model={}, model={}, max_tokens={}",
            request.model, model, request.max_tokens
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                AIServiceError::RequestFailed(e)
            })?;

        info!("Received response from Gemini API: status={}", response.status());

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Gemini API error: {} - {}", status, error_text);

            let message = serde_json::from_str::<GeminiErrorEnvelope>(&error_text)
                .ok()
                .map(|envelope| envelope.error.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("API returned {}: {}", status, error_text));
            return Err(AIServiceError::ApiError(message));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AIServiceError::ParseError(e.to_string()))?;

        Ok(gemini_response
            .text()
            .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string()))
    }
}
