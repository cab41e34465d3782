// ABOUTME: Response provider trait and the live Gemini-backed implementation
// ABOUTME: Both dispatch paths satisfy the same interface so the pipeline never branches on them

use async_trait::async_trait;
use auditflow_ai::{GeminiService, GenerationRequest};
use tracing::info;

use crate::error::{PipelineError, PipelineResult};
use crate::log_sink::LogSink;

/// Something that turns a generation request into report text
#[async_trait]
pub trait ResponseProvider: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Produce report text. May append progress entries to `log`.
    async fn generate(
        &self,
        credential: Option<&str>,
        request: &GenerationRequest,
        log: &LogSink,
    ) -> PipelineResult<String>;
}

/// Combine the user prompt with the labeled template and observations
pub fn build_user_prompt(user_prompt: &str, template: &str, observations: &str) -> String {
    format!(
        "{}\n\nTEMPLATE:\n{}\n\nOBSERVATIONS:\n{}",
        user_prompt, template, observations
    )
}

/// Provider that issues the real outbound call
#[derive(Debug, Clone)]
pub struct LiveProvider {
    service: GeminiService,
}

impl LiveProvider {
    pub fn new(service: GeminiService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ResponseProvider for LiveProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        credential: Option<&str>,
        request: &GenerationRequest,
        log: &LogSink,
    ) -> PipelineResult<String> {
        let api_key = credential
            .ok_or_else(|| PipelineError::Failed("No API key configured".to_string()))?;

        log.info("Connecting to Google Gemini API...");
        info!("Dispatching live generation to {}", self.service.base_url());

        let text = self.service.generate(api_key, request).await?;
        Ok(text)
    }
}
