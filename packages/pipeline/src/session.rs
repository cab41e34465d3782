// ABOUTME: Session controller owning the editable dashboard state
// ABOUTME: Configuration, inputs, credentials, and appearance, with snapshot-per-run execution

use std::sync::Arc;

use auditflow_ai::GeminiService;
use auditflow_config::Settings;
use auditflow_core::{
    follow_up_questions, spin_theme, AgentConfig, Language, ProviderKind, Theme,
    DEFAULT_OBSERVATIONS, DEFAULT_TEMPLATE, FLOWER_THEMES, MAX_TOKENS_STEP,
};

use crate::credentials::{select_dispatch_path, Credentials};
use crate::error::PipelineResult;
use crate::pipeline::{RunInput, RunOutcome, RunPipeline};
use crate::provider::LiveProvider;
use crate::simulation::SimulatedProvider;

/// Everything the user can edit during a session, plus the pipeline that runs it
pub struct AuditSession {
    pub config: AgentConfig,
    pub template: String,
    pub observations: String,
    pub credentials: Credentials,
    pub theme: &'static Theme,
    pub dark_mode: bool,
    pub language: Language,
    pipeline: RunPipeline,
}

impl AuditSession {
    pub fn new(pipeline: RunPipeline, credentials: Credentials) -> Self {
        Self {
            config: AgentConfig::default(),
            template: DEFAULT_TEMPLATE.to_string(),
            observations: DEFAULT_OBSERVATIONS.to_string(),
            credentials,
            theme: &FLOWER_THEMES[0],
            dark_mode: false,
            language: Language::default(),
            pipeline,
        }
    }

    /// Session wired to the real Gemini endpoint and the scripted simulation
    pub fn from_settings(settings: &Settings) -> PipelineResult<Self> {
        let service = GeminiService::new(settings.gemini_base_url.clone())?;
        let pipeline = RunPipeline::new(
            Arc::new(LiveProvider::new(service)),
            Arc::new(SimulatedProvider::from_settings(settings)),
        );
        Ok(Self::new(
            pipeline,
            Credentials::new(settings.ambient_api_key.clone()),
        ))
    }

    pub fn pipeline(&self) -> &RunPipeline {
        &self.pipeline
    }

    /// Copy of the current inputs; later edits do not affect a run started from it
    pub fn snapshot(&self) -> RunInput {
        RunInput {
            config: self.config.clone(),
            template: self.template.clone(),
            observations: self.observations.clone(),
            credentials: self.credentials.clone(),
        }
    }

    pub async fn run(&self) -> RunOutcome {
        self.pipeline.execute(self.snapshot()).await
    }

    /// Whether the next run would make a live provider call
    pub fn api_ready(&self) -> bool {
        select_dispatch_path(self.config.provider, &self.credentials).is_live()
    }

    pub fn set_api_key(&mut self, provider: ProviderKind, key: impl Into<String>) {
        self.credentials.set_user_key(provider, key);
    }

    pub fn spin_theme(&mut self) -> &'static Theme {
        self.theme = spin_theme(&mut rand::thread_rng());
        self.theme
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn toggle_language(&mut self) {
        self.language = self.language.toggle();
    }

    pub fn cycle_provider(&mut self) {
        self.config.provider = self.config.provider.next();
    }

    pub fn cycle_model(&mut self) {
        self.config.model = self.config.model.next();
    }

    pub fn increase_max_tokens(&mut self) {
        self.config
            .set_max_tokens(self.config.max_tokens.saturating_add(MAX_TOKENS_STEP));
    }

    pub fn decrease_max_tokens(&mut self) {
        self.config
            .set_max_tokens(self.config.max_tokens.saturating_sub(MAX_TOKENS_STEP));
    }

    /// Nudge temperature by `delta`, keeping it within 0.0..=2.0 and on one decimal
    pub fn adjust_temperature(&mut self, delta: f32) {
        let next = ((self.config.temperature + delta) * 10.0).round() / 10.0;
        self.config.temperature = next.clamp(0.0, 2.0);
    }

    pub fn follow_up_questions(&self) -> &'static [&'static str] {
        follow_up_questions(self.language)
    }
}
