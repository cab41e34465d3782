// ABOUTME: Audit agent domain type definitions
// ABOUTME: Agent configuration, provider and model selectors, log entries, and run status

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::MAX_TOKENS_RANGE;
use crate::utils::{generate_log_id, wall_clock_timestamp};

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Unknown model: {0}")]
    UnknownModel(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::Gemini,
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }

    /// Only Gemini is wired to a real outbound call; the others are selectable but simulated.
    pub fn supports_live_calls(&self) -> bool {
        matches!(self, ProviderKind::Gemini)
    }

    /// Next provider in selector order, wrapping around
    pub fn next(&self) -> ProviderKind {
        let idx = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            _ => Err(ParseError::UnknownProvider(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelType {
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4.1-mini")]
    Gpt41Mini,
    #[serde(rename = "gpt5-nano")]
    Gpt5Nano,
    #[serde(rename = "gemini-2.5-flash")]
    Gemini25Flash,
    #[serde(rename = "gemini-2.5-flash-lite")]
    Gemini25FlashLite,
}

impl ModelType {
    pub const ALL: [ModelType; 5] = [
        ModelType::Gpt4oMini,
        ModelType::Gpt41Mini,
        ModelType::Gpt5Nano,
        ModelType::Gemini25Flash,
        ModelType::Gemini25FlashLite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Gpt4oMini => "gpt-4o-mini",
            ModelType::Gpt41Mini => "gpt-4.1-mini",
            ModelType::Gpt5Nano => "gpt5-nano",
            ModelType::Gemini25Flash => "gemini-2.5-flash",
            ModelType::Gemini25FlashLite => "gemini-2.5-flash-lite",
        }
    }

    /// Label shown in model selectors
    pub fn label(&self) -> &'static str {
        match self {
            ModelType::Gpt41Mini => "gpt-4.1-mini (Preview)",
            ModelType::Gpt5Nano => "gpt5-nano (Beta)",
            other => other.as_str(),
        }
    }

    pub fn next(&self) -> ModelType {
        let idx = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownModel(s.to_string()))
    }
}

/// Configuration for the audit agent, edited by the user for the whole session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    pub id: String,
    pub name: String,
    pub provider: ProviderKind,
    pub model: ModelType,
    pub max_tokens: u32,
    pub temperature: f32,
    pub system_prompt: String,
    pub user_prompt: String,
}

impl AgentConfig {
    /// Set the output token bound, clamped to the range the selector allows
    pub fn set_max_tokens(&mut self, max_tokens: u32) {
        self.max_tokens = max_tokens.clamp(*MAX_TOKENS_RANGE.start(), *MAX_TOKENS_RANGE.end());
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            id: "default-agent".to_string(),
            name: "Audit Agent".to_string(),
            provider: ProviderKind::Gemini,
            model: ModelType::Gemini25Flash,
            max_tokens: 12000,
            temperature: 0.3,
            system_prompt: "You are an expert ISO 13485 auditor.".to_string(),
            user_prompt: "Analyze the observations against the template.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    /// Create an entry stamped with a fresh id and the current wall-clock time
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            id: generate_log_id(),
            timestamp: wall_clock_timestamp(),
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Success,
    Error,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Success | RunStatus::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Idle => "idle",
            RunStatus::Running => "running",
            RunStatus::Success => "success",
            RunStatus::Error => "error",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn toggle(&self) -> Language {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Zh => "繁中",
        }
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "zh" | "zh-tw" | "chinese" => Ok(Language::Zh),
            _ => Err(ParseError::UnknownLanguage(s.to_string())),
        }
    }
}
