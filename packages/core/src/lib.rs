// ABOUTME: Core types, constants, and utilities for AuditFlow
// ABOUTME: Foundational package providing the audit domain model shared by all packages

pub mod constants;
pub mod themes;
pub mod types;
pub mod utils;

// Re-export main types
pub use types::{
    AgentConfig, Language, LogEntry, LogLevel, ModelType, ParseError, ProviderKind, RunStatus,
};

// Re-export constants
pub use constants::{
    follow_up_questions, DEFAULT_OBSERVATIONS, DEFAULT_TEMPLATE, MAX_TOKENS_RANGE,
    MAX_TOKENS_STEP,
};

// Re-export themes
pub use themes::{find_theme, spin_theme, Theme, FLOWER_THEMES};

// Re-export utilities
pub use utils::{clock_label, generate_log_id, wall_clock_timestamp};
