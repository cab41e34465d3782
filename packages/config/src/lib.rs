// ABOUTME: Configuration for AuditFlow
// ABOUTME: Environment variable names and settings loaded from the environment

pub mod constants;
pub mod settings;

pub use settings::{
    ConfigError, Settings, DEFAULT_GEMINI_BASE_URL, DEFAULT_SIMULATION_DELAYS_MS,
    DEFAULT_TICK_RATE_MS,
};
