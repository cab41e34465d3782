// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across AuditFlow

// Credentials
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const API_KEY: &str = "API_KEY"; // Legacy

// Provider Configuration
pub const AUDITFLOW_GEMINI_BASE_URL: &str = "AUDITFLOW_GEMINI_BASE_URL";

// Simulation Configuration
pub const AUDITFLOW_SIMULATION_DELAYS_MS: &str = "AUDITFLOW_SIMULATION_DELAYS_MS";

// Dashboard Configuration
pub const AUDITFLOW_TICK_RATE_MS: &str = "AUDITFLOW_TICK_RATE_MS";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";
