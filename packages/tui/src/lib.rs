//! AuditFlow TUI - terminal dashboard for audit report generation
//!
//! Renders the agent configuration, the generated report, the execution
//! log, and the token/latency charts, built with ratatui.

pub mod app;
pub mod events;
pub mod ui;

pub use app::App;
