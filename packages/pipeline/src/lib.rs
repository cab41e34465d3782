// ABOUTME: Audit run pipeline and its observable state
// ABOUTME: Execution log, rolling dashboard metrics, provider dispatch, and the session controller

pub mod credentials;
pub mod error;
pub mod log_sink;
pub mod metrics;
pub mod pipeline;
pub mod provider;
pub mod session;
pub mod simulation;

pub use credentials::{select_dispatch_path, Credentials, DispatchPath};
pub use error::{PipelineError, PipelineResult};
pub use log_sink::LogSink;
pub use metrics::{DashboardData, MetricsBuffer, DASHBOARD_CAPACITY};
pub use pipeline::{RunInput, RunOutcome, RunPipeline, RunReport};
pub use provider::{build_user_prompt, LiveProvider, ResponseProvider};
pub use session::AuditSession;
pub use simulation::{SimulatedProvider, SIMULATED_REPORT};

// Re-exported so provider implementors only need this crate
pub use auditflow_ai::GenerationRequest;
