// ABOUTME: Pipeline failure type
// ABOUTME: The single failure class a run can end in, carrying a human-readable message

use auditflow_ai::AIServiceError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("{0}")]
    Failed(String),
}

impl PipelineError {
    pub fn message(&self) -> &str {
        match self {
            PipelineError::Failed(message) => message,
        }
    }
}

impl From<AIServiceError> for PipelineError {
    fn from(err: AIServiceError) -> Self {
        PipelineError::Failed(err.user_message())
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
