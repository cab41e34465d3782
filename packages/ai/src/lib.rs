// ABOUTME: AI service integration for AuditFlow
// ABOUTME: Google Gemini client used to generate audit reports

pub mod service;

// Re-export service types
pub use service::{
    normalize_model_name, AIServiceError, AIServiceResult, GeminiService, GenerationRequest,
};
