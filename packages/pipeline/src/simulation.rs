// ABOUTME: Scripted stand-in provider used when no live call is possible
// ABOUTME: Emits fixed progress entries after fixed delays and returns a canned report

use std::time::Duration;

use async_trait::async_trait;
use auditflow_ai::GenerationRequest;
use auditflow_config::{Settings, DEFAULT_SIMULATION_DELAYS_MS};
use tracing::info;

use crate::error::PipelineResult;
use crate::log_sink::LogSink;
use crate::provider::ResponseProvider;

pub const SIMULATED_REPORT: &str = r#"
# Audit Report (SIMULATED OUTPUT)

## 1. Scope
The audit covered the manufacturing process and quality records for Q3 2023.

## 2. Observations
| ID | Type | Description | Clause |
|----|------|-------------|--------|
| 01 | NC   | Missing signature on batch record #B-123 indicates a failure in Good Documentation Practices. | 8.2.1 |
| 02 | NC   | Temperature excursion on 2023-10-15 was not documented in a deviation report. | 6.4 |
| 03 | NC   | SOP-QA-005 training missing for 3 employees. | 6.2 |

## 3. Conclusion
Significant gaps in documentation and environmental monitoring were observed. Immediate CAPA is required.
"#;

const SIMULATION_NOTICE: &str =
    "No API key provided (or provider not Gemini). Running in Simulation Mode.";

/// Progress entries logged after the first two delays; the last delay is silent
const SIMULATION_STEPS: [&str; 2] = [
    "Analyzing Template structure...",
    "Processing Observations...",
];

/// Provider that performs no work: three pure delays, the first two followed by a log entry
#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    delays: [Duration; 3],
}

impl SimulatedProvider {
    pub fn new(delays: [Duration; 3]) -> Self {
        Self { delays }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.simulation_delays)
    }

    /// No delays at all
    pub fn instant() -> Self {
        Self::new([Duration::ZERO; 3])
    }

    pub fn delays(&self) -> &[Duration; 3] {
        &self.delays
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATION_DELAYS_MS.map(Duration::from_millis))
    }
}

#[async_trait]
impl ResponseProvider for SimulatedProvider {
    fn name(&self) -> &str {
        "simulation"
    }

    async fn generate(
        &self,
        _credential: Option<&str>,
        request: &GenerationRequest,
        log: &LogSink,
    ) -> PipelineResult<String> {
        info!("Simulating generation for model {}", request.model);
        log.warning(SIMULATION_NOTICE);

        for (delay, step) in self.delays.iter().zip(SIMULATION_STEPS) {
            tokio::time::sleep(*delay).await;
            log.info(step);
        }
        tokio::time::sleep(self.delays[2]).await;

        Ok(SIMULATED_REPORT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditflow_core::LogLevel;
    use pretty_assertions::assert_eq;
    use tokio::time::Instant;

    fn request() -> GenerationRequest {
        GenerationRequest {
            model: "gpt-4o-mini".to_string(),
            system_prompt: String::new(),
            user_prompt: String::new(),
            max_tokens: 1000,
            temperature: 0.0,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_scripted_sequence_and_timing() {
        let provider = SimulatedProvider::default();
        let log = LogSink::new();

        let started = Instant::now();
        let text = provider.generate(None, &request(), &log).await.unwrap();
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(2800), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(2900), "{:?}", elapsed);
        assert!(text.contains("Audit Report"));

        let entries: Vec<_> = log
            .entries()
            .into_iter()
            .map(|e| (e.level, e.message))
            .collect();
        assert_eq!(
            entries,
            vec![
                (LogLevel::Warning, SIMULATION_NOTICE.to_string()),
                (LogLevel::Info, "Analyzing Template structure...".to_string()),
                (LogLevel::Info, "Processing Observations...".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_instant_provider_ignores_credential() {
        let provider = SimulatedProvider::instant();
        let log = LogSink::new();
        let text = provider
            .generate(Some("whatever"), &request(), &log)
            .await
            .unwrap();
        assert_eq!(text, SIMULATED_REPORT);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_from_settings_uses_configured_delays() {
        let settings = Settings {
            simulation_delays: [Duration::from_millis(1); 3],
            ..Settings::default()
        };
        let provider = SimulatedProvider::from_settings(&settings);
        assert_eq!(provider.delays(), &[Duration::from_millis(1); 3]);
        assert_eq!(
            SimulatedProvider::default().delays()[2],
            Duration::from_millis(1200)
        );
    }
}
