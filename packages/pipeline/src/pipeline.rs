// ABOUTME: The audit run pipeline
// ABOUTME: Dispatch, status transitions, execution log emissions, and rolling metrics update

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use auditflow_ai::GenerationRequest;
use auditflow_core::{clock_label, AgentConfig, RunStatus};
use rand::Rng;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::credentials::{select_dispatch_path, Credentials, DispatchPath};
use crate::log_sink::LogSink;
use crate::metrics::{DashboardData, MetricsBuffer};
use crate::provider::{build_user_prompt, ResponseProvider};

/// Bounds of the per-run token sample
const TOKEN_SAMPLE_RANGE: std::ops::Range<u32> = 1000..3000;

/// Read-consistent inputs for one run, captured when the run starts
#[derive(Debug, Clone)]
pub struct RunInput {
    pub config: AgentConfig,
    pub template: String,
    pub observations: String,
    pub credentials: Credentials,
}

impl RunInput {
    pub fn generation_request(&self) -> GenerationRequest {
        GenerationRequest {
            model: self.config.model.as_str().to_string(),
            system_prompt: self.config.system_prompt.clone(),
            user_prompt: build_user_prompt(
                &self.config.user_prompt,
                &self.template,
                &self.observations,
            ),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub report: String,
    pub elapsed_ms: u64,
    pub tokens: u32,
    pub live: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(RunReport),
    Failed { message: String },
    /// Another run was in flight; nothing happened
    Skipped,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }
}

#[derive(Debug, Default)]
struct RunState {
    status: RunStatus,
    report: String,
}

/// Holds the processing flag for one run and releases it however the run ends
struct ProcessingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ProcessingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Executes runs and owns everything a run mutates.
///
/// Cheap to clone; clones share state, so a presentation layer can read
/// status, log, and metrics while a run executes on another task.
#[derive(Clone)]
pub struct RunPipeline {
    log: LogSink,
    metrics: Arc<RwLock<MetricsBuffer>>,
    state: Arc<RwLock<RunState>>,
    processing: Arc<AtomicBool>,
    live: Arc<dyn ResponseProvider>,
    simulated: Arc<dyn ResponseProvider>,
}

impl RunPipeline {
    /// Pipeline whose charts start from the seeded samples
    pub fn new(live: Arc<dyn ResponseProvider>, simulated: Arc<dyn ResponseProvider>) -> Self {
        Self::with_metrics(live, simulated, MetricsBuffer::seeded())
    }

    pub fn with_metrics(
        live: Arc<dyn ResponseProvider>,
        simulated: Arc<dyn ResponseProvider>,
        metrics: MetricsBuffer,
    ) -> Self {
        Self {
            log: LogSink::new(),
            metrics: Arc::new(RwLock::new(metrics)),
            state: Arc::new(RwLock::new(RunState::default())),
            processing: Arc::new(AtomicBool::new(false)),
            live,
            simulated,
        }
    }

    pub fn log(&self) -> &LogSink {
        &self.log
    }

    pub fn status(&self) -> RunStatus {
        self.read_state().status
    }

    /// Report text of the last successful run; empty while running or after a failure
    pub fn report(&self) -> String {
        self.read_state().report.clone()
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    pub fn metrics(&self) -> DashboardData {
        self.metrics
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .snapshot()
    }

    /// Run once with `input`. Returns `Skipped` without side effects if a run is already in flight.
    pub async fn execute(&self, input: RunInput) -> RunOutcome {
        let Some(_guard) = ProcessingGuard::acquire(&self.processing) else {
            debug!("Run requested while another is in flight - ignoring");
            return RunOutcome::Skipped;
        };

        {
            let mut state = self.write_state();
            state.status = RunStatus::Running;
            state.report.clear();
        }
        self.log.info(format!(
            "Starting pipeline execution with model: {}",
            input.config.model
        ));

        let started = Instant::now();
        let request = input.generation_request();
        let path = select_dispatch_path(input.config.provider, &input.credentials);
        let (provider, credential) = match path {
            DispatchPath::Live { credential } => (&self.live, Some(credential)),
            DispatchPath::Simulation => (&self.simulated, None),
        };
        info!(
            "Run started: provider={}, model={}, path={}, handler={}",
            input.config.provider,
            input.config.model,
            path.label(),
            provider.name()
        );

        match provider.generate(credential, &request, &self.log).await {
            Ok(report) => {
                let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                {
                    let mut state = self.write_state();
                    state.report = report.clone();
                    state.status = RunStatus::Success;
                }
                self.log
                    .success(format!("Execution completed in {}ms", elapsed_ms));

                let tokens = rand::thread_rng().gen_range(TOKEN_SAMPLE_RANGE);
                self.metrics
                    .write()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(clock_label(), elapsed_ms, tokens);

                info!("Run completed in {}ms", elapsed_ms);
                RunOutcome::Completed(RunReport {
                    report,
                    elapsed_ms,
                    tokens,
                    live: path.is_live(),
                })
            }
            Err(e) => {
                self.write_state().status = RunStatus::Error;
                self.log.error(format!("Execution failed: {}", e.message()));
                error!("Run failed: {}", e);
                RunOutcome::Failed {
                    message: e.message().to_string(),
                }
            }
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, RunState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, RunState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PipelineError, PipelineResult};
    use crate::metrics::DASHBOARD_CAPACITY;
    use crate::provider::LiveProvider;
    use crate::simulation::SimulatedProvider;
    use async_trait::async_trait;
    use auditflow_ai::GeminiService;
    use auditflow_core::{LogLevel, ModelType, ProviderKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;
    use tokio::sync::Notify;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Records what it was called with and answers with fixed text
    #[derive(Default)]
    struct RecordingProvider {
        calls: Mutex<Vec<(Option<String>, GenerationRequest)>>,
    }

    #[async_trait]
    impl ResponseProvider for RecordingProvider {
        fn name(&self) -> &str {
            "recording"
        }

        async fn generate(
            &self,
            credential: Option<&str>,
            request: &GenerationRequest,
            _log: &LogSink,
        ) -> PipelineResult<String> {
            self.calls
                .lock()
                .unwrap()
                .push((credential.map(str::to_string), request.clone()));
            Ok("# Audit Report (LIVE)".to_string())
        }
    }

    struct FailingProvider {
        message: &'static str,
    }

    #[async_trait]
    impl ResponseProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(
            &self,
            _credential: Option<&str>,
            _request: &GenerationRequest,
            _log: &LogSink,
        ) -> PipelineResult<String> {
            Err(PipelineError::Failed(self.message.to_string()))
        }
    }

    /// Blocks until released so a run can be held in flight
    struct GatedProvider {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl ResponseProvider for GatedProvider {
        fn name(&self) -> &str {
            "gated"
        }

        async fn generate(
            &self,
            _credential: Option<&str>,
            _request: &GenerationRequest,
            _log: &LogSink,
        ) -> PipelineResult<String> {
            self.gate.notified().await;
            Ok("released".to_string())
        }
    }

    fn input(provider: ProviderKind, credentials: Credentials) -> RunInput {
        RunInput {
            config: AgentConfig {
                provider,
                ..AgentConfig::default()
            },
            template: "# Template".to_string(),
            observations: "- obs".to_string(),
            credentials,
        }
    }

    fn gemini_key(key: &str) -> Credentials {
        let mut credentials = Credentials::new(None);
        credentials.set_user_key(ProviderKind::Gemini, key);
        credentials
    }

    fn levels(pipeline: &RunPipeline) -> Vec<LogLevel> {
        pipeline.log().entries().iter().map(|e| e.level).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulation_path_succeeds() {
        let live = Arc::new(RecordingProvider::default());
        let pipeline = RunPipeline::new(live.clone(), Arc::new(SimulatedProvider::default()));

        let outcome = pipeline
            .execute(input(ProviderKind::OpenAi, gemini_key("unused")))
            .await;

        let RunOutcome::Completed(report) = outcome else {
            panic!("expected completion, got {:?}", outcome);
        };
        assert!(!report.live);
        assert!(report.report.contains("Audit Report"));
        assert!(report.elapsed_ms >= 2800, "{}", report.elapsed_ms);
        assert_eq!(pipeline.status(), RunStatus::Success);
        assert_eq!(pipeline.report(), report.report);
        assert!(live.calls.lock().unwrap().is_empty());

        assert_eq!(
            levels(&pipeline),
            vec![
                LogLevel::Info,
                LogLevel::Warning,
                LogLevel::Info,
                LogLevel::Info,
                LogLevel::Success,
            ]
        );
        let entries = pipeline.log().entries();
        let success_at = entries
            .iter()
            .position(|e| e.level == LogLevel::Success)
            .unwrap();
        let infos_before_success = entries[..success_at]
            .iter()
            .filter(|e| e.level == LogLevel::Info)
            .count();
        assert_eq!(infos_before_success, 3);
        assert_eq!(
            entries[0].message,
            "Starting pipeline execution with model: gemini-2.5-flash"
        );
        assert_eq!(
            entries[4].message,
            format!("Execution completed in {}ms", report.elapsed_ms)
        );
    }

    #[tokio::test]
    async fn test_live_path_gets_snapshot_request() {
        let live = Arc::new(RecordingProvider::default());
        let pipeline = RunPipeline::new(live.clone(), Arc::new(SimulatedProvider::instant()));

        let mut run = input(ProviderKind::Gemini, gemini_key("user-key"));
        run.config.model = ModelType::Gemini25FlashLite;
        run.config.max_tokens = 8000;
        run.config.temperature = 0.7;
        let outcome = pipeline.execute(run).await;

        match outcome {
            RunOutcome::Completed(report) => {
                assert!(report.live);
                assert_eq!(report.report, "# Audit Report (LIVE)");
            }
            other => panic!("expected completion, got {:?}", other),
        }

        let calls = live.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (credential, request) = &calls[0];
        assert_eq!(credential.as_deref(), Some("user-key"));
        assert_eq!(
            request,
            &GenerationRequest {
                model: "gemini-2.5-flash-lite".to_string(),
                system_prompt: "You are an expert ISO 13485 auditor.".to_string(),
                user_prompt: "Analyze the observations against the template.\n\nTEMPLATE:\n# Template\n\nOBSERVATIONS:\n- obs".to_string(),
                max_tokens: 8000,
                temperature: 0.7,
            }
        );
    }

    #[tokio::test]
    async fn test_ambient_credential_reaches_live_path() {
        let live = Arc::new(RecordingProvider::default());
        let pipeline = RunPipeline::new(live.clone(), Arc::new(SimulatedProvider::instant()));

        let credentials = Credentials::new(Some("ambient-key".to_string()));
        pipeline
            .execute(input(ProviderKind::Gemini, credentials))
            .await;

        let calls = live.calls.lock().unwrap();
        assert_eq!(calls[0].0.as_deref(), Some("ambient-key"));
    }

    #[tokio::test]
    async fn test_success_pushes_one_sample() {
        let pipeline = RunPipeline::new(
            Arc::new(RecordingProvider::default()),
            Arc::new(SimulatedProvider::instant()),
        );
        let before = pipeline.metrics();

        let outcome = pipeline
            .execute(input(ProviderKind::Gemini, gemini_key("k")))
            .await;
        let RunOutcome::Completed(report) = outcome else {
            panic!("expected completion");
        };

        let after = pipeline.metrics();
        assert_eq!(after.time_labels.len(), DASHBOARD_CAPACITY);
        assert_eq!(after.latency_data[..4].to_vec(), before.latency_data[1..].to_vec());
        assert_eq!(after.token_data[..4].to_vec(), before.token_data[1..].to_vec());
        assert_eq!(*after.latency_data.last().unwrap(), report.elapsed_ms);
        assert_eq!(*after.token_data.last().unwrap(), report.tokens);
        assert!(TOKEN_SAMPLE_RANGE.contains(&report.tokens));
        assert_eq!(after.time_labels.last().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_live_failure_quota_exceeded() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"code": 429, "message": "quota exceeded"}
            })))
            .mount(&mock_server)
            .await;

        let live = LiveProvider::new(GeminiService::new(mock_server.uri()).unwrap());
        let pipeline = RunPipeline::new(Arc::new(live), Arc::new(SimulatedProvider::instant()));
        let before = pipeline.metrics();

        let outcome = pipeline
            .execute(input(ProviderKind::Gemini, gemini_key("k")))
            .await;

        assert_eq!(
            outcome,
            RunOutcome::Failed {
                message: "quota exceeded".to_string()
            }
        );
        assert_eq!(pipeline.status(), RunStatus::Error);
        assert_eq!(pipeline.report(), "");
        assert_eq!(pipeline.metrics(), before);
        assert!(!pipeline.is_processing());

        let errors: Vec<_> = pipeline
            .log()
            .entries()
            .into_iter()
            .filter(|e| e.level == LogLevel::Error)
            .collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("quota exceeded"));
        assert_eq!(
            levels(&pipeline),
            vec![LogLevel::Info, LogLevel::Info, LogLevel::Error]
        );
    }

    #[tokio::test]
    async fn test_failure_clears_previous_report() {
        let pipeline = RunPipeline::new(
            Arc::new(FailingProvider {
                message: "bad credential",
            }),
            Arc::new(SimulatedProvider::instant()),
        );

        pipeline
            .execute(input(ProviderKind::Anthropic, Credentials::default()))
            .await;
        assert_eq!(pipeline.status(), RunStatus::Success);
        assert!(!pipeline.report().is_empty());

        let outcome = pipeline
            .execute(input(ProviderKind::Gemini, gemini_key("k")))
            .await;
        assert_eq!(
            outcome,
            RunOutcome::Failed {
                message: "bad credential".to_string()
            }
        );
        assert_eq!(pipeline.report(), "");
        assert_eq!(pipeline.status(), RunStatus::Error);
    }

    #[tokio::test]
    async fn test_log_grows_across_runs() {
        let pipeline = RunPipeline::new(
            Arc::new(RecordingProvider::default()),
            Arc::new(SimulatedProvider::instant()),
        );

        pipeline
            .execute(input(ProviderKind::Gemini, gemini_key("k")))
            .await;
        let after_first = pipeline.log().len();
        pipeline
            .execute(input(ProviderKind::Gemini, gemini_key("k")))
            .await;

        assert_eq!(after_first, 2);
        assert_eq!(pipeline.log().len(), 4);
    }

    #[tokio::test]
    async fn test_concurrent_trigger_is_skipped() {
        let gate = Arc::new(Notify::new());
        let pipeline = RunPipeline::new(
            Arc::new(GatedProvider { gate: gate.clone() }),
            Arc::new(SimulatedProvider::instant()),
        );

        let first = {
            let pipeline = pipeline.clone();
            tokio::spawn(async move {
                pipeline
                    .execute(input(ProviderKind::Gemini, gemini_key("k")))
                    .await
            })
        };
        while !pipeline.is_processing() {
            tokio::task::yield_now().await;
        }
        assert_eq!(pipeline.status(), RunStatus::Running);

        let log_len = pipeline.log().len();
        let second = pipeline
            .execute(input(ProviderKind::Gemini, gemini_key("k")))
            .await;
        assert_eq!(second, RunOutcome::Skipped);
        assert_eq!(pipeline.log().len(), log_len);

        gate.notify_one();
        let outcome = first.await.unwrap();
        assert!(outcome.is_completed());
        assert!(!pipeline.is_processing());
    }

    #[tokio::test]
    async fn test_empty_inputs_accepted() {
        let live = Arc::new(RecordingProvider::default());
        let pipeline = RunPipeline::new(live.clone(), Arc::new(SimulatedProvider::instant()));

        let mut run = input(ProviderKind::Gemini, gemini_key("k"));
        run.template.clear();
        run.observations.clear();
        run.config.user_prompt.clear();
        run.config.system_prompt.clear();

        assert!(pipeline.execute(run).await.is_completed());
    }
}
