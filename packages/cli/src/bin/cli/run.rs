// ABOUTME: Headless run command streaming the execution log to the terminal
// ABOUTME: Applies flag overrides to a session, executes N runs, prints the report and metrics

use anyhow::{bail, Context, Result};
use auditflow_config::Settings;
use auditflow_core::{LogEntry, LogLevel, ModelType, ProviderKind, MAX_TOKENS_RANGE};
use auditflow_pipeline::{AuditSession, DashboardData, RunOutcome};
use clap::Args;
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use std::path::PathBuf;
use tokio::sync::broadcast::Receiver;
use tracing::debug;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Provider to dispatch to (gemini, openai, anthropic)
    #[arg(long)]
    pub provider: Option<ProviderKind>,
    /// Model wire name, e.g. gemini-2.5-flash
    #[arg(long)]
    pub model: Option<ModelType>,
    /// Upper bound on output tokens
    #[arg(long, value_parser = parse_max_tokens)]
    pub max_tokens: Option<u32>,
    /// Sampling temperature between 0.0 and 2.0
    #[arg(long, value_parser = parse_temperature)]
    pub temperature: Option<f32>,
    #[arg(long)]
    pub system_prompt: Option<String>,
    #[arg(long)]
    pub user_prompt: Option<String>,
    /// File holding the report template (markdown)
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,
    /// File holding the raw observations
    #[arg(long, value_name = "FILE")]
    pub observations: Option<PathBuf>,
    /// Gemini API key; takes precedence over GEMINI_API_KEY
    #[arg(long)]
    pub api_key: Option<String>,
    /// Number of sequential runs
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,
}

pub async fn handle_run_command(args: RunArgs, settings: &Settings) -> Result<()> {
    let mut session = AuditSession::from_settings(settings)?;
    apply_overrides(&mut session, &args)?;

    println!(
        "{} {} via {} ({})",
        "▶ Running".green().bold(),
        session.config.model.as_str(),
        session.config.provider,
        if session.api_ready() { "live" } else { "simulation" }
    );

    let mut feed = session.pipeline().log().subscribe();
    let mut last_report = None;
    let mut last_failure = None;

    for run in 1..=args.runs {
        if args.runs > 1 {
            println!("{}", format!("── Run {}/{} ──", run, args.runs).dimmed());
        }

        let outcome = run_streaming(&session, &mut feed).await;
        debug!("Run {} finished: completed={}", run, outcome.is_completed());

        match outcome {
            RunOutcome::Completed(report) => {
                last_report = Some(report);
                last_failure = None;
            }
            RunOutcome::Failed { message } => last_failure = Some(message),
            RunOutcome::Skipped => {}
        }
    }

    if let Some(report) = &last_report {
        println!();
        println!("{}", report.report.trim());
        println!();
    }

    print_metrics(&session.pipeline().metrics());

    match last_failure {
        Some(message) => bail!("Last run failed: {}", message),
        None => Ok(()),
    }
}

/// Execute one run, printing log entries as they are appended
async fn run_streaming(session: &AuditSession, feed: &mut Receiver<LogEntry>) -> RunOutcome {
    let run = session.run();
    tokio::pin!(run);

    let outcome = loop {
        tokio::select! {
            outcome = &mut run => break outcome,
            Ok(entry) = feed.recv() => print_entry(&entry),
        }
    };

    // Entries appended right before the run resolved
    while let Ok(entry) = feed.try_recv() {
        print_entry(&entry);
    }
    outcome
}

pub fn apply_overrides(session: &mut AuditSession, args: &RunArgs) -> Result<()> {
    if let Some(provider) = args.provider {
        session.config.provider = provider;
    }
    if let Some(model) = args.model {
        session.config.model = model;
    }
    if let Some(max_tokens) = args.max_tokens {
        session.config.set_max_tokens(max_tokens);
    }
    if let Some(temperature) = args.temperature {
        session.config.temperature = temperature;
    }
    if let Some(system_prompt) = &args.system_prompt {
        session.config.system_prompt = system_prompt.clone();
    }
    if let Some(user_prompt) = &args.user_prompt {
        session.config.user_prompt = user_prompt.clone();
    }
    if let Some(path) = &args.template {
        session.template = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display()))?;
    }
    if let Some(path) = &args.observations {
        session.observations = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read observations {}", path.display()))?;
    }
    if let Some(key) = &args.api_key {
        session.set_api_key(ProviderKind::Gemini, key.clone());
    }
    Ok(())
}

fn print_entry(entry: &LogEntry) {
    let level = format!("{:<7}", entry.level.as_str().to_uppercase());
    let level = match entry.level {
        LogLevel::Info => level.cyan(),
        LogLevel::Success => level.green().bold(),
        LogLevel::Warning => level.yellow(),
        LogLevel::Error => level.red().bold(),
    };
    println!("{} {} {}", format!("[{}]", entry.timestamp).dimmed(), level, entry.message);
}

fn print_metrics(data: &DashboardData) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["Time", "Latency (ms)", "Tokens"]);
    for ((label, latency), tokens) in data
        .time_labels
        .iter()
        .zip(&data.latency_data)
        .zip(&data.token_data)
    {
        table.add_row(vec![label.clone(), latency.to_string(), tokens.to_string()]);
    }

    println!("{}", "📊 Recent runs".blue().bold());
    println!("{table}");
}

fn parse_max_tokens(s: &str) -> Result<u32, String> {
    let value: u32 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if MAX_TOKENS_RANGE.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "must be between {} and {}",
            MAX_TOKENS_RANGE.start(),
            MAX_TOKENS_RANGE.end()
        ))
    }
}

fn parse_temperature(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if (0.0..=2.0).contains(&value) {
        Ok(value)
    } else {
        Err("must be between 0.0 and 2.0".to_string())
    }
}
