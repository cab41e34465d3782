use anyhow::Result;
use auditflow_config::Settings;
use clap::{Parser, Subcommand};
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::questions::QuestionsArgs;
use cli::run::RunArgs;
use cli::themes::ThemesArgs;

#[derive(Parser)]
#[command(name = "auditflow")]
#[command(about = "AuditFlow - generate ISO audit reports with an LLM agent")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an audit report from a template and observations
    Run(RunArgs),
    /// Launch the terminal dashboard
    Tui {
        /// Start with this flower theme instead of the first one
        #[arg(long)]
        theme: Option<String>,
    },
    /// List the flower color themes
    Themes(ThemesArgs),
    /// Print the suggested follow-up questions
    Questions(QuestionsArgs),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match handle_command(cli.command).await {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Run(args) => {
            init_tracing("warn");
            let settings = Settings::from_env()?;
            cli::run::handle_run_command(args, &settings).await
        }
        Commands::Tui { theme } => {
            // Diagnostics would tear the alternate screen
            init_tracing("off");
            let settings = Settings::from_env()?;
            start_tui(&settings, theme.as_deref()).await
        }
        Commands::Themes(args) => cli::themes::handle_themes_command(args),
        Commands::Questions(args) => cli::questions::handle_questions_command(args),
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn start_tui(settings: &Settings, theme: Option<&str>) -> Result<()> {
    use crossterm::{execute, terminal};

    let mut session = auditflow_pipeline::AuditSession::from_settings(settings)?;
    if let Some(name) = theme {
        session.theme = cli::themes::resolve_theme(name)?;
    }
    let mut app = auditflow_tui::App::new(session, settings.tick_rate_ms);

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if there was an error
    let cleanup_result = (|| -> Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    })();

    if let Err(cleanup_error) = cleanup_result {
        eprintln!("Terminal cleanup error: {}", cleanup_error);
    }

    result
}
