use crate::events::{AppEvent, EventHandler};
use crate::ui;
use anyhow::Result;
use auditflow_pipeline::{AuditSession, RunOutcome};
use crossterm::event::KeyCode;
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;
use tracing::debug;

/// Main TUI application struct
pub struct App {
    pub session: AuditSession,
    pub should_quit: bool,
    /// Lines scrolled up from the newest log entry; 0 follows the tail
    pub log_scroll: u16,
    pub last_outcome: Option<RunOutcome>,
    tick_rate: u64,
}

impl App {
    pub fn new(session: AuditSession, tick_rate: u64) -> Self {
        Self {
            session,
            should_quit: false,
            log_scroll: 0,
            last_outcome: None,
            tick_rate,
        }
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut event_handler = EventHandler::new(self.tick_rate);
        event_handler.follow_log(self.session.pipeline().log());

        // Main event loop
        while !self.should_quit {
            terminal.draw(|frame| {
                ui::render(frame, self);
            })?;

            match event_handler.next().await {
                Some(AppEvent::Key(key_event)) => {
                    let sender = event_handler.sender().clone();
                    self.handle_key_event(key_event.code, &sender);
                }
                Some(AppEvent::Tick) => {}
                Some(AppEvent::Log(_)) => {
                    // Every append snaps the log back to its newest entry
                    self.log_scroll = 0;
                }
                Some(AppEvent::RunFinished(outcome)) => {
                    self.last_outcome = Some(outcome);
                }
                None => break,
            }
        }

        Ok(())
    }

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyCode, sender: &mpsc::UnboundedSender<AppEvent>) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('r') | KeyCode::Enter => {
                self.start_run(sender);
            }
            KeyCode::Char('s') => {
                self.session.spin_theme();
            }
            KeyCode::Char('d') => self.session.toggle_dark_mode(),
            KeyCode::Char('l') => self.session.toggle_language(),
            KeyCode::Char('p') => self.session.cycle_provider(),
            KeyCode::Char('m') => self.session.cycle_model(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.session.increase_max_tokens(),
            KeyCode::Char('-') => self.session.decrease_max_tokens(),
            KeyCode::Char(']') => self.session.adjust_temperature(0.1),
            KeyCode::Char('[') => self.session.adjust_temperature(-0.1),
            KeyCode::Up => self.log_scroll = self.log_scroll.saturating_add(1),
            KeyCode::Down => self.log_scroll = self.log_scroll.saturating_sub(1),
            KeyCode::End => self.log_scroll = 0,
            _ => {}
        }
    }

    /// Start a run on a background task. Returns false when one is already in flight.
    pub fn start_run(&self, sender: &mpsc::UnboundedSender<AppEvent>) -> bool {
        let pipeline = self.session.pipeline().clone();
        if pipeline.is_processing() {
            debug!("Run key pressed while processing - ignored");
            return false;
        }

        let input = self.session.snapshot();
        let sender = sender.clone();
        tokio::spawn(async move {
            let outcome = pipeline.execute(input).await;
            let _ = sender.send(AppEvent::RunFinished(outcome));
        });
        true
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditflow_config::Settings;
    use auditflow_core::{Language, ModelType, RunStatus};
    use std::time::Duration;

    fn app() -> App {
        let settings = Settings {
            gemini_base_url: "http://127.0.0.1:1".to_string(),
            simulation_delays: [Duration::ZERO; 3],
            ..Settings::default()
        };
        App::new(AuditSession::from_settings(&settings).unwrap(), 250)
    }

    #[tokio::test]
    async fn test_config_keys() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();

        app.handle_key_event(KeyCode::Char('m'), &tx);
        app.handle_key_event(KeyCode::Char('+'), &tx);
        app.handle_key_event(KeyCode::Char(']'), &tx);
        app.handle_key_event(KeyCode::Char('l'), &tx);
        app.handle_key_event(KeyCode::Char('d'), &tx);

        assert_eq!(app.session.config.model, ModelType::Gemini25FlashLite);
        assert_eq!(app.session.config.max_tokens, 13000);
        assert!((app.session.config.temperature - 0.4).abs() < 1e-6);
        assert_eq!(app.session.language, Language::Zh);
        assert!(app.session.dark_mode);
    }

    #[tokio::test]
    async fn test_log_scroll_keys() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();

        app.handle_key_event(KeyCode::Up, &tx);
        app.handle_key_event(KeyCode::Up, &tx);
        app.handle_key_event(KeyCode::Down, &tx);
        assert_eq!(app.log_scroll, 1);

        app.handle_key_event(KeyCode::End, &tx);
        assert_eq!(app.log_scroll, 0);
        app.handle_key_event(KeyCode::Down, &tx);
        assert_eq!(app.log_scroll, 0);
    }

    #[tokio::test]
    async fn test_run_key_reports_outcome() {
        let mut app = app();
        let (tx, mut rx) = mpsc::unbounded_channel();

        app.handle_key_event(KeyCode::Char('r'), &tx);

        match rx.recv().await {
            Some(AppEvent::RunFinished(RunOutcome::Completed(report))) => {
                assert!(!report.live);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(app.session.pipeline().status(), RunStatus::Success);
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = app();
        let (tx, _rx) = mpsc::unbounded_channel();
        app.handle_key_event(KeyCode::Char('q'), &tx);
        assert!(app.should_quit);
    }
}
