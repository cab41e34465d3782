use crate::app::App;
use crate::ui::palette::Palette;
use auditflow_core::RunStatus;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

const IDLE_SHORTCUTS: &str = "r: Run • s: Spin theme • d: Dark • l: Lang • p/m: Provider/Model • +/-: Tokens • [/]: Temp • q: Quit";
const RUNNING_SHORTCUTS: &str = "↑↓: Scroll log • End: Follow • q: Quit";

/// Status bar showing run state, dispatch path, and context-aware shortcuts
pub struct StatusBarWidget<'a> {
    app: &'a App,
    palette: &'a Palette,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(app: &'a App, palette: &'a Palette) -> Self {
        Self { app, palette }
    }

    /// Run state indicator text and style
    fn get_mode_info(&self) -> (String, Style) {
        let status = self.app.session.pipeline().status();
        let style = match status {
            RunStatus::Idle => Style::default().fg(self.palette.muted),
            RunStatus::Running => Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD),
            RunStatus::Success => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            RunStatus::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        };
        (status.as_str().to_uppercase(), style)
    }

    fn get_context(&self) -> String {
        let session = &self.app.session;
        let path = if session.api_ready() {
            "live"
        } else {
            "simulation"
        };
        format!(
            "{} • {} • {}",
            session.theme.name,
            session.config.model.as_str(),
            path
        )
    }

    fn get_shortcuts(&self) -> &'static str {
        if self.app.session.pipeline().is_processing() {
            RUNNING_SHORTCUTS
        } else {
            IDLE_SHORTCUTS
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (mode_text, mode_style) = self.get_mode_info();
        let context = self.get_context();
        let shortcuts = self.get_shortcuts();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(mode_text.len() as u16 + 2),
                Constraint::Min(20),
                Constraint::Length(shortcuts.chars().count() as u16),
            ])
            .split(area);

        Paragraph::new(format!(" {} ", mode_text))
            .style(mode_style)
            .block(Block::default())
            .render(chunks[0], buf);

        Paragraph::new(context)
            .style(Style::default().fg(self.palette.foreground))
            .block(Block::default())
            .render(chunks[1], buf);

        Paragraph::new(shortcuts)
            .style(Style::default().fg(self.palette.muted))
            .block(Block::default())
            .render(chunks[2], buf);
    }
}
