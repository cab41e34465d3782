use crate::app::App;
use crate::ui::palette::Palette;
use auditflow_core::RunStatus;
use auditflow_pipeline::RunOutcome;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Agent configuration and appearance settings
pub fn render(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let session = &app.session;
    let config = &session.config;

    let label = Style::default().fg(palette.muted);
    let value = Style::default().fg(palette.foreground).add_modifier(Modifier::BOLD);

    let field = |name: &'static str, text: String| {
        Line::from(vec![
            Span::styled(format!("{:<12}", name), label),
            Span::styled(text, value),
        ])
    };

    let (api_text, api_style) = if session.api_ready() {
        ("● API ready", Style::default().fg(Color::Green))
    } else {
        ("○ Simulation", Style::default().fg(Color::Yellow))
    };

    let mut lines = vec![
        Line::from(Span::styled(
            config.name.clone(),
            Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Provider", config.provider.to_string()),
        field("Model", config.model.label().to_string()),
        field("Max tokens", config.max_tokens.to_string()),
        field("Temperature", format!("{:.1}", config.temperature)),
        Line::from(""),
        field("Theme", session.theme.name.to_string()),
        field("Mode", if session.dark_mode { "Dark" } else { "Light" }.to_string()),
        field("Language", session.language.label().to_string()),
        Line::from(""),
        Line::from(Span::styled(api_text, api_style)),
        status_line(session.pipeline().status(), palette),
    ];

    if let Some(outcome) = outcome_line(app.last_outcome.as_ref()) {
        lines.push(outcome);
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Configuration ")
                .borders(Borders::ALL)
                .border_style(palette.border()),
        );
    frame.render_widget(paragraph, area);
}

fn status_line(status: RunStatus, palette: &Palette) -> Line<'static> {
    let color = match status {
        RunStatus::Idle => palette.muted,
        RunStatus::Running => palette.accent,
        RunStatus::Success => Color::Green,
        RunStatus::Error => Color::Red,
    };
    Line::from(Span::styled(
        format!("Status: {}", status.as_str().to_uppercase()),
        Style::default().fg(color),
    ))
}

fn outcome_line(outcome: Option<&RunOutcome>) -> Option<Line<'static>> {
    match outcome? {
        RunOutcome::Completed(report) => Some(Line::from(format!(
            "Last run: {}ms, {} tokens{}",
            report.elapsed_ms,
            report.tokens,
            if report.live { "" } else { " (simulated)" }
        ))),
        RunOutcome::Failed { message } => Some(Line::from(Span::styled(
            format!("Last run failed: {}", message),
            Style::default().fg(Color::Red),
        ))),
        RunOutcome::Skipped => None,
    }
}
