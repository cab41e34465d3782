use crate::app::App;
use crate::ui::palette::Palette;
use auditflow_core::{LogEntry, LogLevel, RunStatus};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

/// Generated report, or a hint when there is nothing to show yet
pub fn render_report(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let pipeline = app.session.pipeline();
    let report = pipeline.report();

    let lines: Vec<Line> = if !report.is_empty() {
        report
            .lines()
            .map(|line| report_line(line, palette))
            .collect()
    } else {
        let hint = match pipeline.status() {
            RunStatus::Running => "Generating report...",
            RunStatus::Error => "Run failed. See the execution log for details.",
            _ => "Press 'r' to generate an audit report.",
        };
        vec![Line::from(Span::styled(hint, Style::default().fg(palette.muted)))]
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Report ")
                .borders(Borders::ALL)
                .border_style(palette.border()),
        );
    frame.render_widget(paragraph, area);
}

fn report_line<'a>(line: &'a str, palette: &Palette) -> Line<'a> {
    if line.starts_with('#') {
        Line::from(Span::styled(
            line,
            Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(line)
    }
}

/// Execution log, following the newest entry unless scrolled back
pub fn render_log(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let entries = app.session.pipeline().log().entries();
    let height = area.height.saturating_sub(2) as usize;
    let window = visible_window(entries.len(), height, app.log_scroll as usize);

    let items: Vec<ListItem> = entries[window]
        .iter()
        .map(|entry| ListItem::new(log_line(entry, palette)))
        .collect();

    let title = if app.log_scroll > 0 {
        format!(" Execution Log (scrolled {}, End to follow) ", app.log_scroll)
    } else {
        " Execution Log ".to_string()
    };

    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(palette.border()),
    );
    frame.render_widget(list, area);
}

/// Range of entries to draw: `height` entries ending `scroll` entries before the tail
pub fn visible_window(total: usize, height: usize, scroll: usize) -> std::ops::Range<usize> {
    let end = total.saturating_sub(scroll.min(total.saturating_sub(height)));
    let start = end.saturating_sub(height);
    start..end
}

fn log_line<'a>(entry: &'a LogEntry, palette: &Palette) -> Line<'a> {
    let color = match entry.level {
        LogLevel::Info => palette.foreground,
        LogLevel::Success => Color::Green,
        LogLevel::Warning => Color::Yellow,
        LogLevel::Error => Color::Red,
    };
    Line::from(vec![
        Span::styled(format!("[{}] ", entry.timestamp), Style::default().fg(palette.muted)),
        Span::styled(format!("{:<7} ", entry.level.as_str().to_uppercase()), Style::default().fg(color)),
        Span::styled(entry.message.as_str(), Style::default().fg(color)),
    ])
}

/// Suggested follow-up questions in the selected language
pub fn render_questions(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let items: Vec<ListItem> = app
        .session
        .follow_up_questions()
        .iter()
        .enumerate()
        .map(|(i, question)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(palette.accent)),
                Span::raw(*question),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Follow-up Questions ({}) ", app.session.language.label()))
            .borders(Borders::ALL)
            .border_style(palette.border()),
    );
    frame.render_widget(list, area);
}
