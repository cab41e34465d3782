pub mod charts;
pub mod palette;
pub mod panels;
pub mod sidebar;
pub mod widgets;

use crate::app::App;
use palette::Palette;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::Block;
use widgets::StatusBarWidget;

/// Main UI rendering function
pub fn render(frame: &mut Frame, app: &App) {
    let palette = Palette::new(app.session.theme, app.session.dark_mode);
    frame.render_widget(Block::default().style(palette.base()), frame.area());

    // Main content plus a one-line status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(40)])
        .split(chunks[0]);

    sidebar::render(frame, app, &palette, columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(25),
            Constraint::Percentage(30),
        ])
        .split(columns[1]);

    panels::render_report(frame, app, &palette, rows[0]);
    panels::render_log(frame, app, &palette, rows[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(rows[2]);

    let data = app.session.pipeline().metrics();
    charts::render_latency(frame, &data, &palette, bottom[0]);
    charts::render_tokens(frame, &data, &palette, bottom[1]);
    panels::render_questions(frame, app, &palette, bottom[2]);

    frame.render_widget(StatusBarWidget::new(app, &palette), chunks[1]);
}
