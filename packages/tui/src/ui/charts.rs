use crate::ui::palette::Palette;
use auditflow_pipeline::DashboardData;
use ratatui::prelude::*;
use ratatui::symbols;
use ratatui::widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType};

/// Latency trend as a line chart over the sample window
pub fn render_latency(frame: &mut Frame, data: &DashboardData, palette: &Palette, area: Rect) {
    let points = latency_points(&data.latency_data);
    let max_latency = data.latency_data.iter().copied().max().unwrap_or(0);
    let y_max = axis_ceiling(max_latency);

    let x_labels: Vec<Span> = match (data.time_labels.first(), data.time_labels.last()) {
        (Some(first), Some(last)) if data.time_labels.len() > 1 => {
            vec![Span::raw(first.as_str()), Span::raw(last.as_str())]
        }
        (Some(only), _) => vec![Span::raw(only.as_str())],
        _ => Vec::new(),
    };

    let dataset = Dataset::default()
        .name("ms")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(palette.primary))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .title(" Latency (ms) ")
                .borders(Borders::ALL)
                .border_style(palette.border()),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(palette.muted))
                .bounds([0.0, points.len().saturating_sub(1).max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(palette.muted))
                .bounds([0.0, y_max as f64])
                .labels(vec![Span::raw("0"), Span::raw(y_max.to_string())]),
        );
    frame.render_widget(chart, area);
}

/// Tokens per run as bars labeled with the sample's clock time
pub fn render_tokens(frame: &mut Frame, data: &DashboardData, palette: &Palette, area: Rect) {
    let bars: Vec<(&str, u64)> = data
        .time_labels
        .iter()
        .zip(&data.token_data)
        .map(|(label, tokens)| (label.as_str(), u64::from(*tokens)))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(" Tokens ")
                .borders(Borders::ALL)
                .border_style(palette.border()),
        )
        .data(bars.as_slice())
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(palette.secondary))
        .value_style(Style::default().fg(palette.background).bg(palette.secondary))
        .label_style(Style::default().fg(palette.muted));
    frame.render_widget(chart, area);
}

fn latency_points(latency: &[u64]) -> Vec<(f64, f64)> {
    latency
        .iter()
        .enumerate()
        .map(|(i, ms)| (i as f64, *ms as f64))
        .collect()
}

/// Round the y-axis bound up to the next hundred so the peak never touches the frame
fn axis_ceiling(max: u64) -> u64 {
    (max / 100 + 1) * 100
}
