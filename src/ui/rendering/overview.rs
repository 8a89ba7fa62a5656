//! Overview tab: window summary, best games and the score chart.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::{
    stats::{self, ChartSeries, Overview, format_seconds},
    ui::app::App,
};

impl App {
    pub(in crate::ui) fn draw_overview(&self, f: &mut Frame, area: Rect) {
        let games = self.windowed();
        let summary = stats::overview(games);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4 + stats::TOP_GAMES as u16), // Summary
                Constraint::Min(6),                              // Chart
            ])
            .split(area);

        draw_summary(f, chunks[0], &summary);
        draw_score_chart(
            f,
            chunks[1],
            &stats::score_series(games),
            &stats::running_average_series(games),
        );
    }
}

fn draw_summary(f: &mut Frame, area: Rect, summary: &Overview) {
    let average = summary
        .average_score
        .map(|a| format!("{}", a.round() as i64))
        .unwrap_or_else(|| "N/A".to_string());

    let mut lines = vec![Line::from(vec![
        Span::raw("  Total Games: "),
        Span::styled(
            summary.game_count.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  Average Score: "),
        Span::styled(
            average,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ])];

    lines.push(Line::from(""));
    if summary.top_games.is_empty() {
        lines.push(Line::from("  No completed games yet."));
    }
    for (i, game) in summary.top_games.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  #{}: ", i + 1),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!(
                "Score {} | Avg {}",
                game.score,
                format_seconds(game.avg_time)
            )),
            Span::styled(
                format!("  ({})", game.timestamp.format("%Y-%m-%d %H:%M")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Overview"));
    f.render_widget(paragraph, area);
}

/// First and last game labels of a series for the x-axis.
pub(in crate::ui) fn axis_labels(series: &ChartSeries) -> Vec<String> {
    match (series.labels.first(), series.labels.last()) {
        (Some(first), Some(last)) if series.labels.len() > 1 => vec![first.clone(), last.clone()],
        (Some(only), _) => vec![only.clone()],
        _ => Vec::new(),
    }
}

fn draw_score_chart(f: &mut Frame, area: Rect, scores: &ChartSeries, running: &ChartSeries) {
    let block = Block::default().borders(Borders::ALL).title("Scores");

    if scores.is_empty() {
        f.render_widget(
            Paragraph::new("No completed games yet.").block(block),
            area,
        );
        return;
    }

    let score_points = scores.points();
    let running_points = running.points();

    let x_max = (scores.values.len() as f64).max(2.0);
    let y_max = scores.max_value().unwrap_or(0.0).max(1.0).ceil();

    let datasets = vec![
        Dataset::default()
            .name("Score")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&score_points),
        Dataset::default()
            .name("Running avg")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&running_points),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Game")
                .style(Style::default().fg(Color::Gray))
                .bounds([1.0, x_max])
                .labels(axis_labels(scores)),
        )
        .y_axis(
            Axis::default()
                .title("Score")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(vec!["0".to_string(), format!("{}", y_max as u64)]),
        );

    f.render_widget(chart, area);
}
