//! Operator tabs: carry/borrow split or times-table bars.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    problem::Operator,
    stats::{self, Breakdown, BucketStat, format_seconds},
    ui::app::App,
};

const BAR_WIDTH: f64 = 40.0;

impl App {
    pub(in crate::ui) fn draw_breakdown(&self, f: &mut Frame, area: Rect, op: Operator) {
        let records = stats::flatten_records(self.windowed());
        let title = format!("{} | {}", op.name(), self.window.label());
        let block = Block::default().borders(Borders::ALL).title(title);

        if records.is_empty() {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  No data yet",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
            ];
            f.render_widget(Paragraph::new(text).block(block), area);
            return;
        }

        let lines = match stats::breakdown(records.iter().copied(), op) {
            Breakdown::Regrouping { op, with, without } => {
                let label = Breakdown::regrouping_label(op);
                let max = max_average([&with, &without]);
                vec![
                    Line::from(""),
                    bar_line(&format!("w/ {label}"), &with, max),
                    bar_line(&format!("no {label}"), &without, max),
                ]
            }
            Breakdown::Tables { rows, .. } => {
                let max = max_average(rows.iter().map(|r| &r.stat));
                std::iter::once(Line::from(""))
                    .chain(
                        rows.iter()
                            .map(|row| bar_line(&format!("{:>2}", row.table), &row.stat, max)),
                    )
                    .collect()
            }
        };

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn max_average<'a>(stats: impl IntoIterator<Item = &'a BucketStat>) -> f64 {
    stats
        .into_iter()
        .filter_map(|s| s.average)
        .fold(0.0, f64::max)
}

fn bar_line(label: &str, stat: &BucketStat, max: f64) -> Line<'static> {
    let bar_width = match stat.average {
        Some(avg) if max > 0.0 => ((avg / max) * BAR_WIDTH) as usize,
        _ => 0,
    };

    Line::from(vec![
        Span::raw(format!("  {label:<9} ")),
        Span::styled("█".repeat(bar_width), Style::default().fg(Color::Green)),
        Span::raw(format!(
            " {} ({} solved)",
            format_seconds(stat.average),
            stat.count
        )),
    ])
}
