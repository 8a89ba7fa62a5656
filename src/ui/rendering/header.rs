//! Tab bar and window selector.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::{
    stats::format_seconds,
    ui::{app::App, types::Tab},
};

impl App {
    pub(in crate::ui) fn draw_header(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(44)])
            .split(area);

        let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Zetamac | Tab/1-5: Switch"),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, chunks[0]);

        let last_avg = self.history.last().and_then(|g| g.avg_time);
        let selector = Paragraph::new(Line::from(vec![
            Span::styled(
                self.window.label(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  |  Last avg: "),
            Span::styled(format_seconds(last_avg), Style::default().fg(Color::Green)),
        ]))
        .block(Block::default().borders(Borders::ALL).title("w/W: Window"));
        f.render_widget(selector, chunks[1]);
    }
}
