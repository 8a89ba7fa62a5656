mod breakdown;
mod header;
mod logs;
mod overview;

#[cfg(test)]
pub(in crate::ui) use overview::axis_labels;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::ui::{app::App, types::Tab};

impl App {
    pub(in crate::ui) fn draw(&self, f: &mut Frame) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tabs and window selector
                Constraint::Min(10),   // Tab content
                Constraint::Length(6), // Small log panel
            ])
            .split(f.area());

        self.draw_header(f, layout[0]);

        match self.tab {
            Tab::Overview => self.draw_overview(f, layout[1]),
            Tab::Operation(op) => self.draw_breakdown(f, layout[1], op),
        }

        self.draw_logs(f, layout[2]);
    }
}
