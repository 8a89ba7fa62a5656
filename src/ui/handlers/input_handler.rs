//! Keyboard input handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::{app::App, types::Tab};
use super::PanelHandler;

/// Helper struct mapping key presses to panel actions.
pub struct InputHandler<'a> {
    app: &'a mut App,
}

impl<'a> InputHandler<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    /// Returns true when the panel should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q' | 'Q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.app.log("Exit requested");
                return true;
            }

            KeyCode::Char('q') | KeyCode::Esc => {
                self.app.log("Exit requested");
                return true;
            }

            KeyCode::Tab | KeyCode::Right => {
                let tab = self.app.tab.next();
                PanelHandler::new(self.app).select_tab(tab);
            }

            KeyCode::BackTab | KeyCode::Left => {
                let tab = self.app.tab.previous();
                PanelHandler::new(self.app).select_tab(tab);
            }

            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                PanelHandler::new(self.app).select_tab(Tab::ALL[index]);
            }

            KeyCode::Char('w' | ']') => PanelHandler::new(self.app).next_window(),

            KeyCode::Char('W' | '[') => PanelHandler::new(self.app).previous_window(),

            KeyCode::Char('r' | 'R') => PanelHandler::new(self.app).reload_history(),

            KeyCode::Char('s' | 'S') => PanelHandler::new(self.app).sweep_zero_scores(),

            _ => {}
        }
        false
    }
}
