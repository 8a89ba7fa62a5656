//! Panel state management: tabs, game-count window, and history refresh.

use super::super::{app::App, types::Tab};

/// Helper struct for panel state transitions.
pub struct PanelHandler<'a> {
    app: &'a mut App,
}

impl<'a> PanelHandler<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.app.tab != tab {
            self.app.tab = tab;
            self.app.log(format!("Showing {} tab", tab.title()));
        }
    }

    pub fn next_window(&mut self) {
        self.app.window = self.app.window.next();
        self.app.log(format!("Window: {}", self.app.window.label()));
    }

    pub fn previous_window(&mut self) {
        self.app.window = self.app.window.previous();
        self.app.log(format!("Window: {}", self.app.window.label()));
    }

    /// Re-read history from the store.
    pub fn reload_history(&mut self) {
        let Some(store) = &self.app.store else {
            self.app.log("No history store attached");
            return;
        };

        let result = self.app.run_db_operation(async {
            store.read_all().await.map_err(anyhow::Error::from)
        });

        match result {
            Ok(history) => {
                self.app.history = history;
                self.app
                    .log(format!("Reloaded {} game(s)", self.app.history.len()));
            }
            Err(e) => self.app.log(format!("Failed to reload history: {e}")),
        }
    }

    /// Remove zero-score games from the store, then reload.
    pub fn sweep_zero_scores(&mut self) {
        let Some(store) = &self.app.store else {
            // Without a store, filter the in-memory copy.
            let before = self.app.history.len();
            self.app.history.retain(|g| !g.is_false_start());
            let removed = before - self.app.history.len();
            self.app.log(format!("Removed {removed} zero-score game(s)"));
            return;
        };

        let result = self.app.run_db_operation(async {
            store.sweep_zero_scores().await.map_err(anyhow::Error::from)
        });

        match result {
            Ok(removed) => {
                self.app
                    .log(format!("Removed {removed} zero-score game(s)"));
                self.reload_history();
            }
            Err(e) => self.app.log(format!("Sweep failed: {e}")),
        }
    }
}
