use std::{fmt::Display, io::Stdout};

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::{
    db::{HistoryStore, SqliteKvStore, models::GameHistoryEntry},
    stats::Window,
};

use super::types::{LogBuffer, Tab};

/// Main panel state container.
pub struct App {
    pub(in crate::ui) history: Vec<GameHistoryEntry>,
    pub(in crate::ui) tab: Tab,
    pub(in crate::ui) window: Window,
    pub(in crate::ui) logs: LogBuffer,
    pub(in crate::ui) store: Option<HistoryStore<SqliteKvStore>>,
}

impl App {
    pub fn new(
        history: Vec<GameHistoryEntry>,
        window: Window,
        logs: LogBuffer,
        store: Option<HistoryStore<SqliteKvStore>>,
    ) -> Self {
        Self {
            history,
            tab: Tab::Overview,
            window,
            logs,
            store,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        info!("Panel started");
        self.log(format!("Loaded {} game(s) from history", self.history.len()));

        loop {
            terminal.draw(|f| self.draw(f))?;

            let event = event::read()?;
            if let Event::Key(key) = event
                && super::handlers::InputHandler::new(self).handle_key(key)
            {
                return Ok(());
            }
        }
    }

    /// Games inside the selected window, oldest first.
    pub(in crate::ui) fn windowed(&self) -> &[GameHistoryEntry] {
        self.window.select(&self.history)
    }

    pub(in crate::ui) fn log(&self, msg: impl Into<String> + Display) {
        tracing::info!("{}", &msg);
        self.logs.push(msg.into());
    }

    /// Execute an async database operation from sync context
    pub(in crate::ui) fn run_db_operation<F, T>(&self, future: F) -> Result<T>
    where
        F: std::future::Future<Output = Result<T>>,
    {
        tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
    }
}
