mod app;
mod handlers;
mod rendering;
#[cfg(test)]
mod tests;
mod types;

pub use app::App;
pub use types::{LogBuffer, Tab};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::stdout;

use crate::{
    db::{HistoryStore, SqliteKvStore},
    stats::Window,
};

/// Entry point for running the summary panel.
pub async fn run_ui(store: HistoryStore<SqliteKvStore>, window: Window) -> Result<()> {
    let history = store.read_all().await?;
    let logs = LogBuffer::new();

    let mut app = App::new(history, window, logs, Some(store));

    let mut stdout = stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
