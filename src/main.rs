use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info, warn};

use zetamac_tracker::{
    args::{Args, Command, StatsTab},
    config::Config,
    db::{self, HistoryStore, SqliteKvStore},
    error::TrackerError,
    logging,
    page::{self, PageSignals, read_capture},
    scheduler::CancellationToken,
    stats::{self, Window, format_seconds},
    tracker::{LiveProgress, Tracker, TrackerOutcome},
    ui::run_ui,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    let _log_guard =
        logging::init(&config.logging, &config.log_dir()).context("Failed to initialize logging")?;

    let db_path = config.database_path()?;
    let pool = db::create_pool(&db_path)
        .await
        .with_context(|| format!("Failed to open history database {}", db_path.display()))?;
    let history = HistoryStore::with_key(SqliteKvStore::new(pool), &config.storage.history_key);

    match args.command {
        Command::Replay { capture } => replay(&capture, &history, &config).await,
        Command::Track => track(&history, &config).await,
        Command::Stats { window, tab } => print_stats(&history, window, tab).await,
        Command::Panel { window } => {
            let window = match window {
                Some(window) => window,
                None => config.panel_window()?,
            };
            run_ui(history, window).await
        }
        Command::Sweep => {
            let removed = history.sweep_zero_scores().await?;
            println!("Removed {removed} zero-score game(s)");
            Ok(())
        }
    }
}

async fn replay(
    capture: &std::path::Path,
    history: &HistoryStore<SqliteKvStore>,
    config: &Config,
) -> Result<()> {
    let frames = read_capture(capture)?;
    info!(frames = frames.len(), path = %capture.display(), "replaying capture");

    let tracker = Tracker::with_frame_interval(config.frame_interval());
    report_outcome(tracker.replay(&frames, history).await)
}

async fn track(history: &HistoryStore<SqliteKvStore>, config: &Config) -> Result<()> {
    let (page_tx, page_rx) = watch::channel(PageSignals::default());
    let (progress_tx, mut progress_rx) = watch::channel(LiveProgress::default());
    let cancel = CancellationToken::new();

    // Blocking stdin reads stay off the runtime.
    std::thread::spawn(move || {
        if let Err(e) = page::forward_signals(std::io::stdin().lock(), &page_tx) {
            warn!(error = %e, "page signal input failed");
        }
    });

    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            let progress = *progress_rx.borrow_and_update();
            eprintln!(
                "Solved {} | avg {}",
                progress.solved,
                format_seconds(progress.avg_time)
            );
        }
    });

    info!(frame_interval = ?config.frame_interval(), "tracking live game");
    let tracker = Tracker::with_frame_interval(config.frame_interval()).with_progress(progress_tx);
    report_outcome(tracker.run(page_rx, history, &cancel).await)
}

fn report_outcome(result: Result<TrackerOutcome, TrackerError>) -> Result<()> {
    match result {
        Ok(TrackerOutcome::Saved(entry)) => {
            println!(
                "Saved game: score {} | {} solved | avg {} | {:.1}s",
                entry.score,
                entry.solved.len(),
                format_seconds(entry.avg_time),
                entry.duration
            );
        }
        Ok(TrackerOutcome::Discarded { solved }) => {
            println!("Discarded zero-score game ({solved} solved)");
        }
        Ok(TrackerOutcome::Incomplete { solved }) => {
            println!("Input ended before the game finished ({solved} solved)");
        }
        Ok(TrackerOutcome::Cancelled) => println!("Tracking cancelled"),
        Err(TrackerError::Persist { entry, source }) => {
            error!(error = %source, "game could not be stored");
            // Hand the finished game to the user so it is not lost.
            eprintln!("{}", serde_json::to_string(&entry)?);
            return Err(source).context("Failed to save finished game");
        }
    }

    Ok(())
}

async fn print_stats(
    history: &HistoryStore<SqliteKvStore>,
    window: Window,
    tab: StatsTab,
) -> Result<()> {
    let all = history.read_all().await?;
    let games = window.select(&all);

    println!("{}", window.label());

    match tab.operator() {
        None => {
            let summary = stats::overview(games);
            let average = summary
                .average_score
                .map(|a| format!("{}", a.round() as i64))
                .unwrap_or_else(|| "N/A".to_string());

            println!("Total Games: {}", summary.game_count);
            println!("Average Score: {average}");

            if summary.top_games.is_empty() {
                println!("No completed games yet.");
            }
            for (i, game) in summary.top_games.iter().enumerate() {
                println!(
                    "#{}: Score {} | Avg {}",
                    i + 1,
                    game.score,
                    format_seconds(game.avg_time)
                );
            }
        }
        Some(op) => {
            println!("{}", op.name());
            let records = stats::flatten_records(games);
            for line in stats::tab_summary(&records, op) {
                println!("{line}");
            }
        }
    }

    Ok(())
}
