use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::{problem::Operator, stats::Window};

#[derive(Parser)]
#[command(name = "zetamac-tracker", version, about = "Track Zetamac arithmetic drill games")]
pub struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replay a captured page trace and store the finished game
    Replay {
        /// JSON lines capture: at_ms, problem, timer, score
        capture: PathBuf,
    },

    /// Track a live game from JSON-lines page signals on stdin
    Track,

    /// Print statistics for stored games
    Stats {
        /// Number of most recent games, or "all"
        #[arg(long, default_value = "10")]
        window: Window,

        #[arg(long, value_enum, default_value_t = StatsTab::Overview)]
        tab: StatsTab,
    },

    /// Open the interactive summary panel
    Panel {
        /// Initial game-count window; defaults to the configured one
        #[arg(long)]
        window: Option<Window>,
    },

    /// Remove zero-score games from history
    Sweep,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatsTab {
    Overview,
    Add,
    Sub,
    Mul,
    Div,
}

impl StatsTab {
    pub fn operator(&self) -> Option<Operator> {
        match self {
            StatsTab::Overview => None,
            StatsTab::Add => Some(Operator::Add),
            StatsTab::Sub => Some(Operator::Sub),
            StatsTab::Mul => Some(Operator::Mul),
            StatsTab::Div => Some(Operator::Div),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stats_with_window_and_tab() {
        let args = Args::parse_from(["zetamac-tracker", "stats", "--window", "all", "--tab", "mul"]);

        match args.command {
            Command::Stats { window, tab } => {
                assert_eq!(window, Window::Lifetime);
                assert_eq!(tab.operator(), Some(Operator::Mul));
            }
            _ => panic!("expected stats command"),
        }
    }

    #[test]
    fn test_stats_defaults() {
        let args = Args::parse_from(["zetamac-tracker", "stats"]);

        match args.command {
            Command::Stats { window, tab } => {
                assert_eq!(window, Window::Last(10));
                assert!(tab == StatsTab::Overview);
            }
            _ => panic!("expected stats command"),
        }
    }

    #[test]
    fn test_global_config_after_subcommand() {
        let args = Args::parse_from(["zetamac-tracker", "sweep", "--config", "/tmp/z.toml"]);

        assert!(matches!(args.command, Command::Sweep));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/z.toml")));
    }

    #[test]
    fn test_parse_track() {
        let args = Args::parse_from(["zetamac-tracker", "track", "--config", "/tmp/z.toml"]);

        assert!(matches!(args.command, Command::Track));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/z.toml")));
    }

    #[test]
    fn test_zero_window_rejected() {
        let result = Args::try_parse_from(["zetamac-tracker", "stats", "--window", "0"]);
        assert!(result.is_err());
    }
}
