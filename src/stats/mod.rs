//! Aggregated statistics over stored game history.

mod breakdown;
mod series;

pub use breakdown::{Breakdown, BucketStat, TableRow, breakdown, tab_summary};
pub use series::{ChartSeries, running_average_series, score_series};

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};

use crate::{db::models::GameHistoryEntry, recorder::SolvedRecord};

/// Number of best games listed in the overview.
pub const TOP_GAMES: usize = 3;

/// Which part of history the panel looks at.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Window {
    /// The most recent N games.
    Last(usize),
    Lifetime,
}

impl Window {
    /// The game-count choices offered by the panel.
    pub const CHOICES: [Window; 5] = [
        Window::Last(1),
        Window::Last(10),
        Window::Last(25),
        Window::Last(50),
        Window::Lifetime,
    ];

    /// Most recent games within this window, oldest first.
    pub fn select<'a>(&self, history: &'a [GameHistoryEntry]) -> &'a [GameHistoryEntry] {
        match *self {
            Window::Last(n) => &history[history.len().saturating_sub(n)..],
            Window::Lifetime => history,
        }
    }

    /// The next panel choice, wrapping around. Custom sizes jump to the first choice.
    pub fn next(&self) -> Window {
        let index = Self::CHOICES.iter().position(|w| w == self);
        match index {
            Some(i) => Self::CHOICES[(i + 1) % Self::CHOICES.len()],
            None => Self::CHOICES[0],
        }
    }

    pub fn previous(&self) -> Window {
        let len = Self::CHOICES.len();
        let index = Self::CHOICES.iter().position(|w| w == self);
        match index {
            Some(i) => Self::CHOICES[(i + len - 1) % len],
            None => Self::CHOICES[len - 1],
        }
    }

    pub fn label(&self) -> String {
        match self {
            Window::Last(1) => "Past 1 game".to_string(),
            Window::Last(n) => format!("Past {n} games"),
            Window::Lifetime => "Lifetime".to_string(),
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Window::Last(10)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Window::Last(n) => write!(f, "{n}"),
            Window::Lifetime => write!(f, "all"),
        }
    }
}

impl FromStr for Window {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case("lifetime") {
            return Ok(Window::Lifetime);
        }

        match s.parse::<usize>() {
            Ok(0) => Err("game count must be at least 1".to_string()),
            Ok(n) => Ok(Window::Last(n)),
            Err(_) => Err(format!("expected a game count or \"all\", got {s:?}")),
        }
    }
}

/// Summary of a window of games.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub game_count: usize,
    pub average_score: Option<f64>,
    pub top_games: Vec<TopGame>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopGame {
    pub score: u32,
    pub avg_time: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

pub fn overview(history: &[GameHistoryEntry]) -> Overview {
    if history.is_empty() {
        return Overview {
            game_count: 0,
            average_score: None,
            top_games: Vec::new(),
        };
    }

    let total: u64 = history.iter().map(|g| u64::from(g.score)).sum();
    let average_score = Some(total as f64 / history.len() as f64);

    // Stable sort keeps insertion order among equal scores.
    let mut ranked: Vec<&GameHistoryEntry> = history.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    let top_games = ranked
        .into_iter()
        .take(TOP_GAMES)
        .map(|g| TopGame {
            score: g.score,
            avg_time: g.avg_time,
            timestamp: g.timestamp,
        })
        .collect();

    Overview {
        game_count: history.len(),
        average_score,
        top_games,
    }
}

/// All solved records across the given games, in order.
pub fn flatten_records(history: &[GameHistoryEntry]) -> Vec<&SolvedRecord> {
    history.iter().flat_map(|g| g.solved.iter()).collect()
}

/// Mean of elapsed times, `None` when empty.
pub fn average_time<'a>(records: impl IntoIterator<Item = &'a SolvedRecord>) -> Option<f64> {
    let (count, total) = records
        .into_iter()
        .fold((0usize, 0.0), |(count, total), r| (count + 1, total + r.elapsed_seconds));

    if count == 0 {
        None
    } else {
        Some(total / count as f64)
    }
}

/// `"1.23s"` or `"N/A"`.
pub fn format_seconds(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}s"),
        None => "N/A".to_string(),
    }
}
