//! Signals read from the drill page: problem, countdown, and score text.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    time::Duration,
};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

const SECONDS_LEFT_LABEL: &str = "Seconds left:";

/// Text content of the three page elements the tracker watches.
///
/// `None` means the element is not on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSignals {
    pub problem: Option<String>,
    pub timer: Option<String>,
    pub score: Option<String>,
}

impl PageSignals {
    /// Trimmed problem text, `None` if the element is missing or blank.
    pub fn problem_text(&self) -> Option<&str> {
        self.problem
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    /// Seconds left on the countdown, if the timer element shows one.
    pub fn seconds_left(&self) -> Option<i64> {
        self.timer.as_deref().and_then(parse_seconds_left)
    }

    /// Final score, if the score element shows digits.
    pub fn score(&self) -> Option<u32> {
        self.score.as_deref().and_then(parse_score)
    }
}

/// Extract the integer from text containing `Seconds left: <n>`; `n` may be negative.
pub fn parse_seconds_left(text: &str) -> Option<i64> {
    let start = text.find(SECONDS_LEFT_LABEL)? + SECONDS_LEFT_LABEL.len();
    let rest = text[start..].trim_start();

    let (negative, digits) = match rest.strip_prefix('-') {
        Some(stripped) => (true, stripped),
        None => (false, rest),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;

    Some(if negative { -value } else { value })
}

/// Extract the first run of ASCII digits, e.g. `"Score: 42"` gives 42.
///
/// Scores too large for `u32` saturate at `u32::MAX`.
pub fn parse_score(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    // A non-empty digit run only fails to parse on overflow.
    match rest[..end].parse() {
        Ok(score) => Some(score),
        Err(_) => {
            warn!(score_text = text, "score out of range, saturating");
            Some(u32::MAX)
        }
    }
}

/// One captured observation of the page, as written by a page capture script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureFrame {
    /// Milliseconds since the capture started.
    pub at_ms: u64,
    /// Wall-clock start of the capture, usually set on the first frame only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub problem: Option<String>,
    #[serde(default)]
    pub timer: Option<String>,
    #[serde(default)]
    pub score: Option<String>,
}

impl CaptureFrame {
    pub fn at(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }

    /// Wall-clock time of this frame for a capture that started at `origin`.
    pub fn wall_clock(&self, origin: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let offset = TimeDelta::try_milliseconds(i64::try_from(self.at_ms).ok()?)?;
        origin.checked_add_signed(offset)
    }

    pub fn signals(&self) -> PageSignals {
        PageSignals {
            problem: self.problem.clone(),
            timer: self.timer.clone(),
            score: self.score.clone(),
        }
    }
}

/// Read a JSON-lines capture file. Blank lines are skipped.
pub fn read_capture(path: &Path) -> Result<Vec<CaptureFrame>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open capture file {}", path.display()))?;

    parse_capture(BufReader::new(file))
        .with_context(|| format!("Failed to read capture file {}", path.display()))
}

pub fn parse_capture(reader: impl BufRead) -> Result<Vec<CaptureFrame>> {
    let mut frames = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let frame: CaptureFrame = serde_json::from_str(&line)
            .with_context(|| format!("Invalid capture frame on line {}", index + 1))?;
        frames.push(frame);
    }

    Ok(frames)
}

/// Forward live JSON-lines page signals into `sender` until `reader` is exhausted.
///
/// Lines that are not valid signals are skipped. Returns how many were forwarded.
pub fn forward_signals(reader: impl BufRead, sender: &watch::Sender<PageSignals>) -> Result<usize> {
    let mut forwarded = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read page signals")?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<PageSignals>(&line) {
            Ok(signals) => {
                sender.send_replace(signals);
                forwarded += 1;
            }
            Err(e) => warn!(line = index + 1, error = %e, "skipping invalid page signals"),
        }
    }

    debug!(forwarded, "page signal input closed");
    Ok(forwarded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds_left() {
        assert_eq!(parse_seconds_left("Seconds left: 120"), Some(120));
        assert_eq!(parse_seconds_left("Seconds left:0"), Some(0));
        assert_eq!(parse_seconds_left("Seconds left: -2"), Some(-2));
        assert_eq!(parse_seconds_left("  Seconds left:   7 "), Some(7));
    }

    #[test]
    fn test_parse_seconds_left_without_label() {
        assert_eq!(parse_seconds_left("120"), None);
        assert_eq!(parse_seconds_left("Seconds left: soon"), None);
        assert_eq!(parse_seconds_left(""), None);
    }

    #[test]
    fn test_parse_score() {
        assert_eq!(parse_score("Score: 42"), Some(42));
        assert_eq!(parse_score("Score: 0"), Some(0));
        assert_eq!(parse_score("Score: 17 (new best)"), Some(17));
        assert_eq!(parse_score("Score:"), None);
    }

    #[test]
    fn test_parse_score_saturates_on_overflow() {
        assert_eq!(parse_score("Score: 4294967296"), Some(u32::MAX));
        assert_eq!(parse_score("Score: 4294967295"), Some(u32::MAX));
    }

    #[test]
    fn test_capture_wall_clock() {
        let input = r#"{"at_ms": 0, "started_at": "2026-03-14T15:09:26Z", "problem": "1 + 1"}
{"at_ms": 2500, "problem": "2 + 2"}
"#;
        let frames = parse_capture(input.as_bytes()).unwrap();
        let origin = frames[0].started_at.unwrap();

        assert_eq!(frames[1].started_at, None);
        assert_eq!(
            frames[1].wall_clock(origin).unwrap().to_rfc3339(),
            "2026-03-14T15:09:28.500+00:00"
        );
    }

    #[test]
    fn test_forward_signals_keeps_latest_and_skips_bad_lines() {
        let input = r#"{"problem": "5 + 3", "timer": "Seconds left: 120"}
garbage

{"problem": "8 × 2", "timer": "Seconds left: 119", "score": "Score: 1"}
"#;
        let (tx, rx) = watch::channel(PageSignals::default());

        let forwarded = forward_signals(input.as_bytes(), &tx).unwrap();

        assert_eq!(forwarded, 2);
        let latest = rx.borrow().clone();
        assert_eq!(latest.problem_text(), Some("8 × 2"));
        assert_eq!(latest.score(), Some(1));
    }

    #[test]
    fn test_problem_text_treats_blank_as_missing() {
        let signals = PageSignals {
            problem: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(signals.problem_text(), None);

        let signals = PageSignals {
            problem: Some(" 4 + 4 ".to_string()),
            ..Default::default()
        };
        assert_eq!(signals.problem_text(), Some("4 + 4"));
    }

    #[test]
    fn test_parse_capture_lines() {
        let input = r#"{"at_ms": 0, "problem": "5 + 3", "timer": "Seconds left: 120"}

{"at_ms": 1500, "problem": "8 × 2", "timer": "Seconds left: 119", "score": "Score: 1"}
"#;

        let frames = parse_capture(input.as_bytes()).unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].score, None);
        assert_eq!(frames[1].at(), Duration::from_millis(1500));
        assert_eq!(frames[1].signals().score(), Some(1));
        assert_eq!(frames[1].signals().seconds_left(), Some(119));
    }

    #[test]
    fn test_parse_capture_reports_bad_line() {
        let input = "{\"at_ms\": 0}\nnot json\n";
        let err = parse_capture(input.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
