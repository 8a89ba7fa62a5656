//! Numeric series for the score charts.

use crate::db::models::GameHistoryEntry;

/// Labelled values ready for a chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(x, y)` pairs with x counting from 1.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| ((i + 1) as f64, *v))
            .collect()
    }

    pub fn max_value(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }
}

fn game_labels(len: usize) -> Vec<String> {
    (1..=len).map(|i| i.to_string()).collect()
}

/// Score of each game in the window.
pub fn score_series(history: &[GameHistoryEntry]) -> ChartSeries {
    ChartSeries {
        labels: game_labels(history.len()),
        values: history.iter().map(|g| f64::from(g.score)).collect(),
    }
}

/// Mean score of all games up to and including each game.
pub fn running_average_series(history: &[GameHistoryEntry]) -> ChartSeries {
    let mut total = 0.0;
    let values = history
        .iter()
        .enumerate()
        .map(|(i, g)| {
            total += f64::from(g.score);
            total / (i + 1) as f64
        })
        .collect();

    ChartSeries {
        labels: game_labels(history.len()),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::scores;

    #[test]
    fn test_score_series() {
        let series = score_series(&scores(&[10, 30, 20]));

        assert_eq!(series.labels, vec!["1", "2", "3"]);
        assert_eq!(series.values, vec![10.0, 30.0, 20.0]);
        assert_eq!(series.max_value(), Some(30.0));
    }

    #[test]
    fn test_running_average_series() {
        let series = running_average_series(&scores(&[10, 30, 20]));

        assert_eq!(series.values, vec![10.0, 20.0, 20.0]);
        assert_eq!(series.points(), vec![(1.0, 10.0), (2.0, 20.0), (3.0, 20.0)]);
    }

    #[test]
    fn test_empty_series() {
        let series = running_average_series(&[]);

        assert!(series.is_empty());
        assert_eq!(series.max_value(), None);
    }
}
