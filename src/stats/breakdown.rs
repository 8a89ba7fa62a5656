//! Per-operator difficulty breakdowns.

use crate::{
    classify::{TABLE_MAX, TABLE_MIN},
    problem::Operator,
    recorder::SolvedRecord,
};

use super::{average_time, format_seconds};

/// Average time for one category of facts.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketStat {
    pub count: usize,
    pub average: Option<f64>,
}

impl BucketStat {
    fn from_records<'a>(records: impl IntoIterator<Item = &'a SolvedRecord>) -> Self {
        let records: Vec<&SolvedRecord> = records.into_iter().collect();
        Self {
            count: records.len(),
            average: average_time(records.iter().copied()),
        }
    }
}

/// One times-table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub table: u8,
    pub stat: BucketStat,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Breakdown {
    /// Addition (carry) or subtraction (borrow), split on whether regrouping happens.
    Regrouping {
        op: Operator,
        with: BucketStat,
        without: BucketStat,
    },
    /// Multiplication or division by times table, slowest first; empty tables last.
    Tables { op: Operator, rows: Vec<TableRow> },
}

impl Breakdown {
    pub fn op(&self) -> Operator {
        match self {
            Breakdown::Regrouping { op, .. } | Breakdown::Tables { op, .. } => *op,
        }
    }

    /// Label for the regrouping kind: "Carry" or "Borrow".
    pub fn regrouping_label(op: Operator) -> &'static str {
        match op {
            Operator::Sub => "Borrow",
            _ => "Carry",
        }
    }

    /// Plain-text lines, one per category.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Breakdown::Regrouping { op, with, without } => {
                let label = Self::regrouping_label(*op);
                vec![
                    format!("Avg w/ {label}: {}", format_seconds(with.average)),
                    format!("Avg w/ no {label}: {}", format_seconds(without.average)),
                ]
            }
            Breakdown::Tables { rows, .. } => rows
                .iter()
                .map(|row| format!("{}: {}", row.table, format_seconds(row.stat.average)))
                .collect(),
        }
    }
}

/// Average solve time per category for one operator.
pub fn breakdown<'a>(
    records: impl IntoIterator<Item = &'a SolvedRecord>,
    op: Operator,
) -> Breakdown {
    let records: Vec<&SolvedRecord> = records
        .into_iter()
        .filter(|r| r.fact.operator() == op)
        .collect();

    match op {
        Operator::Add | Operator::Sub => {
            let (with, without): (Vec<&SolvedRecord>, Vec<&SolvedRecord>) = records
                .into_iter()
                .partition(|r| r.fact.property.regrouping() == Some(true));

            Breakdown::Regrouping {
                op,
                with: BucketStat::from_records(with),
                without: BucketStat::from_records(without),
            }
        }
        Operator::Mul | Operator::Div => {
            let mut rows: Vec<TableRow> = (TABLE_MIN..=TABLE_MAX)
                .filter_map(|n| u8::try_from(n).ok())
                .map(|table| TableRow {
                    table,
                    stat: BucketStat::from_records(
                        records
                            .iter()
                            .copied()
                            .filter(|r| r.fact.property.table() == Some(table)),
                    ),
                })
                .collect();

            rows.sort_by(|a, b| match (a.stat.average, b.stat.average) {
                (Some(x), Some(y)) => y.total_cmp(&x),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });

            Breakdown::Tables { op, rows }
        }
    }
}

/// Text for an operator tab: "No data yet" when the window has no records at all.
pub fn tab_summary(records: &[&SolvedRecord], op: Operator) -> Vec<String> {
    if records.is_empty() {
        return vec!["No data yet".to_string()];
    }
    breakdown(records.iter().copied(), op).lines()
}
