use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator glyphs in scan order. The first glyph present anywhere in the text wins.
const OPERATOR_GLYPHS: [(&str, Operator); 8] = [
    ("+", Operator::Add),
    ("\u{2212}", Operator::Sub), // minus sign
    ("\u{2013}", Operator::Sub), // en dash
    ("-", Operator::Sub),
    ("\u{00d7}", Operator::Mul),
    ("\u{00f7}", Operator::Div),
    ("*", Operator::Mul),
    ("/", Operator::Div),
];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "\u{2212}",
            Operator::Mul => "\u{00d7}",
            Operator::Div => "\u{00f7}",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operator::Add => "Addition",
            Operator::Sub => "Subtraction",
            Operator::Mul => "Multiplication",
            Operator::Div => "Division",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One arithmetic problem as read off the page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ParsedFact {
    pub a: i64,
    pub b: i64,
    pub op: Operator,
}

impl fmt::Display for ParsedFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.a, self.op.symbol(), self.b)
    }
}

/// Parse problem text such as `"12 × 7"` or `"45 - 18 ="`.
///
/// Returns `None` when no operator glyph is present or either operand is not
/// a base-10 integer.
pub fn parse(text: &str) -> Option<ParsedFact> {
    let (glyph, op) = OPERATOR_GLYPHS
        .iter()
        .find(|(glyph, _)| text.contains(glyph))?;

    let mut segments = text.split(glyph);
    let left = segments.next()?;
    let right = segments.next()?;

    let a = parse_operand(left)?;
    let b = parse_operand(right)?;

    Some(ParsedFact { a, b, op: *op })
}

fn parse_operand(segment: &str) -> Option<i64> {
    let trimmed = segment.trim();
    let trimmed = trimmed.strip_suffix('=').unwrap_or(trimmed).trim();
    trimmed.parse::<i64>().ok()
}
