//! Arithmetic property classification for parsed facts.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::problem::{Operator, ParsedFact};

pub const TABLE_MIN: i64 = 2;
pub const TABLE_MAX: i64 = 12;

/// The one attribute that matters for each operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum FactProperty {
    Addition { carry: bool },
    Subtraction { borrow: bool },
    Multiplication { table: Option<u8> },
    Division { table: Option<u8> },
}

impl FactProperty {
    pub fn operator(&self) -> Operator {
        match self {
            FactProperty::Addition { .. } => Operator::Add,
            FactProperty::Subtraction { .. } => Operator::Sub,
            FactProperty::Multiplication { .. } => Operator::Mul,
            FactProperty::Division { .. } => Operator::Div,
        }
    }

    /// Times table for multiplication and division facts, if in range.
    pub fn table(&self) -> Option<u8> {
        match self {
            FactProperty::Multiplication { table } | FactProperty::Division { table } => *table,
            _ => None,
        }
    }

    /// Carry for addition, borrow for subtraction.
    pub fn regrouping(&self) -> Option<bool> {
        match self {
            FactProperty::Addition { carry } => Some(*carry),
            FactProperty::Subtraction { borrow } => Some(*borrow),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedFact {
    pub a: i64,
    pub b: i64,
    #[serde(flatten)]
    pub property: FactProperty,
}

impl ClassifiedFact {
    pub fn operator(&self) -> Operator {
        self.property.operator()
    }

    pub fn fact(&self) -> ParsedFact {
        ParsedFact {
            a: self.a,
            b: self.b,
            op: self.operator(),
        }
    }
}

pub fn classify(fact: ParsedFact) -> ClassifiedFact {
    let ParsedFact { a, b, op } = fact;

    let property = match op {
        Operator::Add => FactProperty::Addition {
            carry: requires_carry(a.unsigned_abs(), b.unsigned_abs()),
        },
        Operator::Sub => {
            if a < b {
                warn!(a, b, "subtraction with smaller minuend; borrow runs past the leading digit");
            }
            FactProperty::Subtraction {
                borrow: requires_borrow(a.unsigned_abs(), b.unsigned_abs()),
            }
        }
        Operator::Mul => FactProperty::Multiplication {
            table: table_index(a),
        },
        Operator::Div => FactProperty::Division {
            table: table_index(b),
        },
    };

    ClassifiedFact { a, b, property }
}

/// True if long addition of `a` and `b` carries out of any digit position.
pub fn requires_carry(a: u64, b: u64) -> bool {
    let (mut a, mut b) = (a, b);

    while a > 0 || b > 0 {
        if a % 10 + b % 10 >= 10 {
            return true;
        }
        a /= 10;
        b /= 10;
    }

    false
}

/// True if long subtraction of `b` from `a` borrows at any digit position.
///
/// When `a < b` some position always borrows, so the result is `true`.
pub fn requires_borrow(a: u64, b: u64) -> bool {
    let (mut a, mut b) = (a, b);

    while a > 0 || b > 0 {
        if a % 10 < b % 10 {
            return true;
        }
        a /= 10;
        b /= 10;
    }

    false
}

fn table_index(n: i64) -> Option<u8> {
    if (TABLE_MIN..=TABLE_MAX).contains(&n) {
        u8::try_from(n).ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_op(op: Operator, a: i64, b: i64) -> FactProperty {
        classify(ParsedFact { a, b, op }).property
    }

    #[test]
    fn test_carry_examples() {
        assert_eq!(
            classify_op(Operator::Add, 19, 1),
            FactProperty::Addition { carry: true }
        );
        assert_eq!(
            classify_op(Operator::Add, 10, 20),
            FactProperty::Addition { carry: false }
        );
    }

    #[test]
    fn test_carry_in_higher_digit() {
        assert!(requires_carry(150, 60));
        assert!(requires_carry(500, 700));
        assert!(!requires_carry(1234, 4321));
    }

    #[test]
    fn test_carry_symmetric() {
        for a in 0..120u64 {
            for b in 0..120u64 {
                assert_eq!(requires_carry(a, b), requires_carry(b, a), "{a} + {b}");
            }
        }
    }

    #[test]
    fn test_borrow_examples() {
        assert_eq!(
            classify_op(Operator::Sub, 20, 11),
            FactProperty::Subtraction { borrow: true }
        );
        assert_eq!(
            classify_op(Operator::Sub, 25, 14),
            FactProperty::Subtraction { borrow: false }
        );
    }

    #[test]
    fn test_borrow_in_higher_digit() {
        assert!(requires_borrow(305, 150));
        assert!(!requires_borrow(999, 123));
        assert!(!requires_borrow(7, 0));
    }

    #[test]
    fn test_borrow_when_minuend_smaller() {
        assert!(requires_borrow(3, 12));
        assert!(requires_borrow(10, 11));
    }

    #[test]
    fn test_multiplication_table_uses_left_operand() {
        assert_eq!(
            classify_op(Operator::Mul, 7, 50),
            FactProperty::Multiplication { table: Some(7) }
        );
        assert_eq!(
            classify_op(Operator::Mul, 15, 3),
            FactProperty::Multiplication { table: None }
        );
    }

    #[test]
    fn test_division_table_uses_right_operand() {
        assert_eq!(
            classify_op(Operator::Div, 84, 12),
            FactProperty::Division { table: Some(12) }
        );
        assert_eq!(
            classify_op(Operator::Div, 84, 1),
            FactProperty::Division { table: None }
        );
    }

    #[test]
    fn test_table_bounds() {
        assert_eq!(table_index(1), None);
        assert_eq!(table_index(2), Some(2));
        assert_eq!(table_index(12), Some(12));
        assert_eq!(table_index(13), None);
        assert_eq!(table_index(-3), None);
    }

    #[test]
    fn test_classified_fact_keeps_operands() {
        let parsed = ParsedFact {
            a: 6,
            b: 9,
            op: Operator::Mul,
        };
        let classified = classify(parsed);
        assert_eq!(classified.fact(), parsed);
        assert_eq!(classified.operator(), Operator::Mul);
        assert_eq!(classified.property.table(), Some(6));
        assert_eq!(classified.property.regrouping(), None);
    }
}
