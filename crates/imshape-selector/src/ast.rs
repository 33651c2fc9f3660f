//! Abstract Syntax Tree for selector queries
//!
//! This module defines the AST types produced by the selector parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deepest expression tree the parser builds or the evaluator accepts.
///
/// Parentheses and `not` count one level each while parsing; every
/// `and`, `or` and `not` node counts one level of tree depth.
pub const MAX_DEPTH: usize = 64;

/// Axis letter of the reference frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Sign applied to an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Multiplier applied to projections and axis vectors
    pub fn factor(&self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// Sort order of an extremal predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtremeMode {
    /// Largest signed projection first (`>`, `>>`)
    Farthest,
    /// Smallest signed projection first (`<`, `<<`)
    Closest,
}

/// A selector expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorExpr {
    /// Every element (`*`, `ALL`)
    All,

    /// Extremal group along an axis (`>X`, `<X`, `>>X[n]`, `<<X[n]`)
    AxisExtreme {
        axis: Axis,
        sign: Sign,
        mode: ExtremeMode,
        group_index: Option<usize>,
    },

    /// Extremal group among elements parallel to the axis (`>X[n]`, `<X[n]`)
    AxisParallelIndexed {
        axis: Axis,
        sign: Sign,
        group_index: Option<usize>,
    },

    /// Direction points along the signed axis (`+X`, `-X`)
    DirectionAligned { axis: Axis, sign: Sign },

    /// Direction parallel to the axis in either sign (`|X`)
    DirectionParallel { axis: Axis },

    /// Direction perpendicular to the axis (`#X`)
    DirectionPerpendicular { axis: Axis },

    /// Intersection of two expressions
    And(Box<SelectorExpr>, Box<SelectorExpr>),

    /// Union of two expressions
    Or(Box<SelectorExpr>, Box<SelectorExpr>),

    /// Complement of an expression
    Not(Box<SelectorExpr>),
}

impl SelectorExpr {
    /// Create an AND expression
    pub fn and(left: SelectorExpr, right: SelectorExpr) -> Self {
        SelectorExpr::And(Box::new(left), Box::new(right))
    }

    /// Create an OR expression
    pub fn or(left: SelectorExpr, right: SelectorExpr) -> Self {
        SelectorExpr::Or(Box::new(left), Box::new(right))
    }

    /// Create a NOT expression
    pub fn not(expr: SelectorExpr) -> Self {
        SelectorExpr::Not(Box::new(expr))
    }

    /// `>axis` with an optional group index
    pub fn farthest(axis: Axis, group_index: Option<usize>) -> Self {
        SelectorExpr::AxisExtreme {
            axis,
            sign: Sign::Positive,
            mode: ExtremeMode::Farthest,
            group_index,
        }
    }

    /// `<axis` with an optional group index
    pub fn closest(axis: Axis, group_index: Option<usize>) -> Self {
        SelectorExpr::AxisExtreme {
            axis,
            sign: Sign::Positive,
            mode: ExtremeMode::Closest,
            group_index,
        }
    }

    /// Height of the expression tree, counting an atom as 1.
    ///
    /// Walks the tree with an explicit stack so arbitrarily deep trees
    /// do not exhaust the call stack.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((expr, level)) = stack.pop() {
            deepest = deepest.max(level);
            match expr {
                SelectorExpr::And(left, right) | SelectorExpr::Or(left, right) => {
                    stack.push((left, level + 1));
                    stack.push((right, level + 1));
                }
                SelectorExpr::Not(inner) => stack.push((inner, level + 1)),
                _ => {}
            }
        }
        deepest
    }

    /// Check if this is an atomic expression (no operators)
    pub fn is_atomic(&self) -> bool {
        !matches!(
            self,
            SelectorExpr::And(_, _) | SelectorExpr::Or(_, _) | SelectorExpr::Not(_)
        )
    }
}

fn write_index(f: &mut fmt::Formatter<'_>, group_index: Option<usize>) -> fmt::Result {
    match group_index {
        Some(i) => write!(f, "[{}]", i),
        None => Ok(()),
    }
}

/// Precedence level used to decide where parentheses are needed
fn precedence(expr: &SelectorExpr) -> u8 {
    match expr {
        SelectorExpr::Or(_, _) => 1,
        SelectorExpr::And(_, _) => 2,
        _ => 3,
    }
}

fn write_operand(
    f: &mut fmt::Formatter<'_>,
    expr: &SelectorExpr,
    min_precedence: u8,
) -> fmt::Result {
    if precedence(expr) < min_precedence {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Renders the canonical query string.
///
/// Trees produced by the parser render to a string that parses back to
/// an equal tree. Hand-built trees render to a query that selects the
/// same elements: a negative-sign extreme prints as the opposite mode
/// and an unindexed parallel extreme prints as index 0.
impl fmt::Display for SelectorExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorExpr::All => write!(f, "*"),
            SelectorExpr::AxisExtreme {
                axis,
                sign,
                mode,
                group_index,
            } => {
                let farthest = match (sign, mode) {
                    (Sign::Positive, ExtremeMode::Farthest) => true,
                    (Sign::Negative, ExtremeMode::Closest) => true,
                    _ => false,
                };
                let op = match (farthest, group_index.is_some()) {
                    (true, false) => ">",
                    (true, true) => ">>",
                    (false, false) => "<",
                    (false, true) => "<<",
                };
                write!(f, "{}{}", op, axis.as_str())?;
                write_index(f, *group_index)
            }
            SelectorExpr::AxisParallelIndexed {
                axis,
                sign,
                group_index,
            } => {
                let op = match sign {
                    Sign::Positive => ">",
                    Sign::Negative => "<",
                };
                write!(f, "{}{}", op, axis.as_str())?;
                // The parallel restriction only exists in the bracketed form
                write_index(f, Some(group_index.unwrap_or(0)))
            }
            SelectorExpr::DirectionAligned { axis, sign } => {
                let op = match sign {
                    Sign::Positive => "+",
                    Sign::Negative => "-",
                };
                write!(f, "{}{}", op, axis.as_str())
            }
            SelectorExpr::DirectionParallel { axis } => write!(f, "|{}", axis.as_str()),
            SelectorExpr::DirectionPerpendicular { axis } => write!(f, "#{}", axis.as_str()),
            SelectorExpr::And(left, right) => {
                write_operand(f, left, 2)?;
                write!(f, " and ")?;
                write_operand(f, right, 3)
            }
            SelectorExpr::Or(left, right) => {
                write_operand(f, left, 1)?;
                write!(f, " or ")?;
                write_operand(f, right, 2)
            }
            SelectorExpr::Not(inner) => {
                write!(f, "not ")?;
                write_operand(f, inner, 3)
            }
        }
    }
}
