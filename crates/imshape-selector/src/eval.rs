//! Expression evaluation for selection
//!
//! Evaluates selector expressions against a slice of elements. Every
//! node yields an ordered list of element indices without duplicates.
//! Leaf filters keep input order; extremal predicates keep their sorted
//! order; `and`/`or` keep the order of their left operand.

use crate::ast::*;
use crate::config::SelectorConfig;
use crate::element::{AxisFrame, Selectable};
use crate::error::SelectionError;
use crate::extreme::{pick_group, tie_groups};
use crate::predicate::{is_aligned, is_parallel, is_parallel_or_point, is_perpendicular};

/// Result type for evaluation
pub type EvalResult<T> = Result<T, SelectionError>;

/// Evaluator for selector expressions
pub struct Evaluator<'a, T: Selectable> {
    elements: &'a [T],
    frame: &'a AxisFrame,
    config: &'a SelectorConfig,
}

impl<'a, T: Selectable> Evaluator<'a, T> {
    /// Create a new evaluator
    pub fn new(elements: &'a [T], frame: &'a AxisFrame, config: &'a SelectorConfig) -> Self {
        Self {
            elements,
            frame,
            config,
        }
    }

    /// Evaluate an expression, returning selected indices.
    ///
    /// Trees deeper than [`MAX_DEPTH`] are rejected before evaluation.
    pub fn evaluate(&self, expr: &SelectorExpr) -> EvalResult<Vec<usize>> {
        let depth = expr.depth();
        if depth > MAX_DEPTH {
            return Err(SelectionError::TooDeep {
                depth,
                limit: MAX_DEPTH,
            });
        }
        self.evaluate_node(expr)
    }

    fn evaluate_node(&self, expr: &SelectorExpr) -> EvalResult<Vec<usize>> {
        match expr {
            SelectorExpr::All => Ok((0..self.elements.len()).collect()),

            SelectorExpr::DirectionAligned { axis, sign } => Ok(self.filter(|e| {
                is_aligned(e, *axis, *sign, self.frame, self.config)
            })),

            SelectorExpr::DirectionParallel { axis } => {
                Ok(self.filter(|e| is_parallel(e, *axis, self.frame, self.config)))
            }

            SelectorExpr::DirectionPerpendicular { axis } => {
                Ok(self.filter(|e| is_perpendicular(e, *axis, self.frame, self.config)))
            }

            SelectorExpr::AxisExtreme {
                axis,
                sign,
                mode,
                group_index,
            } => {
                let candidates: Vec<usize> = (0..self.elements.len()).collect();
                self.evaluate_extreme(expr, &candidates, *axis, *sign, *mode, *group_index)
            }

            SelectorExpr::AxisParallelIndexed {
                axis,
                sign,
                group_index,
            } => {
                let candidates =
                    self.filter(|e| is_parallel_or_point(e, *axis, self.frame, self.config));
                // Only the bracketed form exists, so a missing index means [0]
                self.evaluate_extreme(
                    expr,
                    &candidates,
                    *axis,
                    *sign,
                    ExtremeMode::Farthest,
                    Some(group_index.unwrap_or(0)),
                )
            }

            SelectorExpr::And(left, right) => {
                let left = self.evaluate_node(left)?;
                let right = mask_of(&self.evaluate_node(right)?, self.elements.len());
                Ok(left.into_iter().filter(|&i| right[i]).collect())
            }

            SelectorExpr::Or(left, right) => {
                let mut result = self.evaluate_node(left)?;
                let mut seen = mask_of(&result, self.elements.len());
                for i in self.evaluate_node(right)? {
                    if !seen[i] {
                        seen[i] = true;
                        result.push(i);
                    }
                }
                Ok(result)
            }

            SelectorExpr::Not(inner) => {
                let excluded = mask_of(&self.evaluate_node(inner)?, self.elements.len());
                Ok(selected_indices(&invert_mask(&excluded)))
            }
        }
    }

    /// Indices of elements matching a per-element predicate, in input order
    fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(i, e)| predicate(e).then_some(i))
            .collect()
    }

    fn evaluate_extreme(
        &self,
        expr: &SelectorExpr,
        candidates: &[usize],
        axis: Axis,
        sign: Sign,
        mode: ExtremeMode,
        group_index: Option<usize>,
    ) -> EvalResult<Vec<usize>> {
        let groups = tie_groups(
            self.elements,
            candidates,
            axis,
            sign,
            mode,
            self.frame,
            self.config.linear_tolerance,
        );
        pick_group(groups, group_index, || expr.to_string())
    }
}

/// Boolean membership mask of `len` elements for a list of indices
pub fn mask_of(indices: &[usize], len: usize) -> Vec<bool> {
    let mut mask = vec![false; len];
    for &i in indices {
        mask[i] = true;
    }
    mask
}

/// Get indices of selected elements
pub fn selected_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &b)| if b { Some(i) } else { None })
        .collect()
}

/// Invert a selection mask
pub fn invert_mask(mask: &[bool]) -> Vec<bool> {
    mask.iter().map(|&b| !b).collect()
}
