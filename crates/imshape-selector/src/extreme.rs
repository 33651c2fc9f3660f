//! Extremal selection: sort along an axis and group ties
//!
//! Projections are sorted (stable, so equal keys keep input order) and
//! split into tie groups wherever two adjacent values differ by more
//! than the linear tolerance. Grouping compares neighbours only, so a
//! chain of near-equal values can drift further than the tolerance and
//! still form one group.

use crate::ast::{Axis, ExtremeMode, Sign};
use crate::element::{AxisFrame, Selectable};
use crate::error::SelectionError;
use crate::predicate::projection;

/// A run of elements at the same position along the queried axis
#[derive(Debug, Clone, PartialEq)]
pub struct TieGroup {
    /// Element indices in sorted order
    pub indices: Vec<usize>,
    /// Projection of the first element of the group
    pub value: f64,
}

/// Sort candidate indices by projection and split them into tie groups
pub fn tie_groups<T: Selectable>(
    elements: &[T],
    candidates: &[usize],
    axis: Axis,
    sign: Sign,
    mode: ExtremeMode,
    frame: &AxisFrame,
    tolerance: f64,
) -> Vec<TieGroup> {
    let mut keyed: Vec<(usize, f64)> = candidates
        .iter()
        .map(|&i| (i, projection(&elements[i], axis, sign, frame)))
        .collect();

    match mode {
        ExtremeMode::Farthest => keyed.sort_by(|a, b| b.1.total_cmp(&a.1)),
        ExtremeMode::Closest => keyed.sort_by(|a, b| a.1.total_cmp(&b.1)),
    }

    let mut groups: Vec<TieGroup> = Vec::new();
    let mut previous: Option<f64> = None;

    for (index, key) in keyed {
        let joins = match (previous, groups.last_mut()) {
            (Some(prev), Some(group)) if (key - prev).abs() <= tolerance => {
                group.indices.push(index);
                true
            }
            _ => false,
        };
        if !joins {
            groups.push(TieGroup {
                indices: vec![index],
                value: key,
            });
        }
        previous = Some(key);
    }

    tracing::trace!(
        axis = axis.as_str(),
        candidates = candidates.len(),
        groups = groups.len(),
        "formed tie groups"
    );

    groups
}

/// Pick one tie group.
///
/// Without an index the first group is returned, or nothing when there
/// are no candidates. An explicit index must name an existing group.
pub fn pick_group(
    mut groups: Vec<TieGroup>,
    group_index: Option<usize>,
    predicate: impl FnOnce() -> String,
) -> Result<Vec<usize>, SelectionError> {
    let index = match group_index {
        None if groups.is_empty() => return Ok(Vec::new()),
        None => 0,
        Some(i) => i,
    };

    if index >= groups.len() {
        let predicate = predicate();
        tracing::warn!(
            index,
            groups = groups.len(),
            predicate = %predicate,
            "group index out of range"
        );
        return Err(SelectionError::GroupIndexOutOfRange {
            index,
            groups: groups.len(),
            predicate,
        });
    }

    Ok(groups.swap_remove(index).indices)
}
