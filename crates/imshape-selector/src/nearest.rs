//! Proximity selection
//!
//! Picks, for each reference point, the element whose position is
//! closest to it. Useful when the element to pick is easier to point at
//! than to describe with a query.

use crate::element::{Selectable, Vec3};

/// Index of the element nearest to each reference point.
///
/// Ties resolve to the earlier element. Picks that land on the same
/// element collapse to one, keeping the order of first appearance.
pub fn nearest_to_points<T: Selectable>(elements: &[T], points: &[Vec3]) -> Vec<usize> {
    let mut result: Vec<usize> = Vec::with_capacity(points.len());

    for point in points {
        let nearest = elements
            .iter()
            .enumerate()
            .map(|(i, e)| (i, (e.position() - point).norm_squared()))
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, best_d)) if best_d <= d => best,
                _ => Some((i, d)),
            });

        if let Some((index, _)) = nearest {
            if !result.contains(&index) {
                result.push(index);
            }
        }
    }

    result
}
