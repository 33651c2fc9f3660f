//! Directional predicates
//!
//! Angles between an element direction and a frame axis are compared
//! through sine and cosine, which keeps precision near 0 and 90 degrees.

use crate::ast::{Axis, Sign};
use crate::config::SelectorConfig;
use crate::element::{unit_direction, AxisFrame, ElementKind, Selectable, Vec3};

/// Cosine and sine of the angle between a unit direction and a unit axis
fn angle_parts(direction: &Vec3, axis: &Vec3) -> (f64, f64) {
    (direction.dot(axis), direction.cross(axis).norm())
}

/// Direction points along `sign * axis`
pub fn is_aligned<T: Selectable + ?Sized>(
    element: &T,
    axis: Axis,
    sign: Sign,
    frame: &AxisFrame,
    config: &SelectorConfig,
) -> bool {
    let Some(direction) = unit_direction(element) else {
        return false;
    };
    let reference = frame.axis(axis) * sign.factor();
    let (cos, sin) = angle_parts(&direction, &reference);
    cos > 0.0 && sin <= config.angular_sine()
}

/// Direction is parallel to the axis, either sign
pub fn is_parallel<T: Selectable + ?Sized>(
    element: &T,
    axis: Axis,
    frame: &AxisFrame,
    config: &SelectorConfig,
) -> bool {
    let Some(direction) = unit_direction(element) else {
        return false;
    };
    let (_, sin) = angle_parts(&direction, &frame.axis(axis));
    sin <= config.angular_sine()
}

/// Direction is orthogonal to the axis
pub fn is_perpendicular<T: Selectable + ?Sized>(
    element: &T,
    axis: Axis,
    frame: &AxisFrame,
    config: &SelectorConfig,
) -> bool {
    let Some(direction) = unit_direction(element) else {
        return false;
    };
    let (cos, _) = angle_parts(&direction, &frame.axis(axis));
    cos.abs() <= config.angular_sine()
}

/// Candidate filter for `>X[n]` / `<X[n]`.
///
/// Points have no direction concept and always pass; edges and faces
/// must be parallel to the axis, so curved edges are dropped.
pub fn is_parallel_or_point<T: Selectable + ?Sized>(
    element: &T,
    axis: Axis,
    frame: &AxisFrame,
    config: &SelectorConfig,
) -> bool {
    element.kind() == ElementKind::Point || is_parallel(element, axis, frame, config)
}

/// Signed projection of an element's position onto a frame axis
pub fn projection<T: Selectable + ?Sized>(
    element: &T,
    axis: Axis,
    sign: Sign,
    frame: &AxisFrame,
) -> f64 {
    element.position().dot(&frame.axis(axis)) * sign.factor()
}
