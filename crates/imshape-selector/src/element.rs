//! Element model for selection
//!
//! The modeling kernel hands the selector a flat list of points, edges
//! and faces. Each carries a representative position; edges and faces
//! may also carry a direction (edge tangent or face normal).

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::ast::Axis;
use crate::error::ConfigError;

/// Position or direction vector
pub type Vec3 = Vector3<f64>;

/// Kind of geometric element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Point,
    Edge,
    Face,
}

impl ElementKind {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Point => "point",
            ElementKind::Edge => "edge",
            ElementKind::Face => "face",
        }
    }
}

/// Read access to the attributes the selector queries.
///
/// Implement this for your own handle types to select over them
/// directly instead of copying into [`Element`].
pub trait Selectable {
    /// Kind of the element
    fn kind(&self) -> ElementKind;

    /// Representative position (vertex, edge midpoint, face centroid)
    fn position(&self) -> Vec3;

    /// Edge tangent or face normal, `None` for points and curved edges
    fn direction(&self) -> Option<Vec3>;
}

impl<T: Selectable + ?Sized> Selectable for &T {
    fn kind(&self) -> ElementKind {
        (**self).kind()
    }

    fn position(&self) -> Vec3 {
        (**self).position()
    }

    fn direction(&self) -> Option<Vec3> {
        (**self).direction()
    }
}

/// A point, edge or face extracted from a shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    pub position: Vec3,
    pub direction: Option<Vec3>,
}

impl Element {
    /// Create a point
    pub fn point(position: Vec3) -> Self {
        Self {
            kind: ElementKind::Point,
            position,
            direction: None,
        }
    }

    /// Create a straight edge with the given tangent
    pub fn edge(midpoint: Vec3, direction: Vec3) -> Self {
        Self {
            kind: ElementKind::Edge,
            position: midpoint,
            direction: Some(direction),
        }
    }

    /// Create a curved edge, which never matches directional predicates
    pub fn curved_edge(midpoint: Vec3) -> Self {
        Self {
            kind: ElementKind::Edge,
            position: midpoint,
            direction: None,
        }
    }

    /// Create a face with the given normal
    pub fn face(centroid: Vec3, normal: Vec3) -> Self {
        Self {
            kind: ElementKind::Face,
            position: centroid,
            direction: Some(normal),
        }
    }
}

impl Selectable for Element {
    fn kind(&self) -> ElementKind {
        self.kind
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn direction(&self) -> Option<Vec3> {
        self.direction
    }
}

/// Unit direction of an element, if it has a usable one.
///
/// Zero-length and non-finite directions count as absent.
pub fn unit_direction<T: Selectable + ?Sized>(element: &T) -> Option<Vec3> {
    let d = element.direction()?;
    let norm = d.norm();
    if !norm.is_finite() || norm <= f64::EPSILON {
        return None;
    }
    Some(d / norm)
}

/// Reference directions for axis letters.
///
/// Axes are always unit vectors; deserialized frames are normalized the
/// same way as [`AxisFrame::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FrameAxes")]
pub struct AxisFrame {
    x: Vec3,
    y: Vec3,
    z: Vec3,
}

/// Serialized form of an [`AxisFrame`], before normalization
#[derive(Deserialize)]
struct FrameAxes {
    x: Vec3,
    y: Vec3,
    z: Vec3,
}

impl TryFrom<FrameAxes> for AxisFrame {
    type Error = ConfigError;

    fn try_from(axes: FrameAxes) -> Result<Self, Self::Error> {
        AxisFrame::new(axes.x, axes.y, axes.z)
    }
}

impl Default for AxisFrame {
    fn default() -> Self {
        Self::global()
    }
}

fn unit_axis(name: &str, v: Vec3) -> Result<Vec3, ConfigError> {
    let norm = v.norm();
    if !norm.is_finite() || norm <= f64::EPSILON {
        return Err(ConfigError::Invalid(format!(
            "frame axis {} must be finite and non-zero, got [{}, {}, {}]",
            name, v.x, v.y, v.z
        )));
    }
    Ok(v / norm)
}

impl AxisFrame {
    /// The global X/Y/Z frame
    pub fn global() -> Self {
        Self {
            x: Vec3::x(),
            y: Vec3::y(),
            z: Vec3::z(),
        }
    }

    /// Create a frame from three axis vectors, normalizing each.
    ///
    /// Zero-length and non-finite axes are rejected.
    pub fn new(x: Vec3, y: Vec3, z: Vec3) -> Result<Self, ConfigError> {
        Ok(Self {
            x: unit_axis("x", x)?,
            y: unit_axis("y", y)?,
            z: unit_axis("z", z)?,
        })
    }

    /// Frame of a working plane rotated away from the global axes
    pub fn from_rotation(rotation: UnitQuaternion<f64>) -> Self {
        Self {
            x: rotation * Vec3::x(),
            y: rotation * Vec3::y(),
            z: rotation * Vec3::z(),
        }
    }

    /// Get the direction vector for an axis letter
    pub fn axis(&self, axis: Axis) -> Vec3 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_constructors() {
        let p = Element::point(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(p.kind, ElementKind::Point);
        assert!(p.direction.is_none());

        let e = Element::edge(Vec3::zeros(), Vec3::x());
        assert_eq!(e.kind, ElementKind::Edge);
        assert_eq!(e.direction, Some(Vec3::x()));

        let c = Element::curved_edge(Vec3::zeros());
        assert_eq!(c.kind, ElementKind::Edge);
        assert!(c.direction.is_none());
    }

    #[test]
    fn test_unit_direction() {
        let f = Element::face(Vec3::zeros(), Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(unit_direction(&f), Some(Vec3::z()));

        let degenerate = Element::edge(Vec3::zeros(), Vec3::zeros());
        assert_eq!(unit_direction(&degenerate), None);

        let nan = Element::edge(Vec3::zeros(), Vec3::new(f64::NAN, 0.0, 0.0));
        assert_eq!(unit_direction(&nan), None);
    }

    #[test]
    fn test_rotated_frame() {
        let frame = AxisFrame::from_rotation(UnitQuaternion::from_axis_angle(
            &Vector3::z_axis(),
            FRAC_PI_2,
        ));
        assert!((frame.axis(Axis::X) - Vec3::y()).norm() < 1e-12);
        assert!((frame.axis(Axis::Y) + Vec3::x()).norm() < 1e-12);
        assert!((frame.axis(Axis::Z) - Vec3::z()).norm() < 1e-12);
    }

    #[test]
    fn test_new_normalizes_axes() {
        let frame = AxisFrame::new(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 0.5),
        )
        .unwrap();
        assert_eq!(frame, AxisFrame::global());
    }

    #[test]
    fn test_new_rejects_degenerate_axis() {
        let err = AxisFrame::new(Vec3::zeros(), Vec3::y(), Vec3::z()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let nan = Vec3::new(f64::NAN, 0.0, 1.0);
        assert!(AxisFrame::new(Vec3::x(), Vec3::y(), nan).is_err());
    }

    #[test]
    fn test_deserialized_frame_is_normalized() {
        let json = r#"{"x":[10,0,0],"y":[0,3,0],"z":[0,0,0.25]}"#;
        let frame: AxisFrame = serde_json::from_str(json).unwrap();
        assert!((frame.axis(Axis::X).norm() - 1.0).abs() < 1e-12);
        assert_eq!(frame, AxisFrame::global());
    }

    #[test]
    fn test_deserialize_rejects_zero_axis() {
        let json = r#"{"x":[0,0,0],"y":[0,1,0],"z":[0,0,1]}"#;
        assert!(serde_json::from_str::<AxisFrame>(json).is_err());
    }

    #[test]
    fn test_reference_is_selectable() {
        let p = Element::point(Vec3::new(0.0, 1.0, 0.0));
        let r = &p;
        assert_eq!(Selectable::kind(&r), ElementKind::Point);
        assert_eq!(Selectable::position(&r), Vec3::y());
    }
}
