//! imshape-selector - String selectors for shape elements
//!
//! This crate picks points, edges or faces of a 3D shape with a short
//! query instead of enumerating them by index:
//!
//! # Query Syntax
//!
//! - **All**: `*`, `ALL`
//! - **Extremes**: `>Z` (farthest along +Z), `<Z` (closest), `>>Y[1]`
//!   (second tie group), `<<X[2]`
//! - **Parallel-restricted extremes**: `>Z[1]`, `<X[0]`
//! - **Direction filters**: `+Z`, `-X`, `|Z` (parallel), `#Z` (perpendicular)
//! - **Set operations**: `|Z and >X`, `not <X`, `(|X or |Y) and >Z`
//!
//! # Examples
//!
//! ```ignore
//! use imshape_selector::{select, Element, Vec3};
//!
//! let faces = vec![
//!     Element::face(Vec3::new(0.0, 0.0, 1.0), Vec3::z()),
//!     Element::face(Vec3::new(0.0, 0.0, 0.0), -Vec3::z()),
//! ];
//! let top = select(">Z", &faces)?;
//! assert_eq!(top.indices(), &[0]);
//! ```

pub mod ast;
pub mod config;
pub mod element;
pub mod engine;
pub mod error;
pub mod eval;
pub mod extreme;
pub mod nearest;
pub mod parser;
pub mod predicate;

pub use ast::*;
pub use config::*;
pub use element::*;
pub use engine::*;
pub use error::*;
pub use eval::*;
pub use extreme::*;
pub use nearest::*;
pub use parser::*;
pub use predicate::*;
