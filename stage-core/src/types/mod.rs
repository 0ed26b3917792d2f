//! Value types shared across the stage crates.
//!
//! - **Geometry**: [`Point`], [`Size`] and the integer [`Rect`] used for view,
//!   output and slot rectangles.
//! - **Color**: the RGBA [`Color`] used for decoration borders.

pub mod color;
pub mod geometry;

pub use color::Color;
pub use geometry::{Point, Rect, Size};
