//! Cursor position and interaction mode.

use crate::ids::ViewId;
use stage_core::{Point, Rect};

/// What pointer motion currently does.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CursorMode {
    /// Motion is hit-tested and delivered to the surface under the pointer.
    #[default]
    Passthrough,
    /// The grabbed view follows the pointer, offset by `anchor`.
    Move { view: ViewId, anchor: Point<i32> },
    /// The bottom-right corner of the grabbed view follows the pointer.
    Resize { view: ViewId },
    /// Motion goes to the grabbed view, relative to its origin.
    Scroll { view: ViewId },
}

impl CursorMode {
    pub fn grabbed_view(&self) -> Option<ViewId> {
        match *self {
            CursorMode::Passthrough => None,
            CursorMode::Move { view, .. }
            | CursorMode::Resize { view }
            | CursorMode::Scroll { view } => Some(view),
        }
    }

    pub fn is_move_or_resize(&self) -> bool {
        matches!(self, CursorMode::Move { .. } | CursorMode::Resize { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cursor {
    /// Layout coordinates.
    pub position: Point<f64>,
    pub mode: CursorMode,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a relative motion, clamped to `bounds` when given.
    pub fn move_by(&mut self, dx: f64, dy: f64, bounds: Option<Rect>) {
        let target = self.position + Point::new(dx, dy);
        self.position = bounds.map_or(target, |b| b.clamp(target));
    }

    /// Maps normalized `[0, 1]` coordinates onto `bounds`.
    pub fn warp_normalized(&mut self, nx: f64, ny: f64, bounds: Option<Rect>) {
        if let Some(b) = bounds {
            let target = Point::new(
                f64::from(b.x) + nx * f64::from(b.width),
                f64::from(b.y) + ny * f64::from(b.height),
            );
            self.position = b.clamp(target);
        }
    }

    /// Drops the grab on `view`, if any.
    pub fn release_view(&mut self, view: ViewId) {
        if self.mode.grabbed_view() == Some(view) {
            self.mode = CursorMode::Passthrough;
        }
    }
}
