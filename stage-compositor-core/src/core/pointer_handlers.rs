use super::state::Stage;
use crate::backend::Backend;
use crate::error::Result;
use crate::ids::ViewId;
use crate::input::cursor::CursorMode;
use crate::input::{AxisEvent, ButtonEvent, ButtonState, BTN_LEFT, BTN_RIGHT};
use stage_core::{Point, Rect};
use tracing::debug;

impl<B: Backend> Stage<B> {
    /// Relative pointer motion.
    pub fn handle_pointer_motion(&mut self, time_msec: u32, dx: f64, dy: f64) -> Result<()> {
        let bounds = self.outputs.layout_box();
        self.cursor.move_by(dx, dy, bounds);
        self.process_cursor_motion(time_msec)
    }

    /// Absolute pointer motion in normalized `[0, 1]` coordinates.
    pub fn handle_pointer_motion_absolute(&mut self, time_msec: u32, nx: f64, ny: f64) -> Result<()> {
        let bounds = self.outputs.layout_box();
        self.cursor.warp_normalized(nx, ny, bounds);
        self.process_cursor_motion(time_msec)
    }

    fn process_cursor_motion(&mut self, time_msec: u32) -> Result<()> {
        if self.lock.is_locked() {
            return Ok(());
        }
        let position = self.cursor.position;
        match self.cursor.mode {
            CursorMode::Passthrough => self.passthrough_motion(time_msec),
            CursorMode::Move { view, anchor } => {
                let geometry = self.try_view(view)?.geometry;
                let x = (position.x - f64::from(anchor.x)) as i32;
                let y = (position.y - f64::from(anchor.y)) as i32;
                self.apply_geometry(view, Rect::new(x, y, geometry.width, geometry.height))
            }
            CursorMode::Resize { view } => {
                let geometry = self.try_view(view)?.geometry;
                let width = ((position.x - f64::from(geometry.x)) as i32).max(1);
                let height = ((position.y - f64::from(geometry.y)) as i32).max(1);
                self.apply_geometry(view, Rect::new(geometry.x, geometry.y, width, height))
            }
            CursorMode::Scroll { view } => {
                let origin = self.try_view(view)?.geometry.origin();
                self.backend.pointer_motion(time_msec, position - origin.to_f64());
                Ok(())
            }
        }
    }

    fn passthrough_motion(&mut self, time_msec: u32) -> Result<()> {
        let hit = self.backend.node_at(self.cursor.position);
        let view = hit.and_then(|h| self.views.by_node(h.node));
        if view.is_none() {
            self.backend.set_cursor_image("left_ptr");
        }
        match hit.and_then(|h| h.surface.map(|s| (s, h.local))) {
            Some((surface, local)) => {
                self.backend.pointer_enter(surface, local);
                self.backend.pointer_motion(time_msec, local);
                self.focus(view)
            }
            None => {
                self.backend.pointer_clear_focus();
                Ok(())
            }
        }
    }

    /// The toplevel under the pointer.
    fn toplevel_at_cursor(&self) -> Option<ViewId> {
        self.backend
            .node_at(self.cursor.position)
            .and_then(|hit| self.views.by_node(hit.node))
            .filter(|id| self.views.get(*id).is_some_and(|v| v.is_toplevel()))
    }

    pub fn handle_pointer_button(&mut self, event: &ButtonEvent) -> Result<()> {
        if self.lock.is_locked() {
            return Ok(());
        }
        let pressed = event.state == ButtonState::Pressed;
        if !pressed && self.cursor.mode.is_move_or_resize() {
            self.cursor.mode = CursorMode::Passthrough;
            return Ok(());
        }
        let Some(view) = self.toplevel_at_cursor() else {
            self.cursor.mode = CursorMode::Passthrough;
            self.backend.pointer_button(event);
            return Ok(());
        };

        let mods = self.modifiers.mask();
        let primary = self.settings.bindings.primary();
        if mods.contains(primary) && pressed {
            let (origin, node) = {
                let v = self.try_view(view)?;
                (v.geometry.origin(), v.node)
            };
            match event.button {
                BTN_LEFT => {
                    let anchor = self.cursor.position.to_i32() - origin;
                    self.cursor.mode = CursorMode::Move { view, anchor };
                    self.backend.raise_to_top(node);
                    debug!("Move grab on {}", view);
                }
                BTN_RIGHT => {
                    self.cursor.mode = CursorMode::Resize { view };
                    self.backend.raise_to_top(node);
                    debug!("Resize grab on {}", view);
                }
                _ => {}
            }
            return Ok(());
        }

        if mods.is_empty() && event.button == BTN_LEFT {
            self.cursor.mode = if pressed {
                CursorMode::Scroll { view }
            } else {
                CursorMode::Passthrough
            };
        }
        self.backend.pointer_button(event);
        Ok(())
    }

    pub fn handle_pointer_axis(&mut self, event: &AxisEvent) {
        self.backend.pointer_axis(event);
    }

    pub fn handle_pointer_frame(&mut self) {
        self.backend.pointer_frame();
    }

    /// Current pointer position in layout coordinates.
    pub fn cursor_position(&self) -> Point<f64> {
        self.cursor.position
    }
}
