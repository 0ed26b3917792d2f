//! The capability surface the policy core drives.
//!
//! A [`Backend`] owns rendering, protocol objects and devices. The core only
//! issues commands through this trait and receives events through the
//! `handle_*` methods on [`Stage`](crate::Stage); it never renders anything
//! itself. [`HeadlessBackend`] is an in-memory implementation.

mod headless;

pub use headless::{BackendCall, HeadlessBackend, HeadlessNode};

use crate::input::{AxisEvent, ButtonEvent, KeyEvent, KeymapSettings, ModifiersState, SeatCapability};
use stage_core::{Color, Point, Size};

macro_rules! backend_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);
    };
}

backend_handle!(
    /// A client surface (toplevel, lock or layer surface).
    SurfaceHandle
);
backend_handle!(
    /// A display output.
    OutputHandle
);
backend_handle!(
    /// A node in the backend scene graph.
    SceneNodeId
);
backend_handle!(KeyboardHandle);
backend_handle!(PointerHandle);
backend_handle!(
    /// A session lock object created by a lock client.
    LockHandle
);

/// A display mode reported by an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputMode {
    pub width: i32,
    pub height: i32,
    pub refresh_mhz: i32,
}

impl OutputMode {
    pub fn size(&self) -> Size<i32> {
        Size::new(self.width, self.height)
    }
}

/// Result of a scene hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    /// Root node of the surface tree that was hit.
    pub node: SceneNodeId,
    /// The surface under the point, if the hit node belongs to one.
    pub surface: Option<SurfaceHandle>,
    /// Point in surface-local coordinates.
    pub local: Point<f64>,
}

/// An input device announced by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDevice {
    Keyboard(KeyboardHandle),
    Pointer(PointerHandle),
}

pub trait Backend {
    // --- Scene graph ---

    /// Creates the scene tree for a toplevel surface in the normal layer.
    fn create_view_node(&mut self, surface: SurfaceHandle) -> SceneNodeId;
    /// Creates the scene tree for a lock surface, above everything else.
    fn create_lock_node(&mut self, surface: SurfaceHandle) -> SceneNodeId;
    /// Creates the scene tree for a layer-shell surface.
    fn create_layer_node(&mut self, surface: SurfaceHandle) -> SceneNodeId;
    /// Creates a solid rectangle as a child of `parent`.
    fn create_rect(&mut self, parent: SceneNodeId, color: Color) -> SceneNodeId;
    /// Destroys `node` and its children.
    fn destroy_node(&mut self, node: SceneNodeId);
    /// Position relative to the parent (layout coordinates for root nodes).
    fn set_node_position(&mut self, node: SceneNodeId, position: Point<i32>);
    fn set_rect_size(&mut self, rect: SceneNodeId, size: Size<i32>);
    fn set_rect_color(&mut self, rect: SceneNodeId, color: Color);
    fn raise_to_top(&mut self, node: SceneNodeId);
    fn set_node_enabled(&mut self, node: SceneNodeId, enabled: bool);
    /// Topmost enabled node under `point`, in layout coordinates.
    fn node_at(&self, point: Point<f64>) -> Option<SceneHit>;

    // --- Shell surfaces ---

    fn configure_toplevel(&mut self, surface: SurfaceHandle, size: Size<i32>);
    fn set_toplevel_activated(&mut self, surface: SurfaceHandle, activated: bool);
    fn configure_lock_surface(&mut self, surface: SurfaceHandle, size: Size<i32>);
    fn configure_layer_surface(&mut self, surface: SurfaceHandle, output: OutputHandle, size: Size<i32>);
    /// Acknowledges a lock request once the compositor is locked.
    fn send_locked(&mut self, lock: LockHandle);

    // --- Seat ---

    fn set_seat_capabilities(&mut self, capabilities: SeatCapability);
    fn keyboard_enter(&mut self, surface: SurfaceHandle, modifiers: &ModifiersState);
    fn keyboard_key(&mut self, event: &KeyEvent);
    fn keyboard_modifiers(&mut self, modifiers: &ModifiersState);
    fn keyboard_clear_focus(&mut self);
    fn pointer_enter(&mut self, surface: SurfaceHandle, local: Point<f64>);
    fn pointer_motion(&mut self, time_msec: u32, local: Point<f64>);
    fn pointer_button(&mut self, event: &ButtonEvent);
    fn pointer_axis(&mut self, event: &AxisEvent);
    fn pointer_frame(&mut self);
    fn pointer_clear_focus(&mut self);
    /// Sets a named image from the cursor theme.
    fn set_cursor_image(&mut self, name: &str);

    // --- Devices ---

    fn configure_keyboard(&mut self, keyboard: KeyboardHandle, keymap: &KeymapSettings);
    fn set_keyboard_layout(&mut self, keyboard: KeyboardHandle, layout: u32);
    fn attach_pointer(&mut self, pointer: PointerHandle);

    // --- Outputs ---

    fn preferred_mode(&self, output: OutputHandle) -> Option<OutputMode>;
    /// Enables `output` with `mode` (or its current mode when `None`) and
    /// commits. Returns the resulting resolution, or `None` if the commit
    /// was rejected.
    fn enable_output(&mut self, output: OutputHandle, mode: Option<OutputMode>) -> Option<Size<i32>>;
    fn commit_frame(&mut self, output: OutputHandle);
}
