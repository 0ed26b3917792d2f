//! In-memory backend.
//!
//! Keeps a flat scene graph with enough state for hit testing (positions,
//! sizes, visibility, stacking) and records every seat and shell command in
//! a call log. Configures take effect immediately, as if the client acked
//! and committed at once.

use super::{
    Backend, KeyboardHandle, LockHandle, OutputHandle, OutputMode, PointerHandle, SceneHit,
    SceneNodeId, SurfaceHandle,
};
use crate::input::{AxisEvent, ButtonEvent, KeyEvent, KeymapSettings, ModifiersState, SeatCapability};
use stage_core::{Color, Point, Rect, Size};
use std::collections::HashMap;

/// A seat, shell or device command issued by the core.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    KeyboardEnter { surface: SurfaceHandle, modifiers: ModifiersState },
    KeyboardKey(KeyEvent),
    KeyboardModifiers(ModifiersState),
    KeyboardClearFocus,
    PointerEnter { surface: SurfaceHandle, local: Point<f64> },
    PointerMotion { time_msec: u32, local: Point<f64> },
    PointerButton(ButtonEvent),
    PointerAxis(AxisEvent),
    PointerFrame,
    PointerClearFocus,
    CursorImage(String),
    ToplevelActivated { surface: SurfaceHandle, activated: bool },
    ConfigureToplevel { surface: SurfaceHandle, size: Size<i32> },
    ConfigureLockSurface { surface: SurfaceHandle, size: Size<i32> },
    ConfigureLayerSurface { surface: SurfaceHandle, output: OutputHandle, size: Size<i32> },
    Locked(LockHandle),
    SeatCapabilities(SeatCapability),
    KeyboardConfigured { keyboard: KeyboardHandle, keymap: KeymapSettings },
    KeyboardLayout { keyboard: KeyboardHandle, layout: u32 },
    PointerAttached(PointerHandle),
    Raise(SceneNodeId),
    CommitFrame(OutputHandle),
}

/// State of one scene node.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessNode {
    pub surface: Option<SurfaceHandle>,
    pub parent: Option<SceneNodeId>,
    pub position: Point<i32>,
    pub size: Size<i32>,
    pub enabled: bool,
    pub color: Option<Color>,
}

impl HeadlessNode {
    fn bounds(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }
}

#[derive(Debug, Clone)]
struct HeadlessOutput {
    modes: Vec<OutputMode>,
    size: Size<i32>,
    reject_commit: bool,
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_node: u64,
    nodes: HashMap<SceneNodeId, HeadlessNode>,
    /// Normal layer, bottom to top.
    stack: Vec<SceneNodeId>,
    /// Lock layer, bottom to top. Always above `stack`.
    lock_stack: Vec<SceneNodeId>,
    outputs: HashMap<OutputHandle, HeadlessOutput>,
    calls: Vec<BackendCall>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an output reporting `modes`; the first one is preferred.
    pub fn add_output(&mut self, output: OutputHandle, modes: Vec<OutputMode>) {
        self.outputs.insert(
            output,
            HeadlessOutput {
                modes,
                size: Size::new(0, 0),
                reject_commit: false,
            },
        );
    }

    /// Registers an output without modes (nested or virtual) of a fixed size.
    pub fn add_modeless_output(&mut self, output: OutputHandle, size: Size<i32>) {
        self.outputs.insert(
            output,
            HeadlessOutput {
                modes: Vec::new(),
                size,
                reject_commit: false,
            },
        );
    }

    /// Makes every later commit of `output` fail.
    pub fn reject_commits(&mut self, output: OutputHandle) {
        if let Some(out) = self.outputs.get_mut(&output) {
            out.reject_commit = true;
        }
    }

    /// Simulates a client committing a buffer of `size`.
    pub fn commit_surface_size(&mut self, surface: SurfaceHandle, size: Size<i32>) {
        if let Some(node) = self.node_of_surface_mut(surface) {
            node.size = size;
        }
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn node(&self, node: SceneNodeId) -> Option<&HeadlessNode> {
        self.nodes.get(&node)
    }

    pub fn children(&self, parent: SceneNodeId) -> Vec<SceneNodeId> {
        let mut children: Vec<SceneNodeId> = self
            .nodes
            .iter()
            .filter(|(_, n)| n.parent == Some(parent))
            .map(|(id, _)| *id)
            .collect();
        children.sort();
        children
    }

    /// Root nodes of the normal layer, bottom to top.
    pub fn stacking_order(&self) -> &[SceneNodeId] {
        &self.stack
    }

    fn alloc_node(&mut self, surface: Option<SurfaceHandle>, parent: Option<SceneNodeId>) -> SceneNodeId {
        self.next_node += 1;
        let id = SceneNodeId(self.next_node);
        self.nodes.insert(
            id,
            HeadlessNode {
                surface,
                parent,
                position: Point::new(0, 0),
                size: Size::new(0, 0),
                enabled: true,
                color: None,
            },
        );
        id
    }

    fn node_of_surface_mut(&mut self, surface: SurfaceHandle) -> Option<&mut HeadlessNode> {
        self.nodes
            .values_mut()
            .find(|n| n.surface == Some(surface) && n.parent.is_none())
    }
}

impl Backend for HeadlessBackend {
    fn create_view_node(&mut self, surface: SurfaceHandle) -> SceneNodeId {
        let id = self.alloc_node(Some(surface), None);
        self.stack.push(id);
        id
    }

    fn create_lock_node(&mut self, surface: SurfaceHandle) -> SceneNodeId {
        let id = self.alloc_node(Some(surface), None);
        self.lock_stack.push(id);
        id
    }

    fn create_layer_node(&mut self, surface: SurfaceHandle) -> SceneNodeId {
        let id = self.alloc_node(Some(surface), None);
        self.stack.push(id);
        id
    }

    fn create_rect(&mut self, parent: SceneNodeId, color: Color) -> SceneNodeId {
        let id = self.alloc_node(None, Some(parent));
        if let Some(node) = self.nodes.get_mut(&id) {
            node.color = Some(color);
        }
        id
    }

    fn destroy_node(&mut self, node: SceneNodeId) {
        for child in self.children(node) {
            self.destroy_node(child);
        }
        self.nodes.remove(&node);
        self.stack.retain(|n| *n != node);
        self.lock_stack.retain(|n| *n != node);
    }

    fn set_node_position(&mut self, node: SceneNodeId, position: Point<i32>) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.position = position;
        }
    }

    fn set_rect_size(&mut self, rect: SceneNodeId, size: Size<i32>) {
        if let Some(n) = self.nodes.get_mut(&rect) {
            n.size = size;
        }
    }

    fn set_rect_color(&mut self, rect: SceneNodeId, color: Color) {
        if let Some(n) = self.nodes.get_mut(&rect) {
            n.color = Some(color);
        }
    }

    fn raise_to_top(&mut self, node: SceneNodeId) {
        for stack in [&mut self.stack, &mut self.lock_stack] {
            if let Some(pos) = stack.iter().position(|n| *n == node) {
                let id = stack.remove(pos);
                stack.push(id);
            }
        }
        self.calls.push(BackendCall::Raise(node));
    }

    fn set_node_enabled(&mut self, node: SceneNodeId, enabled: bool) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.enabled = enabled;
        }
    }

    fn node_at(&self, point: Point<f64>) -> Option<SceneHit> {
        self.lock_stack
            .iter()
            .rev()
            .chain(self.stack.iter().rev())
            .filter_map(|id| self.nodes.get(id).map(|n| (*id, n)))
            .find(|(_, n)| n.enabled && n.bounds().contains(point))
            .map(|(id, n)| SceneHit {
                node: id,
                surface: n.surface,
                local: point - n.position.to_f64(),
            })
    }

    fn configure_toplevel(&mut self, surface: SurfaceHandle, size: Size<i32>) {
        self.commit_surface_size(surface, size);
        self.calls.push(BackendCall::ConfigureToplevel { surface, size });
    }

    fn set_toplevel_activated(&mut self, surface: SurfaceHandle, activated: bool) {
        self.calls.push(BackendCall::ToplevelActivated { surface, activated });
    }

    fn configure_lock_surface(&mut self, surface: SurfaceHandle, size: Size<i32>) {
        self.commit_surface_size(surface, size);
        self.calls.push(BackendCall::ConfigureLockSurface { surface, size });
    }

    fn configure_layer_surface(&mut self, surface: SurfaceHandle, output: OutputHandle, size: Size<i32>) {
        self.commit_surface_size(surface, size);
        self.calls
            .push(BackendCall::ConfigureLayerSurface { surface, output, size });
    }

    fn send_locked(&mut self, lock: LockHandle) {
        self.calls.push(BackendCall::Locked(lock));
    }

    fn set_seat_capabilities(&mut self, capabilities: SeatCapability) {
        self.calls.push(BackendCall::SeatCapabilities(capabilities));
    }

    fn keyboard_enter(&mut self, surface: SurfaceHandle, modifiers: &ModifiersState) {
        self.calls.push(BackendCall::KeyboardEnter {
            surface,
            modifiers: *modifiers,
        });
    }

    fn keyboard_key(&mut self, event: &KeyEvent) {
        self.calls.push(BackendCall::KeyboardKey(event.clone()));
    }

    fn keyboard_modifiers(&mut self, modifiers: &ModifiersState) {
        self.calls.push(BackendCall::KeyboardModifiers(*modifiers));
    }

    fn keyboard_clear_focus(&mut self) {
        self.calls.push(BackendCall::KeyboardClearFocus);
    }

    fn pointer_enter(&mut self, surface: SurfaceHandle, local: Point<f64>) {
        self.calls.push(BackendCall::PointerEnter { surface, local });
    }

    fn pointer_motion(&mut self, time_msec: u32, local: Point<f64>) {
        self.calls.push(BackendCall::PointerMotion { time_msec, local });
    }

    fn pointer_button(&mut self, event: &ButtonEvent) {
        self.calls.push(BackendCall::PointerButton(*event));
    }

    fn pointer_axis(&mut self, event: &AxisEvent) {
        self.calls.push(BackendCall::PointerAxis(*event));
    }

    fn pointer_frame(&mut self) {
        self.calls.push(BackendCall::PointerFrame);
    }

    fn pointer_clear_focus(&mut self) {
        self.calls.push(BackendCall::PointerClearFocus);
    }

    fn set_cursor_image(&mut self, name: &str) {
        self.calls.push(BackendCall::CursorImage(name.to_string()));
    }

    fn configure_keyboard(&mut self, keyboard: KeyboardHandle, keymap: &KeymapSettings) {
        self.calls.push(BackendCall::KeyboardConfigured {
            keyboard,
            keymap: keymap.clone(),
        });
    }

    fn set_keyboard_layout(&mut self, keyboard: KeyboardHandle, layout: u32) {
        self.calls.push(BackendCall::KeyboardLayout { keyboard, layout });
    }

    fn attach_pointer(&mut self, pointer: PointerHandle) {
        self.calls.push(BackendCall::PointerAttached(pointer));
    }

    fn preferred_mode(&self, output: OutputHandle) -> Option<OutputMode> {
        self.outputs.get(&output).and_then(|o| o.modes.first().copied())
    }

    fn enable_output(&mut self, output: OutputHandle, mode: Option<OutputMode>) -> Option<Size<i32>> {
        let out = self.outputs.get_mut(&output)?;
        if out.reject_commit {
            return None;
        }
        if let Some(mode) = mode {
            out.size = mode.size();
        }
        Some(out.size)
    }

    fn commit_frame(&mut self, output: OutputHandle) {
        self.calls.push(BackendCall::CommitFrame(output));
    }
}
