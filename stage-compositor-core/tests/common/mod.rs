//! Shared fixtures for the behavior tests.

#![allow(dead_code)]

use stage_compositor_core::input::{
    ButtonEvent, ButtonState, KeyEvent, KeyState, ModifierMask, ModifiersState,
};
use stage_compositor_core::{
    BackendCall, HeadlessBackend, InputDevice, KeyDispatch, KeyboardHandle, OutputHandle,
    OutputMode, PointerHandle, Result, Stage, StageSettings, StatusPublisher, SurfaceHandle,
    ViewId, WorkspaceIndex, WorkspaceStatus,
};
use stage_core::{Size, StageConfig};
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::{fmt, EnvFilter};
use xkeysym::Keysym;

pub const KEYBOARD: KeyboardHandle = KeyboardHandle(1);
pub const POINTER: PointerHandle = PointerHandle(1);
pub const OUTPUT: OutputHandle = OutputHandle(1);

pub fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Keeps every published status for inspection.
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    pub sent: Rc<RefCell<Vec<WorkspaceStatus>>>,
}

impl StatusPublisher for RecordingPublisher {
    fn publish(&mut self, status: &WorkspaceStatus) -> Result<()> {
        self.sent.borrow_mut().push(status.clone());
        Ok(())
    }
}

pub struct Harness {
    pub stage: Stage<HeadlessBackend>,
    pub sent: Rc<RefCell<Vec<WorkspaceStatus>>>,
}

pub fn settings() -> StageSettings {
    StageSettings::new(&StageConfig::default(), false).unwrap()
}

pub fn mode(width: i32, height: i32) -> OutputMode {
    OutputMode { width, height, refresh_mhz: 60_000 }
}

/// A stage without outputs or input devices.
pub fn bare_stage() -> Harness {
    init_tracing();
    let publisher = RecordingPublisher::default();
    let sent = publisher.sent.clone();
    let stage = Stage::new(HeadlessBackend::new(), settings(), Box::new(publisher));
    Harness { stage, sent }
}

/// A stage with one output of `width`x`height`, a keyboard, a pointer and
/// the cursor in the middle of the output.
pub fn stage_with_output(width: i32, height: i32) -> Harness {
    let mut h = bare_stage();
    h.stage.backend_mut().add_output(OUTPUT, vec![mode(width, height)]);
    h.stage.handle_new_output(OUTPUT).unwrap();
    h.stage.handle_new_input(InputDevice::Keyboard(KEYBOARD));
    h.stage.handle_new_input(InputDevice::Pointer(POINTER));
    h.stage
        .handle_pointer_motion(0, f64::from(width / 2), f64::from(height / 2))
        .unwrap();
    h.stage.backend_mut().take_calls();
    h
}

impl Harness {
    pub fn map(&mut self, surface: u64, app_id: &str, size: Size<i32>) -> ViewId {
        let id = self.stage.handle_new_toplevel(SurfaceHandle(surface)).unwrap();
        self.stage.handle_map(id, Some(app_id), size).unwrap();
        id
    }

    pub fn set_modifiers(&mut self, mask: ModifierMask) {
        self.stage
            .handle_modifiers(KEYBOARD, ModifiersState::with_depressed(mask));
    }

    /// Presses `sym` with exactly `mask` held, then releases the modifiers.
    pub fn press(&mut self, sym: Keysym, mask: ModifierMask) -> KeyDispatch {
        self.set_modifiers(mask);
        let dispatch = self.stage.handle_key(&key(sym, KeyState::Pressed)).unwrap();
        self.set_modifiers(ModifierMask::empty());
        dispatch
    }

    pub fn switch_to(&mut self, index: usize) {
        let digit = Keysym::from_char(WorkspaceIndex::new(index).unwrap().digit());
        assert_eq!(self.press(digit, ModifierMask::LOGO), KeyDispatch::Handled);
    }

    pub fn button(&mut self, button: u32, state: ButtonState) {
        self.stage
            .handle_pointer_button(&ButtonEvent { time_msec: 0, button, state })
            .unwrap();
    }

    pub fn move_pointer(&mut self, dx: f64, dy: f64) {
        self.stage.handle_pointer_motion(0, dx, dy).unwrap();
    }

    pub fn calls(&self) -> &[BackendCall] {
        self.stage.backend().calls()
    }

    pub fn count_calls(&self, pred: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn last_status(&self) -> Option<String> {
        self.sent.borrow().last().map(|s| s.to_wire())
    }

    pub fn workspace_of(&self, id: ViewId) -> Option<usize> {
        self.stage.workspaces().workspace_of(id).map(|w| w.get())
    }

    pub fn activated_count(&self) -> usize {
        self.stage.views().iter().filter(|(_, v)| v.activated).count()
    }
}

pub fn key(sym: Keysym, state: KeyState) -> KeyEvent {
    KeyEvent {
        keyboard: KEYBOARD,
        time_msec: 0,
        keycode: 0,
        state,
        syms: vec![sym],
    }
}
