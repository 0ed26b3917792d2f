//! Input event types and the pointer/keyboard policy helpers.
//!
//! - [`cursor`]: the cursor interaction mode and grab anchors.
//! - [`bindings`]: classification of key presses into compositor actions.

pub mod bindings;
pub mod cursor;

use crate::backend::KeyboardHandle;
use crate::error::StageError;
use bitflags::bitflags;
use std::str::FromStr;
use xkeysym::Keysym;

/// Linux evdev code of the left mouse button.
pub const BTN_LEFT: u32 = 0x110;
/// Linux evdev code of the right mouse button.
pub const BTN_RIGHT: u32 = 0x111;

bitflags! {
    /// Keyboard modifier mask, bit-compatible with the wlroots modifier enum.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierMask: u32 {
        const SHIFT = 1 << 0;
        const CAPS = 1 << 1;
        const CTRL = 1 << 2;
        const ALT = 1 << 3;
        const MOD2 = 1 << 4;
        const MOD3 = 1 << 5;
        const LOGO = 1 << 6;
        const MOD5 = 1 << 7;
    }
}

impl FromStr for ModifierMask {
    type Err = StageError;

    /// Parses a single modifier name as used in configuration files.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        stage_core::config::modifier_bit(name)
            .map(ModifierMask::from_bits_truncate)
            .ok_or_else(|| StageError::InvalidModifier(name.to_string()))
    }
}

/// Keyboard modifier state as reported by a keyboard device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifiersState {
    pub depressed: u32,
    pub latched: u32,
    pub locked: u32,
    /// Active layout index.
    pub group: u32,
}

impl ModifiersState {
    /// Effective modifier mask: depressed, latched and locked combined.
    pub fn mask(&self) -> ModifierMask {
        ModifierMask::from_bits_truncate(self.depressed | self.latched | self.locked)
    }

    pub fn with_depressed(mask: ModifierMask) -> Self {
        ModifiersState {
            depressed: mask.bits(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// A physical key event after keymap resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub keyboard: KeyboardHandle,
    pub time_msec: u32,
    /// Linux evdev keycode.
    pub keycode: u32,
    pub state: KeyState,
    /// Symbols produced by the key in the active layout; only the first one
    /// is considered for bindings.
    pub syms: Vec<Keysym>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    pub time_msec: u32,
    pub button: u32,
    pub state: ButtonState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSource {
    Wheel,
    Finger,
    Continuous,
    WheelTilt,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisEvent {
    pub time_msec: u32,
    pub orientation: AxisOrientation,
    pub source: AxisSource,
    pub delta: f64,
    pub delta_discrete: i32,
}

bitflags! {
    /// Capabilities advertised on the seat.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SeatCapability: u32 {
        const POINTER = 1;
        const KEYBOARD = 2;
        const TOUCH = 4;
    }
}

/// Keymap and repeat settings pushed to every keyboard device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapSettings {
    /// Comma separated XKB layout list.
    pub layouts: String,
    pub repeat_rate: i32,
    pub repeat_delay: i32,
}
