use super::state::Stage;
use crate::actions::DetachedAction;
use crate::backend::{Backend, KeyboardHandle};
use crate::error::Result;
use crate::input::bindings::Binding;
use crate::input::{KeyEvent, KeyState, ModifiersState};
use tracing::{debug, info};

/// Outcome of a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDispatch {
    /// Delivered to the focused client.
    Forwarded,
    /// Consumed by a binding.
    Handled,
    /// Consumed by a binding that asks the driver to run an action.
    Spawn(DetachedAction),
}

impl<B: Backend> Stage<B> {
    pub fn handle_key(&mut self, event: &KeyEvent) -> Result<KeyDispatch> {
        if event.state == KeyState::Pressed {
            if let Some(&sym) = event.syms.first() {
                let binding = self.settings.bindings.classify(
                    sym,
                    self.modifiers.mask(),
                    self.lock.is_locked(),
                );
                if let Some(binding) = binding {
                    debug!("Key {:?} bound to {:?}", sym, binding);
                    return self.execute(binding);
                }
            }
        }
        self.backend.keyboard_key(event);
        Ok(KeyDispatch::Forwarded)
    }

    fn execute(&mut self, binding: Binding) -> Result<KeyDispatch> {
        match binding {
            Binding::SwitchWorkspace(ws) => self.switch_workspace_at_pointer(ws)?,
            Binding::ToggleMaxVertical => self.toggle_max_vertical()?,
            Binding::ToggleMaximize => self.toggle_maximize()?,
            Binding::ToggleLayout => self.toggle_layout(),
            Binding::Spawn(action) => return Ok(KeyDispatch::Spawn(action)),
            Binding::Swallow => {}
        }
        Ok(KeyDispatch::Handled)
    }

    pub fn handle_modifiers(&mut self, keyboard: KeyboardHandle, modifiers: ModifiersState) {
        debug!("Modifiers from {:?}: {:?}", keyboard, modifiers);
        self.modifiers = modifiers;
        self.backend.keyboard_modifiers(&modifiers);
    }

    /// Switches every keyboard between layouts 0 and 1.
    pub fn toggle_layout(&mut self) {
        self.layout = 1 - self.layout;
        for &keyboard in &self.keyboards {
            self.backend.set_keyboard_layout(keyboard, self.layout);
        }
        self.modifiers.group = self.layout;
        info!("Keyboard layout {}", self.layout);
    }
}
