use super::state::Stage;
use crate::backend::{Backend, InputDevice, OutputHandle};
use crate::error::Result;
use crate::input::SeatCapability;
use tracing::{debug, info, warn};

impl<B: Backend> Stage<B> {
    /// Enables a new output with its preferred mode and appends it to the
    /// right of the layout.
    pub fn handle_new_output(&mut self, handle: OutputHandle) -> Result<()> {
        let mode = self.backend.preferred_mode(handle);
        let Some(size) = self.backend.enable_output(handle, mode) else {
            warn!("Output {:?} rejected its initial commit; ignoring it", handle);
            return Ok(());
        };
        let area = self.outputs.add(handle, size).area;
        if !self
            .slots
            .allocate(handle, area, self.settings.terminal_width)
        {
            warn!("Slot table full; terminals on {:?} will be centered", handle);
        }
        info!(
            "Output {:?} enabled at {}x{}+{}+{}",
            handle, area.width, area.height, area.x, area.y
        );
        Ok(())
    }

    pub fn handle_output_destroyed(&mut self, handle: OutputHandle) -> Result<()> {
        match self.outputs.remove(handle) {
            Some(_) => {
                self.slots.release(handle);
                info!("Output {:?} removed", handle);
            }
            None => debug!("Ignoring removal of untracked output {:?}", handle),
        }
        Ok(())
    }

    pub fn handle_output_frame(&mut self, handle: OutputHandle) {
        self.backend.commit_frame(handle);
    }

    pub fn handle_new_input(&mut self, device: InputDevice) {
        match device {
            InputDevice::Keyboard(keyboard) => {
                self.backend.configure_keyboard(keyboard, &self.settings.keymap);
                self.backend.set_keyboard_layout(keyboard, self.layout);
                self.keyboards.push(keyboard);
                debug!("Keyboard {:?} added", keyboard);
            }
            InputDevice::Pointer(pointer) => {
                self.backend.attach_pointer(pointer);
                self.pointers.push(pointer);
                debug!("Pointer {:?} added", pointer);
            }
        }
        self.advertise_capabilities();
    }

    pub fn handle_input_removed(&mut self, device: InputDevice) {
        match device {
            InputDevice::Keyboard(keyboard) => self.keyboards.retain(|k| *k != keyboard),
            InputDevice::Pointer(pointer) => self.pointers.retain(|p| *p != pointer),
        }
        self.advertise_capabilities();
    }

    fn advertise_capabilities(&mut self) {
        let mut caps = SeatCapability::POINTER;
        if !self.keyboards.is_empty() {
            caps |= SeatCapability::KEYBOARD;
        }
        self.backend.set_seat_capabilities(caps);
    }
}
