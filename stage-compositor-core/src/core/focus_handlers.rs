use super::state::{FocusTarget, Stage};
use crate::backend::Backend;
use crate::error::Result;
use crate::ids::ViewId;
use crate::view::ViewKind;
use tracing::debug;

impl<B: Backend> Stage<B> {
    /// Gives keyboard focus to `view`.
    ///
    /// Lock surfaces take focus unconditionally and leave the activated
    /// toplevel alone. Toplevels are refused while locked. Focusing the
    /// surface that already has focus does nothing.
    pub fn focus(&mut self, view: Option<ViewId>) -> Result<()> {
        let Some(id) = view else {
            return Ok(());
        };
        let (kind, surface) = {
            let v = self.try_view(id)?;
            (v.kind, v.surface)
        };
        let target = FocusTarget { view: id, surface };

        if kind == ViewKind::LockSurface {
            self.backend.keyboard_enter(surface, &self.modifiers);
            self.focus.keyboard = Some(target);
            debug!("Lock surface {} focused", id);
            return Ok(());
        }
        if self.lock.is_locked() {
            debug!("Refusing focus for {} while locked", id);
            return Ok(());
        }
        if self.focus.keyboard.map(|t| t.surface) == Some(surface) {
            return Ok(());
        }

        if let Some(previous) = self.focus.activated.filter(|p| *p != id) {
            self.set_activated(previous, false);
        }
        self.set_activated(id, true);
        self.focus.activated = Some(id);
        self.focus.keyboard = Some(target);
        self.backend.keyboard_enter(surface, &self.modifiers);
        debug!("Focused {}", id);
        Ok(())
    }

    /// The toplevel holding keyboard focus, if any.
    pub fn focused_toplevel(&self) -> Option<ViewId> {
        self.focus
            .keyboard
            .map(|t| t.view)
            .filter(|id| self.views.get(*id).is_some_and(|v| v.is_toplevel()))
    }

    /// Drops every focus reference to `id`.
    pub(crate) fn clear_focus_of(&mut self, id: ViewId) {
        if self.focus.keyboard.map(|t| t.view) == Some(id) {
            self.focus.keyboard = None;
        }
        if self.focus.activated == Some(id) {
            self.set_activated(id, false);
            self.focus.activated = None;
        }
    }

    /// Updates the activated state and border color of a toplevel. Views
    /// that no longer exist are skipped.
    fn set_activated(&mut self, id: ViewId, activated: bool) {
        let color = self.settings.colors.for_state(activated);
        let Some(view) = self.views.get_mut(id) else {
            return;
        };
        view.activated = activated;
        let surface = view.surface;
        let borders = view.borders;
        if let Some(borders) = borders {
            for node in borders.nodes() {
                self.backend.set_rect_color(node, color);
            }
        }
        self.backend.set_toplevel_activated(surface, activated);
    }
}
