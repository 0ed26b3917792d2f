use super::state::Stage;
use crate::backend::{Backend, LockHandle, OutputHandle, SurfaceHandle};
use crate::error::Result;
use crate::ids::ViewId;
use crate::input::cursor::CursorMode;
use crate::view::{View, ViewKind};
use tracing::{debug, info, warn};

impl<B: Backend> Stage<B> {
    /// Locks the session and acknowledges the lock object.
    pub fn handle_new_lock(&mut self, lock: LockHandle) {
        self.lock.begin(lock);
        self.cursor.mode = CursorMode::Passthrough;
        self.backend.send_locked(lock);
        info!("Session locked by {:?}", lock);
    }

    /// Unlocks if `lock` holds the session and hands keyboard focus back to
    /// the activated toplevel.
    ///
    /// Lock surfaces are hidden right away; the client may destroy them
    /// later.
    pub fn handle_unlock(&mut self, lock: LockHandle) -> Result<()> {
        if !self.lock.unlock(lock) {
            warn!("Ignoring unlock from {:?}, which does not hold the session", lock);
            return Ok(());
        }
        info!("Session unlocked");
        let lock_nodes: Vec<_> = self
            .views
            .iter()
            .filter(|(_, v)| v.kind == ViewKind::LockSurface)
            .map(|(_, v)| v.node)
            .collect();
        for node in lock_nodes {
            self.backend.set_node_enabled(node, false);
        }

        self.focus.keyboard = None;
        match self.focus.activated {
            Some(activated) => self.focus(Some(activated)),
            None => {
                self.backend.keyboard_clear_focus();
                Ok(())
            }
        }
    }

    /// The lock object went away. The session stays locked if it was.
    pub fn handle_lock_destroyed(&mut self, lock: LockHandle) {
        if self.lock.drop_session(lock).is_some() {
            debug!("Lock object {:?} destroyed", lock);
        }
    }

    /// Creates a lock surface view covering `output` and focuses it.
    pub fn handle_new_lock_surface(&mut self, surface: SurfaceHandle, output: OutputHandle) -> Result<ViewId> {
        let node = self.backend.create_lock_node(surface);
        let area = self
            .outputs
            .get(output)
            .or_else(|| self.pointer_output())
            .map(|o| o.area);
        let mut view = View::new(ViewKind::LockSurface, surface, node);
        match area {
            Some(area) => {
                view.geometry = area;
                self.backend.set_node_position(node, area.origin());
                self.backend.configure_lock_surface(surface, area.size());
            }
            None => warn!("No output for lock surface {:?}", surface),
        }
        let id = self.views.insert(view);
        self.lock.add_surface(id);
        self.focus(Some(id))?;
        Ok(id)
    }
}
