use super::state::{contract_violation, Stage};
use crate::backend::{Backend, OutputHandle};
use crate::error::{Result, StageError};
use crate::ids::{ViewId, WorkspaceIndex};
use crate::ipc::WorkspaceStatus;
use tracing::{info, warn};

impl<B: Backend> Stage<B> {
    /// Shows workspace `new` on `output`.
    ///
    /// Views of the old workspace are hidden unless another output still
    /// shows it. The view that had focus there is remembered and focused
    /// again when the workspace comes back. A status datagram is published
    /// on every actual switch.
    pub fn switch_workspace(&mut self, output: OutputHandle, new: WorkspaceIndex) -> Result<()> {
        let old = self
            .outputs
            .get(output)
            .ok_or_else(|| contract_violation(StageError::UnknownOutput(output)))?
            .current_workspace;
        if old == new {
            return Ok(());
        }

        let focused = self.focus.activated;
        let leaving: Vec<ViewId> = self.workspaces.get(old).views().collect();
        for &id in &leaving {
            if let Some(view) = self.views.get_mut(id) {
                view.was_focused = Some(id) == focused;
            }
        }
        if !self.outputs.shows_workspace(old, output) {
            for &id in &leaving {
                if let Some(view) = self.views.get(id) {
                    self.backend.set_node_enabled(view.node, false);
                }
            }
        }

        let entering: Vec<ViewId> = self.workspaces.get(new).views().collect();
        let mut restore = None;
        for &id in &entering {
            if let Some(view) = self.views.get(id) {
                self.backend.set_node_enabled(view.node, true);
                if view.was_focused {
                    restore = Some(id);
                }
            }
        }
        if let Some(out) = self.outputs.get_mut(output) {
            out.current_workspace = new;
        }
        if restore.is_some() {
            self.focus(restore)?;
        }

        info!("Output {:?} switched from workspace {} to {}", output, old, new);
        let status = WorkspaceStatus::from_occupancy(&self.workspaces.occupancy(), old, new);
        if let Err(e) = self.publisher.publish(&status) {
            warn!("Workspace status not delivered: {}", e);
        }
        Ok(())
    }

    /// Switches the output under the pointer.
    pub fn switch_workspace_at_pointer(&mut self, new: WorkspaceIndex) -> Result<()> {
        match self.pointer_output().map(|o| o.handle) {
            Some(output) => self.switch_workspace(output, new),
            None => {
                warn!("No output under the pointer; ignoring switch to {}", new);
                Ok(())
            }
        }
    }
}
