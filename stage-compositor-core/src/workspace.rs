//! The fixed set of workspaces and their view membership.

use crate::ids::{ViewId, WorkspaceIndex, N_WORKSPACES};
use std::collections::VecDeque;

/// Views of one workspace, most recently inserted first.
#[derive(Debug, Default, Clone)]
pub struct Workspace {
    views: VecDeque<ViewId>,
}

impl Workspace {
    pub fn views(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.views.iter().copied()
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.views.contains(&view)
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }
}

/// All [`N_WORKSPACES`] workspaces. A view belongs to at most one of them.
#[derive(Debug, Default)]
pub struct WorkspaceSet {
    workspaces: [Workspace; N_WORKSPACES],
}

impl WorkspaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, index: WorkspaceIndex) -> &Workspace {
        &self.workspaces[index.get()]
    }

    /// Adds `view` to the front of `index`, leaving any other workspace it
    /// was in.
    pub fn insert(&mut self, index: WorkspaceIndex, view: ViewId) {
        self.remove(view);
        self.workspaces[index.get()].views.push_front(view);
    }

    /// Removes `view` from whichever workspace holds it.
    pub fn remove(&mut self, view: ViewId) -> Option<WorkspaceIndex> {
        let index = self.workspace_of(view)?;
        self.workspaces[index.get()].views.retain(|v| *v != view);
        Some(index)
    }

    pub fn workspace_of(&self, view: ViewId) -> Option<WorkspaceIndex> {
        WorkspaceIndex::all().find(|i| self.workspaces[i.get()].contains(view))
    }

    /// Non-emptiness of every workspace, by index.
    pub fn occupancy(&self) -> [bool; N_WORKSPACES] {
        let mut occupied = [false; N_WORKSPACES];
        for (slot, ws) in occupied.iter_mut().zip(self.workspaces.iter()) {
            *slot = !ws.is_empty();
        }
        occupied
    }
}
