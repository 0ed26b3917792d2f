//! Session lock bookkeeping.

use crate::backend::LockHandle;
use crate::ids::ViewId;
use tracing::warn;

/// The lock object currently holding the session and its surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockSession {
    pub handle: LockHandle,
    pub surfaces: Vec<ViewId>,
}

/// Whether the session is locked and by which lock object.
///
/// `locked` can outlive the session: a lock client that dies without
/// unlocking leaves the compositor locked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionLock {
    locked: bool,
    session: Option<LockSession>,
}

impl SessionLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn session(&self) -> Option<&LockSession> {
        self.session.as_ref()
    }

    /// Locks and starts a session for `handle`, replacing any previous one.
    pub fn begin(&mut self, handle: LockHandle) {
        if let Some(previous) = &self.session {
            warn!(
                "Lock {:?} replaces active lock {:?}",
                handle, previous.handle
            );
        }
        self.locked = true;
        self.session = Some(LockSession {
            handle,
            surfaces: Vec::new(),
        });
    }

    /// Unlocks if `handle` owns the session. Returns whether it did.
    pub fn unlock(&mut self, handle: LockHandle) -> bool {
        if self.owned_by(handle) {
            self.locked = false;
            self.session = None;
            true
        } else {
            false
        }
    }

    /// Forgets the session of `handle` without unlocking.
    pub fn drop_session(&mut self, handle: LockHandle) -> Option<LockSession> {
        if self.owned_by(handle) {
            self.session.take()
        } else {
            None
        }
    }

    pub fn add_surface(&mut self, view: ViewId) {
        if let Some(session) = &mut self.session {
            session.surfaces.push(view);
        }
    }

    pub fn remove_surface(&mut self, view: ViewId) {
        if let Some(session) = &mut self.session {
            session.surfaces.retain(|v| *v != view);
        }
    }

    fn owned_by(&self, handle: LockHandle) -> bool {
        self.session.as_ref().map(|s| s.handle) == Some(handle)
    }
}
