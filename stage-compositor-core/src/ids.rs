//! Validated indices and handles.
//!
//! Workspace and slot indices are small integers with fixed upper bounds;
//! wrapping them keeps them from being mixed up with each other or with
//! arbitrary counters.

use crate::error::{Result, StageError};
use std::fmt;

/// Number of workspaces. All of them exist for the process lifetime.
pub const N_WORKSPACES: usize = 10;
/// Capacity of the slot table.
pub const N_SLOTS: usize = 16;
/// Slots populated for each output (its four quadrants).
pub const SLOTS_PER_OUTPUT: usize = 4;

/// Index of one of the [`N_WORKSPACES`] workspaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkspaceIndex(u8);

impl WorkspaceIndex {
    pub const FIRST: WorkspaceIndex = WorkspaceIndex(0);

    pub fn new(index: usize) -> Result<Self> {
        if index < N_WORKSPACES {
            Ok(WorkspaceIndex(index as u8))
        } else {
            Err(StageError::InvalidWorkspaceIndex(index))
        }
    }

    /// Workspace bound to the digit key `digit`.
    pub fn from_digit(digit: char) -> Option<Self> {
        digit
            .to_digit(10)
            .and_then(|d| WorkspaceIndex::new(d as usize).ok())
    }

    pub fn get(self) -> usize {
        usize::from(self.0)
    }

    pub fn digit(self) -> char {
        char::from(b'0' + self.0)
    }

    pub fn all() -> impl Iterator<Item = WorkspaceIndex> {
        (0..N_WORKSPACES as u8).map(WorkspaceIndex)
    }

    /// The keyboard row order, 1 through 9 and then 0.
    pub fn keyboard_order() -> impl Iterator<Item = WorkspaceIndex> {
        (1..N_WORKSPACES as u8)
            .chain(std::iter::once(0))
            .map(WorkspaceIndex)
    }
}

impl TryFrom<usize> for WorkspaceIndex {
    type Error = StageError;
    fn try_from(index: usize) -> Result<Self> {
        WorkspaceIndex::new(index)
    }
}

impl fmt::Display for WorkspaceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index into the slot table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(u8);

impl SlotIndex {
    pub fn new(index: usize) -> Result<Self> {
        if index < N_SLOTS {
            Ok(SlotIndex(index as u8))
        } else {
            Err(StageError::InvalidSlotIndex(index))
        }
    }

    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generation-checked handle into the view arena.
///
/// A handle kept after its view was destroyed never resolves to a view that
/// later reuses the same arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}.{}", self.index, self.generation)
    }
}
