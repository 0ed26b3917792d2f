//! Error types for the compositor policy core.

use crate::backend::{OutputHandle, SurfaceHandle};
use crate::ids::ViewId;
use stage_core::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StageError {
    /// A handle that no longer (or never) referred to a live view.
    #[error("Unknown view {0}")]
    UnknownView(ViewId),

    /// The backend reported a surface with no backing view.
    #[error("Surface {0:?} has no backing view")]
    UnknownSurface(SurfaceHandle),

    #[error("Unknown output {0:?}")]
    UnknownOutput(OutputHandle),

    #[error("Workspace index {0} out of range")]
    InvalidWorkspaceIndex(usize),

    #[error("Slot index {0} out of range")]
    InvalidSlotIndex(usize),

    #[error("Invalid modifier name '{0}'")]
    InvalidModifier(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to publish workspace status")]
    Status(#[source] std::io::Error),

    #[error("Failed to spawn '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl StageError {
    /// Errors that mean the backend broke its side of the event contract.
    ///
    /// The event loop driver is expected to abort on these.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            StageError::UnknownView(_)
                | StageError::UnknownSurface(_)
                | StageError::UnknownOutput(_)
        )
    }
}

pub type Result<T, E = StageError> = std::result::Result<T, E>;
