//! Window, workspace, focus and input policy for the stage compositor.
//!
//! The crate decides where windows go, which one has focus, what each
//! output shows and how pointer and keyboard input is interpreted. All
//! rendering, protocol handling and device access is delegated to a
//! [`Backend`]; workspace changes are announced to an external indicator
//! through a [`StatusPublisher`].
//!
//! ```no_run
//! use stage_compositor_core::{HeadlessBackend, Stage};
//! use stage_core::StageConfig;
//!
//! let config = StageConfig::default();
//! let mut stage = Stage::from_config(HeadlessBackend::new(), &config)?;
//! # Ok::<(), stage_compositor_core::StageError>(())
//! ```

pub mod actions;
pub mod backend;
pub mod core;
pub mod decoration;
pub mod error;
pub mod ids;
pub mod input;
pub mod ipc;
pub mod output;
pub mod session_lock;
pub mod slots;
pub mod view;
pub mod workspace;

pub use actions::{run_detached, ActionRunner, DetachedAction, ProcessSpawner};
pub use backend::{
    Backend, BackendCall, HeadlessBackend, InputDevice, KeyboardHandle, LockHandle, OutputHandle,
    OutputMode, PointerHandle, SceneHit, SceneNodeId, SurfaceHandle,
};
pub use crate::core::{FocusState, FocusTarget, KeyDispatch, Stage, StageSettings};
pub use error::{Result, StageError};
pub use ids::{SlotIndex, ViewId, WorkspaceIndex, N_SLOTS, N_WORKSPACES};
pub use ipc::{DatagramPublisher, StatusEntry, StatusMark, StatusPublisher, WorkspaceStatus};
pub use view::{View, ViewKind};
