//! # Stage Core Library (`stage-core`)
//!
//! `stage-core` carries the infrastructure shared by every stage crate:
//!
//! - **Error Handling**: [`CoreError`] and the more specific [`ConfigError`] and
//!   [`LoggingError`].
//! - **Core Data Types**: geometry primitives ([`Point`], [`Size`], [`Rect`]) and
//!   the RGBA [`Color`] used for window decorations.
//! - **Configuration**: [`StageConfig`], whose `Default` is the compiled-in
//!   behavior of the compositor, plus [`ConfigLoader`] for optional TOML overlays.
//! - **Logging**: `tracing` based initialization for console and rolling file output.
//!
//! ```rust,ignore
//! use stage_core::config::ConfigLoader;
//! use stage_core::logging::init_logging;
//!
//! fn main() -> Result<(), stage_core::CoreError> {
//!     let config = ConfigLoader::load_or_default(None)?;
//!     init_logging(&config.logging, false)?;
//!     tracing::info!("stage core initialized");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

pub use config::{
    BindingsConfig, ConfigLoader, DecorationConfig, HelperBinding, IpcConfig, KeyboardConfig,
    LoggingConfig, PlacementConfig, StageConfig,
};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_logging, init_minimal_logging};
pub use types::{Color, Point, Rect, Size};
