//! Workspace status publishing.
//!
//! After every workspace switch the compositor sends a short text datagram
//! to an indicator process listening on a Unix datagram socket. Delivery is
//! best-effort: a missing listener only leaves the indicator stale until the
//! next switch.
//!
//! Wire format: for each workspace in keyboard order (`1`..`9`, then `0`),
//! `!<digit>` for the newly active one, `?<digit>` for the vacated one if it
//! still has views, `<digit>` for any other occupied one, nothing otherwise.
//! The datagram is NUL-terminated.

mod publisher;
mod status;

pub use publisher::{DatagramPublisher, StatusPublisher};
pub use status::{StatusEntry, StatusMark, WorkspaceStatus};
