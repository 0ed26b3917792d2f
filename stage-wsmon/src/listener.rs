//! Receiving side of the workspace status socket.

use anyhow::{Context, Result};
use stage_compositor_core::{StatusMark, WorkspaceStatus};
use std::path::{Path, PathBuf};
use tokio::net::UnixDatagram;
use tracing::{debug, warn};

/// Longest valid payload: ten marked digits plus the terminating NUL.
const MAX_DATAGRAM: usize = 21;

pub struct StatusListener {
    socket: UnixDatagram,
    path: PathBuf,
}

impl StatusListener {
    /// Binds `path`, replacing a stale socket file left by a previous run.
    pub fn bind(path: &Path) -> Result<Self> {
        if path.exists() {
            std::fs::remove_file(path)
                .with_context(|| format!("Failed to remove stale socket {:?}", path))?;
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            stage_core::utils::fs::ensure_dir_exists(parent)?;
        }
        let socket = UnixDatagram::bind(path)
            .with_context(|| format!("Failed to bind status socket {:?}", path))?;
        debug!("Listening on {:?}", path);
        Ok(StatusListener {
            socket,
            path: path.to_path_buf(),
        })
    }

    /// Waits for the next datagram and decodes it.
    pub async fn next(&self) -> Result<WorkspaceStatus> {
        let mut buf = [0u8; 64];
        let n = self
            .socket
            .recv(&mut buf)
            .await
            .context("Failed to receive status datagram")?;
        if n > MAX_DATAGRAM {
            warn!("Oversized status datagram ({} bytes)", n);
        }
        Ok(WorkspaceStatus::from_wire(&buf[..n]))
    }
}

impl Drop for StatusListener {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// One line summary, e.g. `active 5, previous 2, occupied 7`.
pub fn describe(status: &WorkspaceStatus) -> String {
    let list = |mark: StatusMark| -> String {
        status
            .entries
            .iter()
            .filter(|e| e.mark == mark)
            .map(|e| e.workspace.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };
    let mut parts = Vec::new();
    for (label, mark) in [
        ("active", StatusMark::Active),
        ("previous", StatusMark::Previous),
        ("occupied", StatusMark::Occupied),
    ] {
        let digits = list(mark);
        if !digits.is_empty() {
            parts.push(format!("{label} {digits}"));
        }
    }
    if parts.is_empty() {
        "no workspaces".to_string()
    } else {
        parts.join(", ")
    }
}
