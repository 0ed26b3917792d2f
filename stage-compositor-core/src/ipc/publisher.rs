use super::WorkspaceStatus;
use crate::error::{Result, StageError};
use std::os::unix::net::UnixDatagram;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Destination of workspace status updates.
pub trait StatusPublisher {
    fn publish(&mut self, status: &WorkspaceStatus) -> Result<()>;
}

/// Sends each status as one datagram from a fresh unbound socket.
#[derive(Debug, Clone)]
pub struct DatagramPublisher {
    path: PathBuf,
}

impl DatagramPublisher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatagramPublisher { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatusPublisher for DatagramPublisher {
    fn publish(&mut self, status: &WorkspaceStatus) -> Result<()> {
        let socket = UnixDatagram::unbound().map_err(StageError::Status)?;
        socket
            .send_to(&status.to_datagram(), &self.path)
            .map_err(StageError::Status)?;
        debug!("Sent workspace status '{}' to {:?}", status.to_wire(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::WorkspaceIndex;
    use crate::ids::N_WORKSPACES;

    #[test]
    fn delivers_to_bound_listener() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stage.sock");
        let listener = UnixDatagram::bind(&path).unwrap();

        let mut occupied = [false; N_WORKSPACES];
        occupied[2] = true;
        let status = WorkspaceStatus::from_occupancy(
            &occupied,
            WorkspaceIndex::new(2).unwrap(),
            WorkspaceIndex::new(5).unwrap(),
        );
        DatagramPublisher::new(&path).publish(&status).unwrap();

        let mut buf = [0u8; 32];
        let n = listener.recv(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"?2!5\0");
    }

    #[test]
    fn missing_listener_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut publisher = DatagramPublisher::new(dir.path().join("absent.sock"));
        let err = publisher.publish(&WorkspaceStatus::default()).unwrap_err();
        assert!(matches!(err, StageError::Status(_)));
    }
}
