use crate::ids::{WorkspaceIndex, N_WORKSPACES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMark {
    /// The workspace just switched to.
    Active,
    /// The workspace just switched away from, still holding views.
    Previous,
    /// Any other workspace holding views.
    Occupied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEntry {
    pub workspace: WorkspaceIndex,
    pub mark: StatusMark,
}

/// Occupancy summary sent after a workspace switch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceStatus {
    pub entries: Vec<StatusEntry>,
}

impl WorkspaceStatus {
    pub fn from_occupancy(
        occupied: &[bool; N_WORKSPACES],
        old: WorkspaceIndex,
        new: WorkspaceIndex,
    ) -> Self {
        let entries = WorkspaceIndex::keyboard_order()
            .filter_map(|ws| {
                let mark = if ws == new {
                    StatusMark::Active
                } else if !occupied[ws.get()] {
                    return None;
                } else if ws == old {
                    StatusMark::Previous
                } else {
                    StatusMark::Occupied
                };
                Some(StatusEntry { workspace: ws, mark })
            })
            .collect();
        WorkspaceStatus { entries }
    }

    pub fn to_wire(&self) -> String {
        let mut wire = String::with_capacity(self.entries.len() * 2);
        for entry in &self.entries {
            match entry.mark {
                StatusMark::Active => wire.push('!'),
                StatusMark::Previous => wire.push('?'),
                StatusMark::Occupied => {}
            }
            wire.push(entry.workspace.digit());
        }
        wire
    }

    /// Wire text plus the terminating NUL.
    pub fn to_datagram(&self) -> Vec<u8> {
        let mut bytes = self.to_wire().into_bytes();
        bytes.push(0);
        bytes
    }

    /// Parses a received payload. A `!` or `?` marks the next digit; the
    /// payload ends at the first NUL and other bytes are skipped.
    pub fn from_wire(payload: &[u8]) -> Self {
        let mut entries = Vec::new();
        let mut pending = StatusMark::Occupied;
        for &byte in payload.iter().take_while(|b| **b != 0) {
            match byte {
                b'!' => pending = StatusMark::Active,
                b'?' => pending = StatusMark::Previous,
                b'0'..=b'9' => {
                    if let Some(workspace) = WorkspaceIndex::from_digit(char::from(byte)) {
                        entries.push(StatusEntry { workspace, mark: pending });
                    }
                    pending = StatusMark::Occupied;
                }
                _ => {}
            }
        }
        WorkspaceStatus { entries }
    }

    pub fn active(&self) -> Option<WorkspaceIndex> {
        self.entries
            .iter()
            .find(|e| e.mark == StatusMark::Active)
            .map(|e| e.workspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn occupancy(non_empty: &[usize]) -> [bool; N_WORKSPACES] {
        let mut occupied = [false; N_WORKSPACES];
        for &i in non_empty {
            occupied[i] = true;
        }
        occupied
    }

    fn ws(i: usize) -> WorkspaceIndex {
        WorkspaceIndex::new(i).unwrap()
    }

    #[rstest]
    #[case(&[2, 5], 2, 5, "?2!5")]
    #[case(&[2, 5, 7], 2, 5, "?2!57")]
    #[case(&[5], 2, 5, "!5")]
    #[case(&[], 0, 3, "!3")]
    #[case(&[0, 1], 1, 9, "?1!90")]
    #[case(&[3, 0], 9, 0, "3!0")]
    fn encodes_in_keyboard_order(
        #[case] non_empty: &[usize],
        #[case] old: usize,
        #[case] new: usize,
        #[case] expected: &str,
    ) {
        let status = WorkspaceStatus::from_occupancy(&occupancy(non_empty), ws(old), ws(new));
        assert_eq!(status.to_wire(), expected);
    }

    #[test]
    fn datagram_is_nul_terminated() {
        let status = WorkspaceStatus::from_occupancy(&occupancy(&[2, 5]), ws(2), ws(5));
        assert_eq!(status.to_datagram(), b"?2!5\0".to_vec());
    }

    #[test]
    fn decodes_marks_and_ignores_noise() {
        let status = WorkspaceStatus::from_wire(b"?2x!57\0garbage9");
        assert_eq!(
            status.entries,
            vec![
                StatusEntry { workspace: ws(2), mark: StatusMark::Previous },
                StatusEntry { workspace: ws(5), mark: StatusMark::Active },
                StatusEntry { workspace: ws(7), mark: StatusMark::Occupied },
            ]
        );
        assert_eq!(status.active(), Some(ws(5)));
    }

    #[test]
    fn decodes_what_it_encodes() {
        let status = WorkspaceStatus::from_occupancy(&occupancy(&[1, 4, 0]), ws(4), ws(0));
        assert_eq!(WorkspaceStatus::from_wire(&status.to_datagram()), status);
    }
}
