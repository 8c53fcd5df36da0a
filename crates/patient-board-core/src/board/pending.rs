//! State of the checklist entry input.

use crate::models::RecordId;

/// Either closed, or open and collecting text for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingEntry {
    #[default]
    Closed,
    Open { target: RecordId },
}

impl PendingEntry {
    pub fn is_open(&self) -> bool {
        matches!(self, PendingEntry::Open { .. })
    }

    pub fn target(&self) -> Option<RecordId> {
        match self {
            PendingEntry::Open { target } => Some(*target),
            PendingEntry::Closed => None,
        }
    }

    /// Open for `target`. Re-opening while open just retargets.
    pub fn open(&mut self, target: RecordId) {
        *self = PendingEntry::Open { target };
    }

    /// Close, returning the target that was open.
    pub fn close(&mut self) -> Option<RecordId> {
        std::mem::take(self).target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut entry = PendingEntry::default();
        assert!(!entry.is_open());

        entry.open(3);
        assert_eq!(entry.target(), Some(3));

        entry.open(5);
        assert_eq!(entry.target(), Some(5));

        assert_eq!(entry.close(), Some(5));
        assert_eq!(entry, PendingEntry::Closed);
        assert_eq!(entry.close(), None);
    }
}
