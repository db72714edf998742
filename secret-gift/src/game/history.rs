// Reveal history: append-only log of draws with a movable cursor.

use super::registry::ParticipantId;

/// One reveal as it was shown to the room.
///
/// The recipient is frozen at reveal time; a later reassignment does not
/// rewrite it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealEntry {
    pub name: String,
    pub recipient: ParticipantId,
}

#[derive(Debug, Clone, Default)]
pub struct DrawHistory {
    entries: Vec<RevealEntry>,
    /// `None` until the first entry is pushed.
    cursor: Option<usize>,
}

impl DrawHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and move the cursor onto it.
    pub fn push(&mut self, entry: RevealEntry) {
        self.entries.push(entry);
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Entry under the cursor.
    pub fn current(&self) -> Option<&RevealEntry> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[RevealEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the cursor is on the last entry (or there are none).
    pub fn at_tail(&self) -> bool {
        match self.cursor {
            Some(c) => c + 1 == self.entries.len(),
            None => true,
        }
    }

    pub fn can_step_back(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// Move forward one entry. Returns false at the tail.
    pub fn step_forward(&mut self) -> bool {
        match self.cursor {
            Some(c) if c + 1 < self.entries.len() => {
                self.cursor = Some(c + 1);
                true
            }
            _ => false,
        }
    }

    /// Move back one entry. Returns false at index 0.
    pub fn step_back(&mut self) -> bool {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                true
            }
            _ => false,
        }
    }

    /// Move the cursor to the last entry. Returns false when empty.
    pub fn jump_to_tail(&mut self) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        self.cursor = Some(self.entries.len() - 1);
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
