// Participant registry: ordered, append-only, case-insensitively unique names.

use std::fmt;

use tracing::{info, warn};

use super::error::GameError;

/// Identifier handed to a participant at registration.
///
/// Allocated from 1 upward and never reused. This is also the number a
/// participant writes on the gift they bring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered participant. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

/// All participants in registration order.
#[derive(Debug, Clone)]
pub struct Registry {
    participants: Vec<Participant>,
    next_id: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Registry {
            participants: Vec::new(),
            next_id: 1,
        }
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new participant.
    ///
    /// The name is trimmed before any check. Uniqueness is case-insensitive,
    /// and the duplicate error carries the name as it was first registered.
    pub fn register(&mut self, name: &str) -> Result<Participant, GameError> {
        let participant = self.candidate(name)?;
        self.insert(participant.clone());
        Ok(participant)
    }

    /// Validate `name` and return the participant it would become, without
    /// registering it or consuming an id.
    pub fn candidate(&self, name: &str) -> Result<Participant, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }

        let lowered = name.to_lowercase();
        if let Some(existing) = self
            .participants
            .iter()
            .find(|p| p.name.to_lowercase() == lowered)
        {
            warn!("Rejected duplicate registration '{}' (matches '{}')", name, existing.name);
            return Err(GameError::DuplicateName {
                existing: existing.name.clone(),
            });
        }

        Ok(Participant {
            id: ParticipantId(self.next_id),
            name: name.to_string(),
        })
    }

    /// Commit a participant obtained from [`Self::candidate`].
    pub(super) fn insert(&mut self, participant: Participant) {
        self.next_id = participant.id.0 + 1;
        info!("Registered participant #{} ({})", participant.id, participant.name);
        self.participants.push(participant);
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn ids(&self) -> Vec<ParticipantId> {
        self.participants.iter().map(|p| p.id).collect()
    }

    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
