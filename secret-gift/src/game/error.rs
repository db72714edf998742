// Error taxonomy for the game layer. Every variant is recoverable and is
// surfaced to the operator as a notice rather than terminating the process.

use thiserror::Error;

use super::registry::ParticipantId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("the name '{existing}' has already been added")]
    DuplicateName { existing: String },

    #[error("at least 2 participants are needed, have {count}")]
    InsufficientParticipants { count: usize },

    #[error("all registered participants have been drawn")]
    EmptyPool,

    #[error("participant #{0} has no assignment")]
    Unassigned(ParticipantId),
}
