// Gift exchange game logic: participant registry, derangement builder,
// reveal history, and the owned session that ties them together.

pub mod derangement;
pub mod error;
pub mod history;
pub mod registry;
pub mod session;

pub use derangement::{build_assignments, AssignmentMap};
pub use error::GameError;
pub use history::{DrawHistory, RevealEntry};
pub use registry::{Participant, ParticipantId, Registry};
pub use session::{Advance, GameSession};
