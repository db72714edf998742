// Game session: the single owned bundle of mutable game state.
//
// Holds the registry, current assignment map, draw pool, reveal history, and
// the RNG. The orchestrator owns exactly one of these; nothing here touches
// the terminal, so every transition is testable with a seeded RNG.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::derangement::{build_assignments, AssignmentMap};
use super::error::GameError;
use super::history::{DrawHistory, RevealEntry};
use super::registry::{Participant, Registry};

/// Outcome of an advance request on the reveal screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Cursor moved forward over an existing entry.
    Replayed,
    /// A new participant was drawn from the pool.
    Drew,
    /// Nothing to advance to.
    Stayed,
}

pub struct GameSession<R = StdRng> {
    registry: Registry,
    assignments: AssignmentMap,
    /// Not-yet-revealed participants; drawn from the tail.
    pool: Vec<Participant>,
    history: DrawHistory,
    started: bool,
    rng: R,
}

impl GameSession<StdRng> {
    /// Session seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Session with a fixed seed, for rehearsals and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(rng: R) -> Self {
        GameSession {
            registry: Registry::new(),
            assignments: AssignmentMap::default(),
            pool: Vec::new(),
            history: DrawHistory::new(),
            started: false,
            rng,
        }
    }

    /// Register a participant. If the game is already running the newcomer
    /// is folded into the pool and everyone is reassigned.
    pub fn register(&mut self, name: &str) -> Result<Participant, GameError> {
        let participant = self.registry.candidate(name)?;
        if self.started {
            self.integrate_new_participant(participant.clone())?;
        } else {
            self.registry.insert(participant.clone());
        }
        Ok(participant)
    }

    /// Build the first assignment map and shuffle everybody into the pool.
    ///
    /// No-op once the game has started; late arrivals go through
    /// `register` instead.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.started {
            return Ok(());
        }

        self.assignments = build_assignments(&self.registry.ids(), &mut self.rng)?;
        self.pool = self.registry.participants().to_vec();
        self.pool.shuffle(&mut self.rng);
        self.started = true;
        info!("Game started with {} participants", self.registry.len());
        Ok(())
    }

    /// Fold a late registrant into a running game.
    ///
    /// `participant` is a registry candidate. It is committed only once the
    /// assignment map over everyone plus the newcomer has been built, so a
    /// failure leaves the session untouched. The pool is reshuffled as a
    /// whole so the newcomer is not biased toward any draw position. Entries
    /// already in the history keep the number that was shown.
    fn integrate_new_participant(&mut self, participant: Participant) -> Result<(), GameError> {
        let mut ids = self.registry.ids();
        ids.push(participant.id);
        let assignments = build_assignments(&ids, &mut self.rng)?;
        info!(
            "Integrating late participant #{} ({}); reassigning {} participants",
            participant.id,
            participant.name,
            assignments.len()
        );
        self.registry.insert(participant.clone());
        self.assignments = assignments;
        self.pool.push(participant);
        self.pool.shuffle(&mut self.rng);
        Ok(())
    }

    /// Reveal the next participant from the pool, starting the game first if
    /// needed.
    pub fn draw_next(&mut self) -> Result<RevealEntry, GameError> {
        if !self.started {
            self.start_game()?;
        }

        let participant = self.pool.pop().ok_or(GameError::EmptyPool)?;
        let Some(recipient) = self.assignments.recipient_of(participant.id) else {
            let id = participant.id;
            self.pool.push(participant);
            return Err(GameError::Unassigned(id));
        };

        let entry = RevealEntry {
            name: participant.name,
            recipient,
        };
        self.history.push(entry.clone());
        debug!(
            "Draw {} revealed; {} left in pool",
            self.history.len(),
            self.pool.len()
        );
        Ok(entry)
    }

    /// Step forward: replay the next history entry, else draw, else stay.
    pub fn advance(&mut self) -> Result<Advance, GameError> {
        if self.history.step_forward() {
            return Ok(Advance::Replayed);
        }
        if self.pool.is_empty() {
            return Ok(Advance::Stayed);
        }
        self.draw_next()?;
        Ok(Advance::Drew)
    }

    /// Step back one history entry. Returns false at the first entry.
    pub fn retreat(&mut self) -> bool {
        self.history.step_back()
    }

    /// Put the cursor back on the most recent reveal. Returns false when
    /// nothing has been revealed yet.
    pub fn replay_last(&mut self) -> bool {
        self.history.jump_to_tail()
    }

    // -- Read accessors --

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn assignments(&self) -> &AssignmentMap {
        &self.assignments
    }

    pub fn pool(&self) -> &[Participant] {
        &self.pool
    }

    pub fn history(&self) -> &DrawHistory {
        &self.history
    }

    pub fn current_reveal(&self) -> Option<&RevealEntry> {
        self.history.current()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Enough participants to build a derangement.
    pub fn can_start(&self) -> bool {
        self.registry.len() >= 2
    }

    pub fn can_advance(&self) -> bool {
        !self.history.at_tail() || !self.pool.is_empty()
    }

    pub fn can_retreat(&self) -> bool {
        self.history.can_step_back()
    }

    /// Pool exhausted and the cursor sits on the final reveal.
    pub fn is_all_drawn(&self) -> bool {
        self.started && self.pool.is_empty() && !self.history.is_empty() && self.history.at_tail()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
