// Derangement builder: giver -> recipient assignment with no fixed points.
//
// Uses rejection sampling: shuffle the id list uniformly and keep the first
// permutation in which nobody maps to themself. The result is a uniform
// derangement; the expected number of shuffles tends to e (~2.718) as the
// participant count grows.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::error::GameError;
use super::registry::ParticipantId;

/// Giver id -> recipient id. Always a bijection with no fixed points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentMap {
    map: BTreeMap<ParticipantId, ParticipantId>,
}

impl AssignmentMap {
    /// Recipient assigned to `giver`, if the giver is part of this map.
    pub fn recipient_of(&self, giver: ParticipantId) -> Option<ParticipantId> {
        self.map.get(&giver).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate `(giver, recipient)` pairs in giver id order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, ParticipantId)> + '_ {
        self.map.iter().map(|(g, r)| (*g, *r))
    }

    /// True when every recipient is a giver exactly once and nobody draws
    /// themself.
    pub fn is_derangement(&self) -> bool {
        let mut givers: Vec<_> = self.map.keys().copied().collect();
        let mut recipients: Vec<_> = self.map.values().copied().collect();
        givers.sort();
        recipients.sort();
        givers == recipients && self.map.iter().all(|(g, r)| g != r)
    }
}

/// Build a random derangement over `ids`.
///
/// Fails with [`GameError::InsufficientParticipants`] for fewer than two ids,
/// since no derangement exists for a single element.
pub fn build_assignments<R: Rng + ?Sized>(
    ids: &[ParticipantId],
    rng: &mut R,
) -> Result<AssignmentMap, GameError> {
    if ids.len() < 2 {
        return Err(GameError::InsufficientParticipants { count: ids.len() });
    }

    let mut recipients = ids.to_vec();
    let mut trials: u32 = 0;
    loop {
        recipients.shuffle(rng);
        trials += 1;
        if ids.iter().zip(&recipients).all(|(g, r)| g != r) {
            break;
        }
    }
    debug!(
        "Built derangement over {} participants after {} shuffle(s)",
        ids.len(),
        trials
    );

    Ok(AssignmentMap {
        map: ids.iter().copied().zip(recipients).collect(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ids(n: u32) -> Vec<ParticipantId> {
        (1..=n).map(ParticipantId).collect()
    }

    #[test]
    fn fewer_than_two_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            build_assignments(&[], &mut rng),
            Err(GameError::InsufficientParticipants { count: 0 })
        );
        assert_eq!(
            build_assignments(&ids(1), &mut rng),
            Err(GameError::InsufficientParticipants { count: 1 })
        );
    }

    #[test]
    fn two_participants_swap() {
        let mut rng = StdRng::seed_from_u64(7);
        let map = build_assignments(&ids(2), &mut rng).unwrap();
        assert_eq!(map.recipient_of(ParticipantId(1)), Some(ParticipantId(2)));
        assert_eq!(map.recipient_of(ParticipantId(2)), Some(ParticipantId(1)));
    }

    #[test]
    fn always_a_derangement_across_sizes_and_seeds() {
        for n in 2..=25 {
            for seed in 0..40 {
                let mut rng = StdRng::seed_from_u64(seed * 1000 + n as u64);
                let map = build_assignments(&ids(n), &mut rng).unwrap();
                assert_eq!(map.len(), n as usize);
                assert!(map.is_derangement(), "n={n} seed={seed}: {map:?}");
            }
        }
    }

    #[test]
    fn works_on_non_contiguous_ids() {
        let sparse = vec![ParticipantId(3), ParticipantId(10), ParticipantId(11), ParticipantId(40)];
        let mut rng = StdRng::seed_from_u64(99);
        let map = build_assignments(&sparse, &mut rng).unwrap();
        assert!(map.is_derangement());
        for (giver, recipient) in map.iter() {
            assert!(sparse.contains(&giver));
            assert!(sparse.contains(&recipient));
        }
    }

    #[test]
    fn three_participants_produce_both_cycles() {
        // The only derangements of {1,2,3} are the two 3-cycles; a fair
        // sampler should hit both within a few hundred draws.
        let mut rng = StdRng::seed_from_u64(2024);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let map = build_assignments(&ids(3), &mut rng).unwrap();
            seen.insert(map.recipient_of(ParticipantId(1)));
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn is_derangement_detects_fixed_point() {
        let map = AssignmentMap {
            map: [(ParticipantId(1), ParticipantId(1)), (ParticipantId(2), ParticipantId(2))]
                .into_iter()
                .collect(),
        };
        assert!(!map.is_derangement());
    }
}
