// Integration tests for the secret gift exchange.
//
// These exercise the library's public API end-to-end: the game session on
// its own, and the app orchestrator loop driven over its mpsc channels the
// way the TUI drives it.

use std::collections::{BTreeSet, HashSet};

use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_gift::app::{self, AppState};
use secret_gift::game::{
    build_assignments, Advance, GameError, GameSession, ParticipantId, Registry,
};
use secret_gift::protocol::{ScreenView, UiUpdate, UserCommand};

use tokio::sync::mpsc;

// ===========================================================================
// Test helpers
// ===========================================================================

fn ids(n: u32) -> Vec<ParticipantId> {
    (1..=n).map(ParticipantId).collect()
}

fn session_with(names: &[&str], seed: u64) -> GameSession {
    let mut session = GameSession::seeded(seed);
    for name in names {
        session.register(name).expect("registration should succeed");
    }
    session
}

fn id_of(session: &GameSession, name: &str) -> ParticipantId {
    session
        .registry()
        .participants()
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.id)
        .expect("participant should exist")
}

// ===========================================================================
// Derangement properties
// ===========================================================================

#[test]
fn derangement_is_bijection_without_fixed_points() {
    for n in 2..=40u32 {
        let mut rng = StdRng::seed_from_u64(u64::from(n) * 31);
        let map = build_assignments(&ids(n), &mut rng).unwrap();

        let keys: BTreeSet<_> = map.iter().map(|(g, _)| g).collect();
        let mut values: Vec<_> = map.iter().map(|(_, r)| r).collect();
        values.sort();
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), values, "n={n}");

        for (giver, recipient) in map.iter() {
            assert_ne!(giver, recipient, "n={n}: {giver} drew themself");
        }
    }
}

#[test]
fn derangement_needs_two_participants() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        build_assignments(&ids(1), &mut rng),
        Err(GameError::InsufficientParticipants { count: 1 })
    );
}

// ===========================================================================
// Registry properties
// ===========================================================================

#[test]
fn registry_ids_follow_registration_order() {
    let mut registry = Registry::new();
    let ids: Vec<_> = ["Charlie", "alpha", "Bravo"]
        .iter()
        .map(|n| registry.register(n).unwrap().id)
        .collect();
    assert_eq!(ids, vec![ParticipantId(1), ParticipantId(2), ParticipantId(3)]);
}

#[test]
fn registry_rejects_case_insensitive_duplicates_and_blanks() {
    let mut registry = Registry::new();
    registry.register("Alice").unwrap();
    assert!(matches!(
        registry.register("alice"),
        Err(GameError::DuplicateName { .. })
    ));
    assert_eq!(registry.register("  "), Err(GameError::EmptyName));
}

// ===========================================================================
// Session scenarios
// ===========================================================================

#[test]
fn alice_bob_carol_full_round() {
    let mut session = session_with(&["Alice", "Bob", "Carol"], 2025);
    session.start_game().unwrap();
    assert!(session.assignments().is_derangement());
    assert_eq!(session.assignments().len(), 3);

    let mut drawn = HashSet::new();
    let mut pool_sizes = vec![session.pool().len()];
    for _ in 0..3 {
        let entry = session.draw_next().unwrap();
        assert!(drawn.insert(entry.name.clone()));
        pool_sizes.push(session.pool().len());
    }
    assert_eq!(pool_sizes, vec![3, 2, 1, 0]);
    assert_eq!(session.draw_next(), Err(GameError::EmptyPool));

    let mut recipients: Vec<_> = session
        .history()
        .entries()
        .iter()
        .map(|e| e.recipient)
        .collect();
    recipients.sort();
    assert_eq!(recipients, ids(3));

    for entry in session.history().entries() {
        assert_ne!(id_of(&session, &entry.name), entry.recipient);
    }
}

#[test]
fn dave_joins_after_two_draws() {
    let mut session = session_with(&["Alice", "Bob", "Carol"], 404);
    let first = session.draw_next().unwrap();
    let second = session.draw_next().unwrap();
    let remaining_original = session.pool()[0].id;

    let dave = session.register("Dave").unwrap();
    assert_eq!(dave.id, ParticipantId(4));

    let map = session.assignments();
    assert_eq!(map.len(), 4);
    assert!(map.is_derangement());

    let pool: HashSet<_> = session.pool().iter().map(|p| p.id).collect();
    assert_eq!(pool, HashSet::from([remaining_original, dave.id]));

    // Earlier reveals keep what was shown.
    assert_eq!(session.history().entries()[0], first);
    assert_eq!(session.history().entries()[1], second);

    // The rest of the game still drains cleanly.
    session.draw_next().unwrap();
    session.draw_next().unwrap();
    assert!(session.is_all_drawn());
}

#[test]
fn navigation_is_bounded() {
    let mut session = session_with(&["A", "B", "C"], 1);
    session.draw_next().unwrap();
    assert!(!session.retreat(), "retreat at index 0 is a no-op");
    assert_eq!(session.history().cursor(), Some(0));

    assert_eq!(session.advance(), Ok(Advance::Drew));
    assert_eq!(session.advance(), Ok(Advance::Drew));
    assert_eq!(session.advance(), Ok(Advance::Stayed));
    assert_eq!(session.history().len(), 3);
    assert_eq!(session.history().cursor(), Some(2));

    assert!(session.retreat());
    assert!(session.retreat());
    assert!(!session.retreat());
    assert_eq!(session.advance(), Ok(Advance::Replayed));
    assert_eq!(session.history().len(), 3);
}

#[test]
fn pool_never_repeats_before_replenishment() {
    for seed in 0..20 {
        let names: Vec<String> = (0..12).map(|i| format!("Player {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut session = session_with(&refs, seed);

        let mut seen = HashSet::new();
        let mut expected_len = names.len();
        while let Ok(entry) = session.draw_next() {
            expected_len -= 1;
            assert_eq!(session.pool().len(), expected_len);
            assert!(seen.insert(entry.name), "seed {seed}: repeated draw");
        }
        assert_eq!(seen.len(), names.len());
    }
}

// ===========================================================================
// Orchestrator loop
// ===========================================================================

/// Send commands then Quit, collecting every update the loop produced.
async fn drive(state: AppState, commands: Vec<UserCommand>) -> Vec<UiUpdate> {
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, mut ui_rx) = mpsc::channel(256);

    let handle = tokio::spawn(app::run(cmd_rx, ui_tx, state));
    for cmd in commands {
        cmd_tx.send(cmd).await.unwrap();
    }
    cmd_tx.send(UserCommand::Quit).await.unwrap();
    handle.await.unwrap().unwrap();

    let mut updates = Vec::new();
    while let Some(update) = ui_rx.recv().await {
        updates.push(update);
    }
    updates
}

fn screens(updates: &[UiUpdate]) -> Vec<&ScreenView> {
    updates
        .iter()
        .filter_map(|u| match u {
            UiUpdate::Screen(view) => Some(view.as_ref()),
            UiUpdate::Notice(_) => None,
        })
        .collect()
}

#[tokio::test]
async fn run_pushes_initial_menu() {
    let updates = drive(AppState::new(GameSession::seeded(1)), vec![]).await;
    assert_eq!(updates.len(), 1);
    assert!(matches!(
        screens(&updates)[0],
        ScreenView::Menu(m) if m.participant_count == 0 && !m.can_draw
    ));
}

#[tokio::test]
async fn run_registers_and_reveals() {
    let commands = vec![
        UserCommand::OpenRegistration,
        UserCommand::Register("Alice".into()),
        UserCommand::ReturnToMenu,
        UserCommand::OpenRegistration,
        UserCommand::Register("Bob".into()),
        UserCommand::ReturnToMenu,
        UserCommand::Draw,
        UserCommand::Advance,
        UserCommand::Retreat,
    ];
    let updates = drive(AppState::new(GameSession::seeded(8)), commands).await;
    let screens = screens(&updates);

    assert!(matches!(
        screens[2],
        ScreenView::Welcome { name, id } if name == "Alice" && *id == ParticipantId(1)
    ));
    assert!(matches!(
        screens[5],
        ScreenView::Welcome { name, id } if name == "Bob" && *id == ParticipantId(2)
    ));
    assert!(matches!(screens[6], ScreenView::Menu(m) if m.can_draw && !m.game_started));

    let reveals: Vec<_> = screens[7..]
        .iter()
        .map(|s| match s {
            ScreenView::Reveal(r) => r.clone(),
            other => panic!("expected reveal, got {other:?}"),
        })
        .collect();
    assert_eq!(reveals.len(), 3);
    assert_eq!(reveals[0].position, 0);
    assert_eq!(reveals[1].position, 1);
    assert_eq!(reveals[2].position, 0);
    assert!(!reveals[1].can_advance());
    assert!(reveals[2].has_more_history);

    // With two players each must open the other's gift.
    assert_eq!(reveals[0].name == "Alice", reveals[0].recipient == ParticipantId(2));
    assert_eq!(reveals[1].name == "Alice", reveals[1].recipient == ParticipantId(2));
}

#[tokio::test]
async fn run_reports_duplicates_as_notice() {
    let commands = vec![
        UserCommand::OpenRegistration,
        UserCommand::Register("Alice".into()),
        UserCommand::OpenRegistration,
        UserCommand::Register("aLiCe".into()),
    ];
    let updates = drive(AppState::new(GameSession::seeded(3)), commands).await;
    match updates.last() {
        Some(UiUpdate::Notice(n)) => assert!(n.message.contains("Alice")),
        other => panic!("expected duplicate notice, got {other:?}"),
    }
}

#[tokio::test]
async fn run_exits_when_command_channel_closes() {
    let (cmd_tx, cmd_rx) = mpsc::channel::<UserCommand>(4);
    let (ui_tx, _ui_rx) = mpsc::channel(4);
    let handle = tokio::spawn(app::run(cmd_rx, ui_tx, AppState::new(GameSession::seeded(0))));
    drop(cmd_tx);
    handle.await.unwrap().unwrap();
}
