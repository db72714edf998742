// Application state and orchestration logic.
//
// Owns the game session and the current screen. Each `UserCommand` from the
// TUI is applied to completion before the next is read, and the resulting
// screen (plus any notice) is pushed back to the TUI as `UiUpdate`s.

use rand::rngs::StdRng;
use rand::Rng;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::game::{Advance, GameError, GameSession, ParticipantId};
use crate::protocol::{MenuView, Notice, RevealView, ScreenView, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// Which screen the operator is looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Register,
    Welcome { name: String, id: ParticipantId },
    Reveal,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState<R = StdRng> {
    pub session: GameSession<R>,
    pub screen: Screen,
}

impl<R: Rng> AppState<R> {
    pub fn new(session: GameSession<R>) -> Self {
        AppState {
            session,
            screen: Screen::Menu,
        }
    }

    /// Build the view for the current screen.
    ///
    /// Falls back to the menu if the reveal screen is requested with an
    /// empty history.
    pub fn screen_view(&self) -> ScreenView {
        match &self.screen {
            Screen::Menu => ScreenView::Menu(self.menu_view()),
            Screen::Register => ScreenView::Register,
            Screen::Welcome { name, id } => ScreenView::Welcome {
                name: name.clone(),
                id: *id,
            },
            Screen::Reveal => match self.reveal_view() {
                Some(view) => ScreenView::Reveal(view),
                None => ScreenView::Menu(self.menu_view()),
            },
        }
    }

    fn menu_view(&self) -> MenuView {
        MenuView {
            participant_count: self.session.registry().len(),
            can_draw: self.session.can_start(),
            game_started: self.session.is_started(),
        }
    }

    fn reveal_view(&self) -> Option<RevealView> {
        let history = self.session.history();
        let entry = self.session.current_reveal()?;
        let position = history.cursor()?;
        Some(RevealView {
            name: entry.name.clone(),
            recipient: entry.recipient,
            position,
            history_len: history.len(),
            pool_remaining: self.session.pool().len(),
            can_retreat: self.session.can_retreat(),
            has_more_history: !history.at_tail(),
            can_draw_new: !self.session.pool().is_empty(),
        })
    }

    fn show(&mut self, screen: Screen) -> UiUpdate {
        self.screen = screen;
        UiUpdate::Screen(Box::new(self.screen_view()))
    }
}

// ---------------------------------------------------------------------------
// Command handling
// ---------------------------------------------------------------------------

/// Apply one user command and return the UI updates it produces.
///
/// An empty result means nothing visible changed (e.g. retreating at the
/// first reveal).
pub fn handle_user_command<R: Rng>(state: &mut AppState<R>, cmd: UserCommand) -> Vec<UiUpdate> {
    match cmd {
        UserCommand::OpenRegistration => vec![state.show(Screen::Register)],
        UserCommand::Register(name) => {
            if state.screen != Screen::Register {
                debug!("Ignoring registration outside the name entry screen");
                return vec![];
            }
            handle_register(state, &name)
        }
        UserCommand::CancelRegistration | UserCommand::ReturnToMenu => {
            vec![state.show(Screen::Menu)]
        }
        UserCommand::Draw => {
            if state.screen != Screen::Menu {
                debug!("Ignoring draw outside the menu");
                return vec![];
            }
            handle_draw(state)
        }
        UserCommand::Advance => {
            if state.screen != Screen::Reveal {
                return vec![];
            }
            match state.session.advance() {
                Ok(Advance::Stayed) => vec![],
                Ok(step) => {
                    debug!("Advanced reveal: {:?}", step);
                    vec![state.show(Screen::Reveal)]
                }
                Err(e) => vec![error_notice(&e)],
            }
        }
        UserCommand::Retreat => {
            if state.screen == Screen::Reveal && state.session.retreat() {
                vec![state.show(Screen::Reveal)]
            } else {
                vec![]
            }
        }
        // Handled by the run loop
        UserCommand::Quit => vec![],
    }
}

fn handle_register<R: Rng>(state: &mut AppState<R>, name: &str) -> Vec<UiUpdate> {
    match state.session.register(name) {
        Ok(participant) => vec![state.show(Screen::Welcome {
            name: participant.name,
            id: participant.id,
        })],
        Err(GameError::EmptyName) => {
            // Re-sending the screen clears the input field.
            vec![
                state.show(Screen::Register),
                UiUpdate::Notice(Notice::warning("Error", "Name cannot be empty.")),
            ]
        }
        Err(GameError::DuplicateName { existing }) => vec![UiUpdate::Notice(Notice::warning(
            "Error",
            format!("The name '{existing}' has already been added!"),
        ))],
        Err(e) => {
            warn!("Registration failed: {}", e);
            vec![error_notice(&e)]
        }
    }
}

fn handle_draw<R: Rng>(state: &mut AppState<R>) -> Vec<UiUpdate> {
    match state.session.draw_next() {
        Ok(entry) => {
            info!("Revealed draw #{} for {}", state.session.history().len(), entry.name);
            vec![state.show(Screen::Reveal)]
        }
        Err(GameError::EmptyPool) => {
            if state.session.replay_last() {
                debug!("Pool empty, replaying last reveal");
                vec![state.show(Screen::Reveal)]
            } else {
                vec![UiUpdate::Notice(Notice::info(
                    "Done",
                    "All registered participants have been drawn.",
                ))]
            }
        }
        Err(e) => vec![error_notice(&e)],
    }
}

fn error_notice(error: &GameError) -> UiUpdate {
    match error {
        GameError::InsufficientParticipants { .. } | GameError::EmptyPool => {
            UiUpdate::Notice(Notice::info("Not yet", capitalize(&error.to_string())))
        }
        _ => UiUpdate::Notice(Notice::warning("Error", capitalize(&error.to_string()))),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Run the application event loop.
///
/// Pushes the initial menu, then applies commands from `cmd_rx` in arrival
/// order until `Quit` arrives or the command channel closes.
pub async fn run<R: Rng>(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState<R>,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let _ = ui_tx
        .send(UiUpdate::Screen(Box::new(state.screen_view())))
        .await;

    loop {
        match cmd_rx.recv().await {
            Some(UserCommand::Quit) => {
                info!("Quit command received, shutting down");
                break;
            }
            Some(cmd) => {
                debug!("Handling command {:?}", cmd);
                for update in handle_user_command(&mut state, cmd) {
                    if ui_tx.send(update).await.is_err() {
                        info!("UI channel closed, shutting down");
                        return Ok(());
                    }
                }
            }
            None => {
                info!("Command channel closed, shutting down");
                break;
            }
        }
    }

    info!(
        "Application event loop exiting ({} participants, {} reveals)",
        state.session.registry().len(),
        state.session.history().len()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
