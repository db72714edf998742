// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// orchestrator, or into local ViewState mutations (text entry, modal
// dismissal, exit prompt).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::widgets::quit_confirm;
use super::ViewState;
use crate::protocol::{MenuView, RevealView, ScreenView, UserCommand};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // On Windows crossterm emits both Press and Release; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C opens the exit prompt from anywhere; it never exits directly.
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        open_quit_prompt(view_state);
        return None;
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.notice.is_some() {
        if matches!(key_event.code, KeyCode::Enter | KeyCode::Esc) {
            view_state.notice = None;
        }
        return None;
    }

    match &view_state.screen {
        ScreenView::Menu(menu) => {
            let menu = menu.clone();
            handle_menu(key_event, &menu, view_state)
        }
        ScreenView::Register => handle_register(key_event, view_state),
        ScreenView::Welcome { .. } => match key_event.code {
            KeyCode::Enter | KeyCode::Esc => Some(UserCommand::ReturnToMenu),
            _ => None,
        },
        ScreenView::Reveal(reveal) => handle_reveal(key_event, reveal),
    }
}

fn handle_menu(
    key_event: KeyEvent,
    menu: &MenuView,
    view_state: &mut ViewState,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            menu.can_draw.then_some(UserCommand::Draw)
        }
        KeyCode::Enter => Some(UserCommand::OpenRegistration),
        KeyCode::Char('s') | KeyCode::Char('S') => menu.can_draw.then_some(UserCommand::Draw),
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            open_quit_prompt(view_state);
            None
        }
        _ => None,
    }
}

/// Name entry: printable characters edit the buffer, Enter submits.
fn handle_register(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => Some(UserCommand::CancelRegistration),
        KeyCode::Enter => Some(UserCommand::Register(view_state.name_input.clone())),
        KeyCode::Backspace => {
            view_state.name_input.pop();
            None
        }
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            view_state.name_input.push(c);
            None
        }
        _ => None,
    }
}

fn handle_reveal(key_event: KeyEvent, reveal: &RevealView) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter => {
            if reveal.can_advance() {
                Some(UserCommand::Advance)
            } else {
                Some(UserCommand::ReturnToMenu)
            }
        }
        KeyCode::Right => reveal.can_advance().then_some(UserCommand::Advance),
        KeyCode::Left => reveal.can_retreat.then_some(UserCommand::Retreat),
        KeyCode::Esc => Some(UserCommand::ReturnToMenu),
        _ => None,
    }
}

/// Exit prompt: type the confirmation word, Enter submits, Esc cancels.
/// A wrong answer closes the prompt.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter => {
            let confirmed =
                quit_confirm::is_confirmed(&view_state.quit_input, &view_state.confirmation_word);
            close_quit_prompt(view_state);
            confirmed.then_some(UserCommand::Quit)
        }
        KeyCode::Esc => {
            close_quit_prompt(view_state);
            None
        }
        KeyCode::Backspace => {
            view_state.quit_input.pop();
            None
        }
        KeyCode::Char(c) => {
            view_state.quit_input.push(c);
            None
        }
        _ => None,
    }
}

fn open_quit_prompt(view_state: &mut ViewState) {
    view_state.confirm_quit = true;
    view_state.quit_input.clear();
}

fn close_quit_prompt(view_state: &mut ViewState) {
    view_state.confirm_quit = false;
    view_state.quit_input.clear();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ParticipantId;
    use crate::protocol::Notice;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    /// Helper to create a KeyEvent with no modifiers.
    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    /// Helper to create a KeyEvent with Ctrl modifier.
    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(state: &mut ViewState, text: &str) {
        for c in text.chars() {
            assert_eq!(handle_key(key(KeyCode::Char(c)), state), None);
        }
    }

    fn menu_state(count: usize) -> ViewState {
        let mut state = ViewState::default();
        state.screen = ScreenView::Menu(MenuView {
            participant_count: count,
            can_draw: count >= 2,
            game_started: false,
        });
        state
    }

    fn reveal_state(can_retreat: bool, has_more_history: bool, can_draw_new: bool) -> ViewState {
        let mut state = ViewState::default();
        state.screen = ScreenView::Reveal(RevealView {
            name: "Alice".into(),
            recipient: ParticipantId(2),
            position: 0,
            history_len: 1,
            pool_remaining: 0,
            can_retreat,
            has_more_history,
            can_draw_new,
        });
        state
    }

    // -- Menu --

    #[test]
    fn enter_on_menu_opens_registration() {
        let mut state = menu_state(0);
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::OpenRegistration)
        );
    }

    #[test]
    fn s_draws_only_with_two_players() {
        let mut state = menu_state(1);
        assert_eq!(handle_key(key(KeyCode::Char('s')), &mut state), None);
        let mut state = menu_state(2);
        assert_eq!(
            handle_key(key(KeyCode::Char('s')), &mut state),
            Some(UserCommand::Draw)
        );
    }

    #[test]
    fn ctrl_enter_draws() {
        let mut state = menu_state(3);
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Enter), &mut state),
            Some(UserCommand::Draw)
        );
        let mut state = menu_state(1);
        assert_eq!(handle_key(ctrl_key(KeyCode::Enter), &mut state), None);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = menu_state(2);
        let mut event = key(KeyCode::Enter);
        event.kind = KeyEventKind::Release;
        assert_eq!(handle_key(event, &mut state), None);
    }

    // -- Registration --

    #[test]
    fn typing_builds_name_and_enter_submits() {
        let mut state = ViewState::default();
        state.screen = ScreenView::Register;
        type_text(&mut state, "Alicx");
        handle_key(key(KeyCode::Backspace), &mut state);
        type_text(&mut state, "e");
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::Register("Alice".into()))
        );
    }

    #[test]
    fn q_is_text_on_register_screen() {
        let mut state = ViewState::default();
        state.screen = ScreenView::Register;
        type_text(&mut state, "Quinn");
        assert!(!state.confirm_quit);
        assert_eq!(state.name_input, "Quinn");
    }

    #[test]
    fn esc_cancels_registration() {
        let mut state = ViewState::default();
        state.screen = ScreenView::Register;
        assert_eq!(
            handle_key(key(KeyCode::Esc), &mut state),
            Some(UserCommand::CancelRegistration)
        );
    }

    // -- Welcome --

    #[test]
    fn welcome_returns_to_menu() {
        let mut state = ViewState::default();
        state.screen = ScreenView::Welcome {
            name: "Alice".into(),
            id: ParticipantId(1),
        };
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::ReturnToMenu)
        );
        assert_eq!(
            handle_key(key(KeyCode::Esc), &mut state),
            Some(UserCommand::ReturnToMenu)
        );
    }

    // -- Reveal --

    #[test]
    fn reveal_navigation_keys() {
        let mut state = reveal_state(true, true, false);
        assert_eq!(handle_key(key(KeyCode::Right), &mut state), Some(UserCommand::Advance));
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), Some(UserCommand::Advance));
        assert_eq!(handle_key(key(KeyCode::Left), &mut state), Some(UserCommand::Retreat));
        assert_eq!(
            handle_key(key(KeyCode::Esc), &mut state),
            Some(UserCommand::ReturnToMenu)
        );
    }

    #[test]
    fn reveal_at_first_entry_ignores_left() {
        let mut state = reveal_state(false, false, true);
        assert_eq!(handle_key(key(KeyCode::Left), &mut state), None);
    }

    #[test]
    fn reveal_when_all_drawn_enter_goes_to_menu() {
        let mut state = reveal_state(true, false, false);
        assert_eq!(handle_key(key(KeyCode::Right), &mut state), None);
        assert_eq!(
            handle_key(key(KeyCode::Enter), &mut state),
            Some(UserCommand::ReturnToMenu)
        );
    }

    // -- Notices --

    #[test]
    fn notice_blocks_input_until_dismissed() {
        let mut state = menu_state(2);
        state.notice = Some(Notice::info("Done", "All drawn"));
        assert_eq!(handle_key(key(KeyCode::Char('s')), &mut state), None);
        assert!(state.notice.is_some());
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), None);
        assert!(state.notice.is_none());
        assert_eq!(
            handle_key(key(KeyCode::Char('s')), &mut state),
            Some(UserCommand::Draw)
        );
    }

    // -- Exit prompt --

    #[test]
    fn q_opens_exit_prompt() {
        let mut state = menu_state(0);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), None);
        assert!(state.confirm_quit);
    }

    #[test]
    fn ctrl_c_opens_exit_prompt_from_any_screen() {
        let mut state = ViewState::default();
        state.screen = ScreenView::Register;
        assert_eq!(handle_key(ctrl_key(KeyCode::Char('c')), &mut state), None);
        assert!(state.confirm_quit);
    }

    #[test]
    fn typing_confirmation_word_quits() {
        let mut state = menu_state(0);
        handle_key(key(KeyCode::Char('q')), &mut state);
        type_text(&mut state, "YES");
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), Some(UserCommand::Quit));
    }

    #[test]
    fn wrong_answer_closes_prompt_without_quitting() {
        let mut state = menu_state(0);
        handle_key(key(KeyCode::Char('q')), &mut state);
        type_text(&mut state, "y");
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), None);
        assert!(!state.confirm_quit);
        assert!(state.quit_input.is_empty());
    }

    #[test]
    fn esc_cancels_exit_prompt() {
        let mut state = menu_state(0);
        handle_key(key(KeyCode::Char('q')), &mut state);
        type_text(&mut state, "ye");
        assert_eq!(handle_key(key(KeyCode::Esc), &mut state), None);
        assert!(!state.confirm_quit);
    }

    #[test]
    fn exit_prompt_uses_configured_word() {
        let mut state = ViewState::new("Party".into(), "ho ho ho".into());
        handle_key(ctrl_key(KeyCode::Char('c')), &mut state);
        type_text(&mut state, "Ho Ho Ho");
        assert_eq!(handle_key(key(KeyCode::Enter), &mut state), Some(UserCommand::Quit));
    }
}
