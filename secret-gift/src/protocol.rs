// Messages exchanged between the TUI and the app orchestrator.
//
// The TUI sends `UserCommand`s; the orchestrator applies them to the game
// session and answers with `UiUpdate`s describing what to draw.

use crate::game::ParticipantId;

// ---------------------------------------------------------------------------
// TUI -> App
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Menu: open the name entry screen.
    OpenRegistration,
    /// Name entry: submit the typed name.
    Register(String),
    /// Name entry: abandon and go back to the menu.
    CancelRegistration,
    /// Menu: start the game, or continue it.
    Draw,
    /// Reveal: next entry, or a new draw.
    Advance,
    /// Reveal: previous entry.
    Retreat,
    /// Back to the menu from any screen.
    ReturnToMenu,
    /// Exit confirmed by the operator.
    Quit,
}

// ---------------------------------------------------------------------------
// App -> TUI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// Replace the current screen.
    Screen(Box<ScreenView>),
    /// Show a modal message on top of the current screen.
    Notice(Notice),
}

/// Everything the TUI needs to draw one screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    Menu(MenuView),
    Register,
    Welcome { name: String, id: ParticipantId },
    Reveal(RevealView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub participant_count: usize,
    /// At least two participants are registered.
    pub can_draw: bool,
    pub game_started: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealView {
    pub name: String,
    pub recipient: ParticipantId,
    /// Zero-based cursor position.
    pub position: usize,
    pub history_len: usize,
    pub pool_remaining: usize,
    pub can_retreat: bool,
    /// Advancing would replay an existing entry.
    pub has_more_history: bool,
    /// Advancing would draw a new participant.
    pub can_draw_new: bool,
}

impl RevealView {
    pub fn can_advance(&self) -> bool {
        self.has_more_history || self.can_draw_new
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }
}
