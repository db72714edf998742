// Full-screen terminal UI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the screen the app orchestrator
// last pushed, plus purely local state (text being typed, open modals). The
// orchestrator pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders on a fixed tick.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::protocol::{MenuView, Notice, ScreenView, UiUpdate, UserCommand};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state read by `render_frame`.
pub struct ViewState {
    /// Screen last pushed by the orchestrator.
    pub screen: ScreenView,
    /// Name being typed on the registration screen.
    pub name_input: String,
    /// Modal message awaiting dismissal.
    pub notice: Option<Notice>,
    /// Whether the exit prompt is open.
    pub confirm_quit: bool,
    /// Text typed into the exit prompt.
    pub quit_input: String,
    /// Menu heading.
    pub title: String,
    /// Word that must be typed to exit.
    pub confirmation_word: String,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new("Gift Exchange System".to_string(), "yes".to_string())
    }
}

impl ViewState {
    pub fn new(title: String, confirmation_word: String) -> Self {
        ViewState {
            screen: ScreenView::Menu(MenuView {
                participant_count: 0,
                can_draw: false,
                game_started: false,
            }),
            name_input: String::new(),
            notice: None,
            confirm_quit: false,
            quit_input: String::new(),
            title,
            confirmation_word,
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Screen(view) => {
            // Entering (or being sent back to) name entry starts from blank.
            if *view == ScreenView::Register {
                state.name_input.clear();
            }
            state.screen = *view;
        }
        UiUpdate::Notice(notice) => {
            state.notice = Some(notice);
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame: title, current screen, help, then overlays.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    render_title_bar(frame, &layout, state);
    match &state.screen {
        ScreenView::Menu(menu) => widgets::menu::render(frame, layout.body, menu, &state.title),
        ScreenView::Register => widgets::register::render(frame, layout.body, &state.name_input),
        ScreenView::Welcome { name, id } => {
            widgets::welcome::render(frame, layout.body, name, *id)
        }
        ScreenView::Reveal(reveal) => widgets::reveal::render(frame, layout.body, reveal),
    }
    render_help_bar(frame, &layout, state);

    if let Some(notice) = &state.notice {
        widgets::notice::render(frame, frame.area(), notice);
    }
    if state.confirm_quit {
        widgets::quit_confirm::render(
            frame,
            frame.area(),
            &state.confirmation_word,
            &state.quit_input,
        );
    }
}

fn render_title_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let screen_name = match &state.screen {
        ScreenView::Menu(_) => "Menu",
        ScreenView::Register => "Add Player",
        ScreenView::Welcome { .. } => "Welcome",
        ScreenView::Reveal(_) => "Reveal",
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        format!(" {} | {}", state.title, screen_name),
        Style::default().fg(Color::White),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.title_bar);
}

/// Keyboard hints for whatever currently has focus.
pub fn help_text(state: &ViewState) -> &'static str {
    if state.confirm_quit {
        return " Type the confirmation word | Enter:Submit | Esc:Cancel";
    }
    if state.notice.is_some() {
        return " Enter/Esc:Dismiss";
    }
    match &state.screen {
        ScreenView::Menu(menu) if menu.can_draw => " Enter:Add Player | s:Draw | q:Exit",
        ScreenView::Menu(_) => " Enter:Add Player | q:Exit",
        ScreenView::Register => " Enter:Register | Esc:Cancel | Ctrl+C:Exit",
        ScreenView::Welcome { .. } => " Enter:Main Menu",
        ScreenView::Reveal(_) => " Enter/Right:Next | Left:Previous | Esc:Main Menu",
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal once the exit is confirmed.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    mut view_state: ViewState,
    frame_interval: Duration,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(frame_interval);
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        debug!("UI channel closed");
                        break Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Resize is picked up on the next render tick
                    }
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break Err(e.into());
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
