// Exit confirmation overlay widget.
//
// Renders a centered modal asking the operator to type the confirmation word.
// Displayed on top of the current screen when `ViewState::confirm_quit` is true.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::layout::centered_rect;

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 6;

/// Render the exit confirmation overlay centered on the screen.
pub fn render(frame: &mut Frame, area: Rect, confirmation_word: &str, typed: &str) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);

    // Clear the area behind the dialog so it renders cleanly on top
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Exit Confirmation ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::from(vec![
            Span::raw(" Type '"),
            Span::styled(
                confirmation_word.to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw("' to close the application:"),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::raw(" > "),
            Span::styled(typed.to_string(), Style::default().fg(Color::White)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::styled(
            " Enter to submit, Esc to cancel",
            Style::default().fg(Color::DarkGray),
        ),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(Color::Black));

    frame.render_widget(paragraph, dialog_area);
}

/// Whether `typed` matches the confirmation word, ignoring case and
/// surrounding whitespace.
pub fn is_confirmed(typed: &str, confirmation_word: &str) -> bool {
    let typed = typed.trim();
    !typed.is_empty() && typed.to_lowercase() == confirmation_word.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
