// Main menu widget: add player, start/continue game, exit.
//
// The start button only appears once two participants are registered, and
// its label switches to "Continue" after the first draw.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::MenuView;

pub fn render(frame: &mut Frame, area: Rect, view: &MenuView, title: &str) {
    let lines = build_menu_lines(view, title);
    let top_pad = (area.height as usize).saturating_sub(lines.len()) / 2;
    let lines: Vec<Line> = std::iter::repeat_n(Line::raw(""), top_pad)
        .chain(lines)
        .collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Label for the draw button, or `None` when drawing is not offered.
pub fn draw_label(view: &MenuView) -> Option<&'static str> {
    match (view.can_draw, view.game_started) {
        (false, _) => None,
        (true, false) => Some("Start Game (s / Ctrl+Enter)"),
        (true, true) => Some("Continue Game (s / Ctrl+Enter)"),
    }
}

fn build_menu_lines<'a>(view: &MenuView, title: &str) -> Vec<Line<'a>> {
    let mut lines = vec![
        Line::styled(
            title.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(""),
        Line::from(Span::styled(
            "   ADD PLAYER (Enter)   ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];

    match draw_label(view) {
        Some(label) => lines.push(Line::from(Span::styled(
            format!(" {label} "),
            Style::default().fg(Color::Black).bg(Color::Rgb(230, 126, 34)),
        ))),
        None => lines.push(Line::styled(
            "Register at least 2 players to start",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        )),
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!("{} registered", plural(view.participant_count, "player")),
        Style::default().fg(Color::Gray),
    ));
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Exit App (q)",
        Style::default().fg(Color::DarkGray),
    ));
    lines
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
