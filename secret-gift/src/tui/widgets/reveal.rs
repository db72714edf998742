// Reveal widget: the drawn participant and the gift number they open.
//
// Layout:
// Line 1-2: "{name}" / "Open gift:"
// Middle:   recipient number in block digits
// Bottom:   "< Previous (Left)"  "Main Menu (Esc)"  "Next/Draw Next (Enter/Right)"
//           progress line

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::big_number;
use crate::protocol::RevealView;

const REVEAL_COLOR: Color = Color::Rgb(46, 204, 113);

pub fn render(frame: &mut Frame, area: Rect, view: &RevealView) {
    let [heading, number, nav, progress] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(area);

    let style = Style::default()
        .fg(REVEAL_COLOR)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(vec![
            Line::styled(view.name.clone(), style),
            Line::styled("Open gift:", style),
        ])
        .alignment(Alignment::Center),
        heading,
    );

    big_number::render(frame, number, view.recipient.0, REVEAL_COLOR);

    frame.render_widget(
        Paragraph::new(nav_line(view)).alignment(Alignment::Center),
        nav,
    );
    frame.render_widget(
        Paragraph::new(Line::styled(
            progress_text(view),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        progress,
    );
}

/// Label for the forward control.
pub fn next_label(view: &RevealView) -> &'static str {
    if view.has_more_history {
        "Next (Enter/Right) >"
    } else {
        "Draw Next (Enter/Right)"
    }
}

fn nav_line(view: &RevealView) -> Line<'static> {
    Line::from(vec![
        button("< Previous (Left)", view.can_retreat),
        Span::raw("    "),
        button("Main Menu (Esc)", true),
        Span::raw("    "),
        button(next_label(view), view.can_advance()),
    ])
}

fn button(label: &'static str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    };
    Span::styled(format!(" {label} "), style)
}

fn progress_text(view: &RevealView) -> String {
    let mut text = format!("Reveal {} of {}", view.position + 1, view.history_len);
    if view.pool_remaining == 0 {
        text.push_str(" | everyone has been drawn");
    } else {
        text.push_str(&format!(" | {} still to draw", view.pool_remaining));
    }
    text
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
