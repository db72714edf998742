// Name entry widget.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::layout::centered_rect;

const INPUT_WIDTH: u16 = 40;

pub fn render(frame: &mut Frame, area: Rect, input: &str) {
    let box_area = centered_rect(INPUT_WIDTH + 4, 9, area);
    let [prompt, field, buttons] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(box_area);

    frame.render_widget(
        Paragraph::new(Line::styled(
            "Enter Your Name:",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        prompt,
    );

    let field_text = Line::from(vec![
        Span::styled(
            visible_tail(input, INPUT_WIDTH as usize - 1).to_string(),
            Style::default().fg(Color::White),
        ),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]);
    frame.render_widget(
        Paragraph::new(field_text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        field,
    );

    let hint = Line::from(vec![
        Span::styled(" Cancel (Esc) ", Style::default().fg(Color::White).bg(Color::Red)),
        Span::raw("   "),
        Span::styled(
            " Register (Enter) ",
            Style::default().fg(Color::White).bg(Color::Green),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(vec![Line::raw(""), hint]).alignment(Alignment::Center),
        buttons,
    );
}

/// Last `max_chars` characters of `input`, so the cursor end stays visible.
fn visible_tail(input: &str, max_chars: usize) -> &str {
    let count = input.chars().count();
    if count <= max_chars {
        return input;
    }
    let skip = count - max_chars;
    match input.char_indices().nth(skip) {
        Some((idx, _)) => &input[idx..],
        None => "",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
