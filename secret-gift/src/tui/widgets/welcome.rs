// Welcome widget: shows a newly registered participant their gift number.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::big_number;
use crate::game::ParticipantId;

const WELCOME_COLOR: Color = Color::Rgb(241, 196, 15);

pub fn render(frame: &mut Frame, area: Rect, name: &str, id: ParticipantId) {
    let [heading, number, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .areas(area);

    let style = Style::default()
        .fg(WELCOME_COLOR)
        .add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(vec![
            Line::styled(format!("Welcome {name}!"), style),
            Line::styled("Write this number on your gift:", style),
        ])
        .alignment(Alignment::Center),
        heading,
    );

    big_number::render(frame, number, id.0, WELCOME_COLOR);

    frame.render_widget(
        Paragraph::new(Line::styled(
            "Return to Main Menu (Enter)",
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center),
        footer,
    );
}
