// Modal notice overlay (warnings and informational messages).

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::protocol::{Notice, NoticeLevel};
use crate::tui::layout::centered_rect;

const DIALOG_WIDTH: u16 = 54;
const DIALOG_HEIGHT: u16 = 7;

pub fn render(frame: &mut Frame, area: Rect, notice: &Notice) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let color = match notice.level {
        NoticeLevel::Info => Color::Cyan,
        NoticeLevel::Warning => Color::Yellow,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", notice.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::raw(""),
        Line::styled(notice.message.clone(), Style::default().fg(Color::White)),
        Line::raw(""),
        Line::styled("OK (Enter)", Style::default().fg(Color::DarkGray)),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .centered()
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}
