// Large block-digit rendering for ids and recipient numbers.
//
// Digits are drawn from a 3x5 pixel font. Each pixel is two cells wide so
// the glyphs look roughly square in a terminal, and the whole number is
// scaled up when the area has room.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

const GLYPH_WIDTH: usize = 3;
const GLYPH_HEIGHT: usize = 5;
const MAX_SCALE: usize = 3;

const GLYPHS: [[&str; GLYPH_HEIGHT]; 10] = [
    ["###", "# #", "# #", "# #", "###"],
    [" # ", "## ", " # ", " # ", "###"],
    ["###", "  #", "###", "#  ", "###"],
    ["###", "  #", "###", "  #", "###"],
    ["# #", "# #", "###", "  #", "  #"],
    ["###", "#  ", "###", "  #", "###"],
    ["###", "#  ", "###", "# #", "###"],
    ["###", "  #", "  #", "  #", "  #"],
    ["###", "# #", "###", "# #", "###"],
    ["###", "# #", "###", "  #", "###"],
];

/// Render `number` as block digits centered in `area`.
///
/// Falls back to plain bold text when even scale 1 does not fit.
pub fn render(frame: &mut Frame, area: Rect, number: u32, color: Color) {
    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let digits = number.to_string();

    let Some(scale) = fit_scale(digits.len(), area) else {
        let paragraph = Paragraph::new(Line::styled(digits, style)).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    };

    let rows = block_lines(number, scale);
    let top_pad = (area.height as usize).saturating_sub(rows.len()) / 2;
    let lines: Vec<Line> = std::iter::repeat_n(Line::raw(""), top_pad)
        .chain(rows.into_iter().map(|row| Line::styled(row, style)))
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Text rows for `number` at the given scale.
pub fn block_lines(number: u32, scale: usize) -> Vec<String> {
    let scale = scale.max(1);
    let digits: Vec<usize> = number
        .to_string()
        .bytes()
        .map(|b| (b - b'0') as usize)
        .collect();

    let mut rows = Vec::with_capacity(GLYPH_HEIGHT * scale);
    for glyph_row in 0..GLYPH_HEIGHT {
        let mut row = String::new();
        for (i, digit) in digits.iter().enumerate() {
            if i > 0 {
                row.push_str(&" ".repeat(2 * scale));
            }
            for pixel in GLYPHS[*digit][glyph_row].chars() {
                let cell = if pixel == '#' { "█" } else { " " };
                row.push_str(&cell.repeat(2 * scale));
            }
        }
        for _ in 0..scale {
            rows.push(row.clone());
        }
    }
    rows
}

/// Width in cells of `digit_count` digits at `scale`.
fn rendered_width(digit_count: usize, scale: usize) -> usize {
    let glyphs = digit_count * GLYPH_WIDTH * 2 * scale;
    let gaps = digit_count.saturating_sub(1) * 2 * scale;
    glyphs + gaps
}

/// Largest scale that fits `area`, or `None` if nothing fits.
fn fit_scale(digit_count: usize, area: Rect) -> Option<usize> {
    (1..=MAX_SCALE).rev().find(|&scale| {
        rendered_width(digit_count, scale) <= area.width as usize
            && GLYPH_HEIGHT * scale <= area.height as usize
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
