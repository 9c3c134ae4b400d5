//! One-time notice shown when crippled accumulate readings are ignored.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::popup_area;
use crate::tui::style::Styles;

pub const NOTICE_TITLE: &str = " Warning ⚠ ";

pub const NOTICE_LINES: [&str; 4] = [
    "FP16 accumulation is rarely (if ever) used in DL code.",
    "FP32 accum is locked-in as an immutable default by PyTorch, and FP16 accum is \
     difficult to use outside of inference without encountering precision problems.",
    "",
    "Keep this in mind when reading the changed values.",
];

pub const NOTICE_BUTTON: &str = "[ Alright ]";

/// Renders the modal notice. Only Enter, Esc or Space dismiss it.
pub fn render_cripple_notice(frame: &mut Frame, area: Rect) {
    let popup = popup_area(area, 60, 40, (40, 72), (10, 14));
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(NOTICE_TITLE)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let body: Vec<Line> = NOTICE_LINES
        .iter()
        .map(|l| Line::from(Span::styled(*l, Style::default().fg(Color::White))))
        .collect();
    frame.render_widget(
        Paragraph::new(body).wrap(Wrap { trim: true }),
        chunks[0],
    );

    let button = Paragraph::new(Line::from(Span::styled(
        NOTICE_BUTTON,
        Styles::mode_crippled(),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(button, chunks[1]);
}
