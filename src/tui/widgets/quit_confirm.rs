//! Quit confirmation popup widget.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::popup_area;
use crate::tui::style::Styles;

/// Renders a centered quit confirmation popup.
pub fn render_quit_confirm(frame: &mut Frame, area: Rect) {
    let popup = popup_area(area, 50, 0, (40, 60), (7, 7));
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Exit gpuglot ")
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let key = Style::default().fg(Color::Yellow);
    let content = vec![
        Line::from(Span::styled(
            "Are you sure you want to quit?",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", key),
            Span::styled(" or ", Styles::dim()),
            Span::styled("q", key),
            Span::styled(" → quit", Styles::dim()),
        ]),
        Line::from(vec![
            Span::styled("Esc", key),
            Span::styled(" or ", Styles::dim()),
            Span::styled("n", key),
            Span::styled(" → cancel", Styles::dim()),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}
