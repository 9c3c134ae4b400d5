//! Help popup widget: keybindings and column notes.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::popup_area;
use crate::tui::style::Styles;

const KEYS: &[(&str, &str)] = &[
    ("q", "Quit (asks for confirmation)"),
    ("?", "Toggle this help"),
    ("/", "Search GPU names (Enter apply, Esc clear)"),
    ("c", "Toggle factoring in crippled FP32 accumulate"),
    ("←/→", "Select column"),
    ("s", "Cycle sort of selected column"),
    ("x", "Hide selected column"),
    ("u", "Show a hidden column"),
    ("↑/↓", "Select row"),
    ("Enter", "Precise readings of selected GPU"),
    ("n/p", "Next / previous page"),
    ("g", "Go to page"),
    ("z", "Switch page size (10/20)"),
];

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled("Keys", Styles::section_header()))];
    for (key, desc) in KEYS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<8}", key), Style::default().fg(Color::Yellow)),
            Span::raw(*desc),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Columns", Styles::section_header())));
    lines.push(Line::from(
        "  FP16, BF16 and FP8 carry two readings. Consumer parts with a crippled",
    ));
    lines.push(Line::from(
        "  FP32 accumulate rate show the halved figure while the checkbox is set,",
    ));
    lines.push(Line::from("  and the full-rate figure when it is cleared."));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  N/A marks a metric that does not exist on that architecture.",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "  Sorting places N/A before any value, so it sinks when descending.",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

/// Renders the help popup centered on screen with scroll support.
pub fn render_help(frame: &mut Frame, area: Rect, scroll: &mut usize) {
    let popup = popup_area(area, 60, 80, (40, 80), (10, 30));
    frame.render_widget(Clear, popup);

    let content = help_lines();
    let content_lines = content.len();

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::vertical([
        Constraint::Min(1),    // Content
        Constraint::Length(1), // Footer
    ])
    .split(inner);

    // Clamp scroll to valid range
    let max_scroll = content_lines.saturating_sub(chunks[0].height as usize);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0))
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, chunks[0]);

    let scroll_info = if max_scroll > 0 {
        format!(" [{}/{}]", *scroll + 1, max_scroll + 1)
    } else {
        String::new()
    };
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" to close, ", Style::default().fg(Color::DarkGray)),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::styled(" to scroll", Style::default().fg(Color::DarkGray)),
        Span::styled(scroll_info, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(footer, chunks[1]);
}
