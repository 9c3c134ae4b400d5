//! Header bar: title, cripple-mode checkbox, and filter or status line.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::state::{AppState, InputMode};
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Length(10), // Title
        Constraint::Length(42), // Cripple mode
        Constraint::Min(20),    // Filter/Status
    ])
    .split(area);

    frame.render_widget(Paragraph::new(" gpuglot ").style(Styles::header()), chunks[0]);

    let (checkbox, style) = if state.factor_in_cripple() {
        ("[x]", Styles::mode_crippled())
    } else {
        ("[ ]", Styles::mode_ignored())
    };
    let mode = Line::from(vec![
        Span::styled(format!(" {} ", checkbox), style),
        Span::styled(" Factor in Crippled FP32 Performance ", Styles::header()),
    ]);
    frame.render_widget(Paragraph::new(mode).style(Styles::header()), chunks[1]);

    let right = match state.input_mode {
        InputMode::Filter => Line::from(vec![
            Span::styled(" Search GPU names: ", Styles::header()),
            Span::styled(format!("{}_", state.filter_input), Styles::filter_input()),
        ]),
        InputMode::PageJump => Line::from(vec![
            Span::styled(" Go to page: ", Styles::header()),
            Span::styled(format!("{}_", state.page_jump_input), Styles::filter_input()),
        ]),
        InputMode::Normal => match (&state.status_message, state.grid.filter()) {
            (Some(msg), _) => Line::from(Span::styled(format!(" {} ", msg), Styles::header())),
            (None, Some(f)) => Line::from(vec![
                Span::styled(" Filter: ", Styles::header()),
                Span::styled(f.to_string(), Styles::filter_input()),
            ]),
            (None, None) => Line::from(Span::styled(
                " ?:help  /:search  c:cripple mode ",
                Styles::header(),
            )),
        },
    };
    frame.render_widget(Paragraph::new(right).style(Styles::header()), chunks[2]);
}
