//! Detail popup: precise readings of the selected GPU.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::popup_area;
use crate::tui::state::{AppState, PopupState};
use crate::tui::style::Styles;
use crate::view::gpu::{DetailLine, build_detail_view};

const LABEL_WIDTH: usize = 40;

fn detail_line(l: &DetailLine) -> Line<'static> {
    let value_style = l.style.map(Styles::from_class).unwrap_or_else(Styles::default);
    Line::from(vec![
        Span::styled(format!("  {:<width$}", l.label, width = LABEL_WIDTH), Styles::help()),
        Span::styled(l.value.clone(), value_style),
    ])
}

pub fn render_detail(frame: &mut Frame, area: Rect, state: &mut AppState) {
    let factor_in_cripple = state.factor_in_cripple();
    let PopupState::Detail { record, scroll } = &mut state.popup else {
        return;
    };
    let Some(gpu) = state.grid.record(*record) else {
        return;
    };
    let vm = build_detail_view(gpu, factor_in_cripple);

    let popup = popup_area(area, 70, 85, (50, 100), (12, 40));
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(vm.title.as_str())
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let mut content: Vec<Line> = vec![Line::from(Span::styled(
        "Specifications",
        Styles::section_header(),
    ))];
    content.extend(vm.lines.iter().map(detail_line));
    content.push(Line::from(""));
    content.push(Line::from(Span::styled("Dual readings", Styles::section_header())));
    content.extend(vm.dual.iter().map(detail_line));

    let max_scroll = content.len().saturating_sub(chunks[0].height as usize);
    if *scroll > max_scroll {
        *scroll = max_scroll;
    }

    let paragraph = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .scroll((*scroll as u16, 0));
    frame.render_widget(paragraph, chunks[0]);

    let footer = Line::from(vec![
        Span::styled("↑/↓", Styles::help_key()),
        Span::styled(" scroll  ", Styles::help()),
        Span::styled("c", Styles::help_key()),
        Span::styled(" cripple mode  ", Styles::help()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" close", Styles::help()),
    ]);
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}
