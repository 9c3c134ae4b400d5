//! Hidden-column chips and the chooser popup that restores them.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

use super::popup_area;
use crate::column::ColumnId;
use crate::tui::style::Styles;

/// One-line strip of hidden columns, in mapping order.
pub fn render_hidden_chips(frame: &mut Frame, area: Rect, hidden: &[ColumnId]) {
    let mut spans = vec![Span::styled("Hidden Columns: ", Styles::accent())];
    if hidden.is_empty() {
        spans.push(Span::styled("none", Styles::dim()));
    }
    for id in hidden {
        spans.push(Span::styled(format!(" {} ✕ ", id.display_name()), Styles::chip()));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Popup listing hidden columns; Enter shows the highlighted one.
pub fn render_hidden_columns(frame: &mut Frame, area: Rect, hidden: &[ColumnId], selected: usize) {
    let popup = popup_area(area, 40, 60, (30, 48), (6, 18));
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Hidden Columns ")
        .borders(Borders::ALL)
        .border_style(Styles::popup_border());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let items: Vec<ListItem> = hidden
        .iter()
        .map(|id| ListItem::new(format!(" {} ", id.display_name())))
        .collect();
    let list = List::new(items)
        .style(Styles::default())
        .highlight_style(Styles::selected());
    let mut list_state = ListState::default();
    list_state.select(Some(selected.min(hidden.len().saturating_sub(1))));
    frame.render_stateful_widget(list, chunks[0], &mut list_state);

    let footer = Line::from(vec![
        Span::styled("Enter", Styles::help_key()),
        Span::styled(" show  ", Styles::help()),
        Span::styled("Esc", Styles::help_key()),
        Span::styled(" close", Styles::help()),
    ]);
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}
