//! GPU table widget.
//! Thin TUI wrapper over [`crate::view::gpu::build_gpu_view`].

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::tui::state::AppState;
use crate::tui::style::Styles;
use crate::view::gpu::GpuView;

pub fn render_gpu_table(frame: &mut Frame, area: Rect, state: &mut AppState, view: &GpuView) {
    let vm = &view.table;

    if vm.rows.is_empty() {
        let block = Block::default()
            .title(vm.title.as_str())
            .borders(Borders::ALL)
            .style(Styles::default());
        frame.render_widget(Paragraph::new("No GPUs match the filter").block(block), area);
        return;
    }

    // Header with sort indicator and column cursor
    let headers: Vec<Span> = vm
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let indicator = match vm.sort_column {
                Some(s) if s == i => {
                    if vm.sort_ascending { "▲" } else { "▼" }
                }
                _ => "",
            };
            let style = if i == state.selected_column {
                Styles::table_header_selected()
            } else {
                Styles::table_header()
            };
            Span::styled(format!("{}{}", h, indicator), style)
        })
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let rows: Vec<Row> = vm
        .rows
        .iter()
        .map(|vr| {
            let cells = vr.cells.iter().map(|c| match c.style {
                Some(s) => Span::styled(c.text.clone(), Styles::from_class(s)),
                None => Span::raw(c.text.clone()),
            });
            Row::new(cells).style(Styles::from_class(vr.style)).height(1)
        })
        .collect();

    let mut constraints: Vec<Constraint> =
        vm.widths.iter().map(|&w| Constraint::Length(w)).collect();
    constraints.push(Constraint::Fill(1));

    let table = Table::new(rows, constraints)
        .header(header)
        .block(
            Block::default()
                .title(vm.title.as_str())
                .borders(Borders::ALL)
                .style(Styles::default()),
        )
        .column_spacing(1)
        .row_highlight_style(Styles::selected());

    state.table_state.select(Some(state.selected_row));
    frame.render_stateful_widget(table, area, &mut state.table_state);
}
