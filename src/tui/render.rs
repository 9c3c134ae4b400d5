//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use super::state::{AppState, PopupState};
use super::widgets::{
    render_cripple_notice, render_detail, render_footer, render_gpu_table, render_header,
    render_help, render_hidden_chips, render_hidden_columns, render_quit_confirm,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    state.clamp_selection();
    let view = state.view();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(1), // Hidden column chips
        Constraint::Min(5),    // Table
        Constraint::Length(1), // Pager
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    render_hidden_chips(frame, chunks[1], &view.hidden);
    render_gpu_table(frame, chunks[2], state, &view);
    render_footer(frame, chunks[3], &view);

    // Popups (rendered last to overlay everything)
    match state.popup {
        PopupState::None => {}
        PopupState::Help { mut scroll } => {
            render_help(frame, area, &mut scroll);
            state.popup = PopupState::Help { scroll };
        }
        PopupState::QuitConfirm => render_quit_confirm(frame, area),
        PopupState::CrippleNotice => render_cripple_notice(frame, area),
        PopupState::Detail { .. } => render_detail(frame, area, state),
        PopupState::HiddenColumns { selected } => {
            render_hidden_columns(frame, area, &view.hidden, selected)
        }
    }
}
