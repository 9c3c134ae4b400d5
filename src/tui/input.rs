//! Input handling and keybindings.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, InputMode, PopupState};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    handle_key_at(state, key, Instant::now())
}

/// [`handle_key`] with an explicit clock for the filter debounce.
pub fn handle_key_at(state: &mut AppState, key: KeyEvent, now: Instant) -> KeyAction {
    match state.popup {
        PopupState::QuitConfirm => return handle_quit_confirm(state, key),
        PopupState::CrippleNotice => return handle_cripple_notice(state, key),
        PopupState::Help { .. } => return handle_help(state, key),
        PopupState::Detail { .. } => return handle_detail(state, key),
        PopupState::HiddenColumns { .. } => return handle_hidden_columns(state, key),
        PopupState::None => {}
    }
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Filter => handle_filter_mode(state, key, now),
        InputMode::PageJump => handle_page_jump_mode(state, key),
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        _ if is_ctrl_c(&key) => {
            state.popup = PopupState::None;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.popup = PopupState::None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// The notice is modal: only its button keys dismiss it.
fn handle_cripple_notice(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
            state.acknowledge_notice();
            KeyAction::None
        }
        _ if is_ctrl_c(&key) => KeyAction::Quit,
        _ => KeyAction::None,
    }
}

fn handle_help(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let PopupState::Help { scroll } = &mut state.popup else {
        return KeyAction::None;
    };
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
        KeyCode::PageUp => *scroll = scroll.saturating_sub(10),
        KeyCode::PageDown => *scroll = scroll.saturating_add(10),
        KeyCode::Home => *scroll = 0,
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::F(1) => {
            state.popup = PopupState::None
        }
        _ if is_ctrl_c(&key) => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::None
}

fn handle_detail(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let PopupState::Detail { scroll, .. } = &mut state.popup else {
        return KeyAction::None;
    };
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
        KeyCode::Home => *scroll = 0,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => state.popup = PopupState::None,
        // The notice, when due, replaces the popup.
        KeyCode::Char('c') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.toggle_cripple_mode()
        }
        _ if is_ctrl_c(&key) => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::None
}

fn handle_hidden_columns(state: &mut AppState, key: KeyEvent) -> KeyAction {
    let hidden = state.prefs.visibility().hidden();
    let PopupState::HiddenColumns { selected } = &mut state.popup else {
        return KeyAction::None;
    };
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => *selected = selected.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => {
            if *selected + 1 < hidden.len() {
                *selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(id) = hidden.get(*selected).copied() {
                let remaining = hidden.len() - 1;
                let next = (*selected).min(remaining.saturating_sub(1));
                state.show_column(id);
                state.popup = if remaining == 0 {
                    PopupState::None
                } else {
                    PopupState::HiddenColumns { selected: next }
                };
            }
        }
        KeyCode::Esc | KeyCode::Char('u') | KeyCode::Char('q') => state.popup = PopupState::None,
        _ if is_ctrl_c(&key) => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::None
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if is_ctrl_c(&key) {
        return KeyAction::Quit;
    }
    state.status_message = None;

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => state.popup = PopupState::QuitConfirm,
        KeyCode::Char('?') | KeyCode::F(1) => state.popup = PopupState::Help { scroll: 0 },

        // Cripple mode
        KeyCode::Char('c') | KeyCode::Char('C') => state.toggle_cripple_mode(),

        // Filter
        KeyCode::Char('/') => state.begin_filter(),

        // Columns
        KeyCode::Left | KeyCode::Char('h') => state.select_previous_column(),
        KeyCode::Right | KeyCode::Char('l') => state.select_next_column(),
        KeyCode::Char('s') | KeyCode::Char('S') => state.cycle_sort(),
        KeyCode::Char('x') => state.hide_selected_column(),
        KeyCode::Char('u') => state.open_hidden_columns(),

        // Pages
        KeyCode::Char('n') | KeyCode::PageDown => state.next_page(),
        KeyCode::Char('p') | KeyCode::PageUp => state.previous_page(),
        KeyCode::Char('z') => state.cycle_page_size(),
        KeyCode::Char('g') => state.begin_page_jump(),

        // Rows
        KeyCode::Up | KeyCode::Char('k') => state.select_up(),
        KeyCode::Down | KeyCode::Char('j') => state.select_down(),
        KeyCode::Home => state.selected_row = 0,
        KeyCode::Enter => state.open_detail(),

        _ => {}
    }
    KeyAction::None
}

/// Handles keys in filter mode.
fn handle_filter_mode(state: &mut AppState, key: KeyEvent, now: Instant) -> KeyAction {
    match key.code {
        KeyCode::Esc => state.cancel_filter(),
        KeyCode::Enter => state.commit_filter(),
        KeyCode::Backspace => state.pop_filter_char(now),
        _ if is_ctrl_c(&key) => return KeyAction::Quit,
        KeyCode::Char(c) => {
            // Ignore control/alt-modified chars
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                return KeyAction::None;
            }
            state.push_filter_char(c, now);
        }
        _ => {}
    }
    KeyAction::None
}

/// Handles keys while typing a page number.
fn handle_page_jump_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            state.page_jump_input.clear();
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => state.commit_page_jump(),
        KeyCode::Backspace => {
            state.page_jump_input.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() => state.page_jump_input.push(c),
        _ if is_ctrl_c(&key) => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::None
}
