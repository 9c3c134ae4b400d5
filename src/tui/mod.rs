//! Terminal User Interface for browsing the GPU table.
//!
//! One screen: a header bar, the hidden-column chips, the paginated table,
//! and a footer. Help, detail, chooser, notice and quit dialogs overlay it.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;
mod widgets;

pub use app::{App, TICK_RATE};
pub use state::{AppState, InputMode, PopupState};
