//! gpuglot - GPU specification table library.
//!
//! The building blocks behind the `gpuglot` viewer:
//! - [`model`] - record schema and the bundled dataset
//! - [`fmt`] - unit formatting with compact and precise renderings
//! - [`resolve`] - dual-reading (crippled vs. full-rate) resolution and ordering
//! - [`column`], [`visibility`] - column catalogue and show/hide mapping
//! - [`settings`], [`prefs`] - persisted preferences and the cripple-mode toggle
//! - [`grid`], [`debounce`] - sorting, filtering and pagination
//! - [`view`], [`tui`] - view models and the interactive terminal UI

pub mod column;
pub mod debounce;
pub mod fmt;
pub mod grid;
pub mod model;
pub mod prefs;
pub mod resolve;
pub mod settings;
pub mod tui;
pub mod view;
pub mod visibility;
