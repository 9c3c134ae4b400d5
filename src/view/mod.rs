//! UI-agnostic view models.
//!
//! [`gpu`] builds a [`common::TableViewModel`] plus pager and chip data from the
//! grid and the current preferences. The TUI maps these to ratatui widgets;
//! `--print` renders them as plain text.

pub mod common;
pub mod gpu;
