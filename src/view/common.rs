//! UI-agnostic view model types.
//!
//! These types represent presentation data without any dependency on a specific
//! rendering framework. The TUI maps them to ratatui Styles.

/// Row- or cell-level style classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowStyleClass {
    #[default]
    Normal,
    /// Warning level (TUI: yellow). The "Crippled" badge.
    Warning,
    /// Positive (TUI: green). The "Good" badge.
    Active,
    /// Dimmed (TUI: dark gray). Not-applicable cells.
    Dimmed,
    /// Accent (TUI: cyan). Citation links.
    Accent,
}

/// A single table cell with optional per-cell style override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewCell {
    pub text: String,
    /// `None` = inherit row style.
    pub style: Option<RowStyleClass>,
}

impl ViewCell {
    pub fn plain(text: String) -> Self {
        Self { text, style: None }
    }

    pub fn styled(text: String, style: RowStyleClass) -> Self {
        Self {
            text,
            style: Some(style),
        }
    }
}

/// One table row, parameterized by entity ID type.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow<Id> {
    pub id: Id,
    pub cells: Vec<ViewCell>,
    pub style: RowStyleClass,
}

/// Complete table ready to be rendered by any frontend.
#[derive(Debug, Clone, PartialEq)]
pub struct TableViewModel<Id> {
    pub title: String,
    pub headers: Vec<String>,
    pub widths: Vec<u16>,
    pub rows: Vec<ViewRow<Id>>,
    /// Position in `headers` of the sorted column, if any.
    pub sort_column: Option<usize>,
    pub sort_ascending: bool,
}
