//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::view::common::RowStyleClass;

/// Color palette.
pub struct Theme;

impl Theme {
    // Background colors
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;
    pub const SELECTED_BG: Color = Color::DarkGray;

    // Foreground colors
    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    // Badges
    pub const CRIPPLED: Color = Color::Yellow;
    pub const GOOD: Color = Color::Green;

    pub const ACCENT: Color = Color::Cyan;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row style.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Header cell of the column under the cursor.
    pub fn table_header_selected() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    pub fn accent() -> Style {
        Style::default().fg(Theme::ACCENT)
    }

    /// Mode badge while crippled readings are factored in.
    pub fn mode_crippled() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Theme::CRIPPLED)
            .add_modifier(Modifier::BOLD)
    }

    /// Mode badge while crippled readings are ignored.
    pub fn mode_ignored() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Theme::GOOD)
            .add_modifier(Modifier::BOLD)
    }

    /// Filter input style.
    pub fn filter_input() -> Style {
        Style::default()
            .fg(Theme::FG)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Hidden-column chip.
    pub fn chip() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::SELECTED_BG)
    }

    /// Section header style for detail popups.
    pub fn section_header() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    /// Help text style.
    pub fn help() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// Help key style (highlighted keys in help line).
    pub fn help_key() -> Style {
        Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD)
    }

    /// Popup border.
    pub fn popup_border() -> Style {
        Style::default().fg(Theme::ACCENT)
    }

    /// Maps a UI-agnostic [`RowStyleClass`] to a ratatui [`Style`].
    pub fn from_class(class: RowStyleClass) -> Style {
        match class {
            RowStyleClass::Normal => Self::default(),
            RowStyleClass::Warning => Style::default()
                .fg(Theme::CRIPPLED)
                .add_modifier(Modifier::BOLD),
            RowStyleClass::Active => Style::default().fg(Theme::GOOD),
            RowStyleClass::Dimmed => Self::dim(),
            RowStyleClass::Accent => Self::accent(),
        }
    }
}
