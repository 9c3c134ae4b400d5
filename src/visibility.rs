//! Column visibility mapping.
//!
//! Updates are immutable: `hide`/`show` return a new mapping with exactly one
//! key changed, which the caller hands straight to its state. The key space is
//! fixed to [`ColumnId`], so an unknown identifier can never land in the map,
//! and at least one column is always visible.

use std::fmt;

use crate::column::{ColumnId, UnknownColumn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityError {
    UnknownColumn(String),
    /// Hiding this column would leave the table without a header.
    LastVisibleColumn(ColumnId),
}

impl fmt::Display for VisibilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisibilityError::UnknownColumn(id) => write!(f, "unknown column '{}'", id),
            VisibilityError::LastVisibleColumn(id) => {
                write!(f, "cannot hide '{}', the last visible column", id)
            }
        }
    }
}

impl std::error::Error for VisibilityError {}

impl From<UnknownColumn> for VisibilityError {
    fn from(e: UnknownColumn) -> Self {
        VisibilityError::UnknownColumn(e.0)
    }
}

/// Shown/hidden flag per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnVisibility {
    shown: [bool; ColumnId::COUNT],
}

impl Default for ColumnVisibility {
    fn default() -> Self {
        let mut shown = [false; ColumnId::COUNT];
        for c in ColumnId::ALL {
            shown[c.index()] = c.visible_by_default();
        }
        Self { shown }
    }
}

impl ColumnVisibility {
    pub fn is_visible(&self, id: ColumnId) -> bool {
        self.shown[id.index()]
    }

    fn with(&self, id: ColumnId, visible: bool) -> Self {
        let mut next = *self;
        next.shown[id.index()] = visible;
        next
    }

    /// Copy of `self` with `id` hidden. Refused when nothing would stay visible.
    pub fn hide(&self, id: ColumnId) -> Result<Self, VisibilityError> {
        let next = self.with(id, false);
        if !next.shown.contains(&true) {
            return Err(VisibilityError::LastVisibleColumn(id));
        }
        Ok(next)
    }

    pub fn show(&self, id: ColumnId) -> Self {
        self.with(id, true)
    }

    /// String-keyed variant; unknown ids are rejected and leave `self` intact.
    pub fn hide_key(&self, key: &str) -> Result<Self, VisibilityError> {
        self.hide(key.parse::<ColumnId>()?)
    }

    /// String-keyed variant; unknown ids are rejected and leave `self` intact.
    pub fn show_key(&self, key: &str) -> Result<Self, VisibilityError> {
        Ok(self.show(key.parse::<ColumnId>()?))
    }

    /// Visible columns in display order.
    pub fn visible(&self) -> Vec<ColumnId> {
        ColumnId::ALL
            .iter()
            .copied()
            .filter(|c| self.is_visible(*c))
            .collect()
    }

    /// Hidden columns in mapping order; these become "show" chips.
    pub fn hidden(&self) -> Vec<ColumnId> {
        ColumnId::ALL
            .iter()
            .copied()
            .filter(|c| !self.is_visible(*c))
            .collect()
    }
}
