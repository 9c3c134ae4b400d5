//! Preferences controller: column visibility plus the cripple-mode toggle.

use tracing::{info, warn};

use crate::column::ColumnId;
use crate::settings::{KeyValueStore, Settings, SettingsRepository};
use crate::visibility::{ColumnVisibility, VisibilityError};

/// Result of flipping the cripple-mode toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Value after the flip.
    pub factor_in_cripple: bool,
    /// The explanatory notice should be presented now.
    pub show_notice: bool,
}

/// Session preferences backed by a settings repository.
///
/// Visibility is session-only; `factor_in_cripple` is persisted on every
/// toggle. The crippled-accumulate notice is presented at most once per
/// session, on the first move from "factor in" to "ignore".
#[derive(Debug)]
pub struct PreferencesController<S: KeyValueStore> {
    repo: SettingsRepository<S>,
    visibility: ColumnVisibility,
    factor_in_cripple: bool,
    notice_presented: bool,
    notice_open: bool,
}

impl<S: KeyValueStore> PreferencesController<S> {
    /// Loads persisted preferences; falls back to defaults on any problem.
    pub fn load(store: S) -> Self {
        let repo = SettingsRepository::new(store);
        let settings = repo.load();
        info!(
            factor_in_cripple = settings.factor_in_cripple,
            "preferences loaded"
        );
        Self {
            repo,
            visibility: ColumnVisibility::default(),
            factor_in_cripple: settings.factor_in_cripple,
            notice_presented: false,
            notice_open: false,
        }
    }

    pub fn factor_in_cripple(&self) -> bool {
        self.factor_in_cripple
    }

    pub fn visibility(&self) -> ColumnVisibility {
        self.visibility
    }

    /// Hides a column; the last visible column is refused.
    pub fn hide(&mut self, id: ColumnId) -> Result<(), VisibilityError> {
        self.visibility = self.visibility.hide(id)?;
        Ok(())
    }

    pub fn show(&mut self, id: ColumnId) {
        self.visibility = self.visibility.show(id);
    }

    /// Hides a column named by its key. Unknown keys and the last visible
    /// column leave the mapping unchanged.
    pub fn hide_key(&mut self, key: &str) -> Result<(), VisibilityError> {
        self.visibility = self.visibility.hide_key(key)?;
        Ok(())
    }

    /// Shows a column named by its key; unknown keys leave the mapping unchanged.
    pub fn show_key(&mut self, key: &str) -> Result<(), VisibilityError> {
        self.visibility = self.visibility.show_key(key)?;
        Ok(())
    }

    /// Flips `factor_in_cripple` and persists it.
    ///
    /// Consumers must re-apply any active sort: dual-reading columns keep
    /// their id while their comparand changes.
    pub fn toggle_cripple_mode(&mut self) -> ToggleOutcome {
        let was = self.factor_in_cripple;
        self.factor_in_cripple = !was;

        let settings = Settings {
            factor_in_cripple: self.factor_in_cripple,
        };
        if let Err(e) = self.repo.save(&settings) {
            warn!(error = %e, "failed to persist cripple mode");
        }

        let show_notice = was && !self.notice_presented;
        if show_notice {
            self.notice_presented = true;
            self.notice_open = true;
        }
        info!(
            factor_in_cripple = self.factor_in_cripple,
            show_notice, "cripple mode toggled"
        );

        ToggleOutcome {
            factor_in_cripple: self.factor_in_cripple,
            show_notice,
        }
    }

    /// Whether the notice is currently waiting for acknowledgement.
    pub fn notice_open(&self) -> bool {
        self.notice_open
    }

    /// Dismisses the notice. It will not reappear this session.
    pub fn acknowledge_notice(&mut self) {
        self.notice_open = false;
    }

    pub fn repository(&self) -> &SettingsRepository<S> {
        &self.repo
    }
}
