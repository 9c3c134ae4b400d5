//! Application state for the TUI.

use std::time::Instant;

use ratatui::widgets::TableState;
use tracing::debug;

use crate::column::{ColumnId, columns};
use crate::debounce::{Debouncer, FILTER_DEBOUNCE};
use crate::grid::{Grid, PAGE_SIZES};
use crate::model::GpuRecord;
use crate::prefs::PreferencesController;
use crate::settings::KeyValueStore;
use crate::view::gpu::{GpuView, build_gpu_view};

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the name filter.
    Filter,
    /// Typing a page number (`g`).
    PageJump,
}

/// Active popup state. Only one popup can be open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopupState {
    /// No popup is open.
    #[default]
    None,
    /// Help popup with scroll offset.
    Help { scroll: usize },
    /// Quit confirmation dialog.
    QuitConfirm,
    /// One-time explanation shown after switching to ignore-crippled readings.
    CrippleNotice,
    /// Precise readings of one GPU.
    Detail { record: usize, scroll: usize },
    /// Chooser listing hidden columns.
    HiddenColumns { selected: usize },
}

/// Main application state.
pub struct AppState {
    pub prefs: PreferencesController<Box<dyn KeyValueStore>>,
    pub grid: Grid,

    pub input_mode: InputMode,
    pub popup: PopupState,

    /// Text in the filter box; reaches the grid after the debounce.
    pub filter_input: String,
    pub filter_debounce: Debouncer<String>,
    pub page_jump_input: String,

    /// Index into the visible columns.
    pub selected_column: usize,
    /// Index into the rows of the current page.
    pub selected_row: usize,
    pub table_state: TableState,

    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(records: Vec<GpuRecord>, store: Box<dyn KeyValueStore>) -> Self {
        let prefs = PreferencesController::load(store);
        let mut grid = Grid::new(records, columns());
        grid.apply_sort(prefs.factor_in_cripple());
        Self {
            prefs,
            grid,
            input_mode: InputMode::default(),
            popup: PopupState::default(),
            filter_input: String::new(),
            filter_debounce: Debouncer::new(FILTER_DEBOUNCE),
            page_jump_input: String::new(),
            selected_column: 0,
            selected_row: 0,
            table_state: TableState::default(),
            status_message: None,
        }
    }

    pub fn factor_in_cripple(&self) -> bool {
        self.prefs.factor_in_cripple()
    }

    /// View model of the current page.
    pub fn view(&self) -> GpuView {
        build_gpu_view(
            &self.grid,
            &self.prefs.visibility(),
            self.prefs.factor_in_cripple(),
        )
    }

    pub fn any_popup_open(&self) -> bool {
        self.popup != PopupState::None
    }

    // ===== Columns =====

    pub fn visible_columns(&self) -> Vec<ColumnId> {
        self.prefs.visibility().visible()
    }

    pub fn selected_column_id(&self) -> Option<ColumnId> {
        self.visible_columns().get(self.selected_column).copied()
    }

    pub fn select_next_column(&mut self) {
        let count = self.visible_columns().len();
        if self.selected_column + 1 < count {
            self.selected_column += 1;
        }
    }

    pub fn select_previous_column(&mut self) {
        self.selected_column = self.selected_column.saturating_sub(1);
    }

    /// Cycles the sort of the selected column.
    pub fn cycle_sort(&mut self) {
        if let Some(id) = self.selected_column_id() {
            let factor_in_cripple = self.factor_in_cripple();
            self.grid.cycle_sort(id, factor_in_cripple);
            self.selected_row = 0;
            debug!(column = %id, sort = ?self.grid.sort(), "sort changed");
        }
    }

    /// Hides the selected column. The last visible column stays.
    pub fn hide_selected_column(&mut self) {
        let visible = self.visible_columns();
        let Some(id) = visible.get(self.selected_column).copied() else {
            return;
        };
        if self.prefs.hide(id).is_err() {
            self.status_message = Some("Cannot hide the last visible column".to_string());
            return;
        }
        let visibility = self.prefs.visibility();
        let factor_in_cripple = self.factor_in_cripple();
        self.grid.sync_visibility(&visibility, factor_in_cripple);
        self.selected_column = self.selected_column.min(visible.len() - 2);
        self.status_message = Some(format!("Hid column {}", id.display_name()));
    }

    /// Shows a hidden column and selects it.
    pub fn show_column(&mut self, id: ColumnId) {
        self.prefs.show(id);
        if let Some(pos) = self.visible_columns().iter().position(|c| *c == id) {
            self.selected_column = pos;
        }
        self.status_message = Some(format!("Showing column {}", id.display_name()));
    }

    // ===== Cripple mode =====

    /// Flips cripple mode, re-sorts, and opens the notice when due.
    pub fn toggle_cripple_mode(&mut self) {
        let outcome = self.prefs.toggle_cripple_mode();
        self.grid.apply_sort(outcome.factor_in_cripple);
        self.selected_row = 0;
        if outcome.show_notice {
            self.popup = PopupState::CrippleNotice;
        }
    }

    pub fn acknowledge_notice(&mut self) {
        self.prefs.acknowledge_notice();
        self.popup = PopupState::None;
    }

    // ===== Filter =====

    pub fn begin_filter(&mut self) {
        self.input_mode = InputMode::Filter;
        self.filter_input = self.grid.filter().unwrap_or_default().to_string();
    }

    pub fn push_filter_char(&mut self, c: char, now: Instant) {
        self.filter_input.push(c);
        self.filter_debounce.push(self.filter_input.clone(), now);
    }

    pub fn pop_filter_char(&mut self, now: Instant) {
        self.filter_input.pop();
        self.filter_debounce.push(self.filter_input.clone(), now);
    }

    /// Applies the typed filter immediately.
    pub fn commit_filter(&mut self) {
        self.filter_debounce.cancel();
        self.apply_filter(self.filter_input.clone());
        self.input_mode = InputMode::Normal;
    }

    /// Clears the filter and leaves filter mode.
    pub fn cancel_filter(&mut self) {
        self.filter_debounce.cancel();
        self.filter_input.clear();
        self.apply_filter(String::new());
        self.input_mode = InputMode::Normal;
    }

    fn apply_filter(&mut self, filter: String) {
        debug!(filter = %filter, "filter applied");
        self.grid.set_filter(Some(filter));
        self.selected_row = 0;
    }

    /// Periodic housekeeping: lands debounced filter input.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(filter) = self.filter_debounce.poll(now) {
            self.apply_filter(filter);
        }
    }

    // ===== Pagination =====

    pub fn next_page(&mut self) {
        self.grid.next_page();
        self.selected_row = 0;
    }

    pub fn previous_page(&mut self) {
        self.grid.previous_page();
        self.selected_row = 0;
    }

    /// Switches to the next page size in [`PAGE_SIZES`].
    pub fn cycle_page_size(&mut self) {
        let current = self.grid.pagination().page_size;
        let pos = PAGE_SIZES.iter().position(|s| *s == current).unwrap_or(0);
        let next = PAGE_SIZES[(pos + 1) % PAGE_SIZES.len()];
        self.grid.set_page_size(next);
        self.selected_row = 0;
        self.status_message = Some(format!("Show {}", next));
    }

    pub fn begin_page_jump(&mut self) {
        self.input_mode = InputMode::PageJump;
        self.page_jump_input.clear();
    }

    /// Jumps to the typed 1-based page number; out-of-range pages clamp.
    pub fn commit_page_jump(&mut self) {
        let input = self.page_jump_input.trim();
        let index = if input.is_empty() {
            Some(0)
        } else {
            input.parse::<usize>().ok().map(|n| n.saturating_sub(1))
        };
        match index {
            Some(i) => {
                self.grid.set_page_index(i);
                self.selected_row = 0;
            }
            None => self.status_message = Some(format!("Invalid page number: {}", input)),
        }
        self.page_jump_input.clear();
        self.input_mode = InputMode::Normal;
    }

    // ===== Rows =====

    fn page_rows(&self) -> Vec<usize> {
        self.grid
            .page(&self.prefs.visibility(), self.factor_in_cripple())
            .rows
            .iter()
            .map(|r| r.record)
            .collect()
    }

    pub fn select_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn select_down(&mut self) {
        let len = self.page_rows().len();
        if self.selected_row + 1 < len {
            self.selected_row += 1;
        }
    }

    /// Record index under the cursor.
    pub fn selected_record(&self) -> Option<usize> {
        self.page_rows().get(self.selected_row).copied()
    }

    /// Keeps the cursor inside the current page.
    pub fn clamp_selection(&mut self) {
        let rows = self.page_rows().len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
        let cols = self.visible_columns().len();
        self.selected_column = self.selected_column.min(cols.saturating_sub(1));
    }

    // ===== Popups =====

    pub fn open_detail(&mut self) {
        if let Some(record) = self.selected_record() {
            self.popup = PopupState::Detail { record, scroll: 0 };
        }
    }

    pub fn open_hidden_columns(&mut self) {
        if self.prefs.visibility().hidden().is_empty() {
            self.status_message = Some("No hidden columns".to_string());
            return;
        }
        self.popup = PopupState::HiddenColumns { selected: 0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SortDirection;
    use crate::model::Dataset;
    use crate::model::fixtures::{crippled, record};
    use crate::settings::{MemoryStore, SETTINGS_KEY};
    use std::time::Duration;

    fn state() -> AppState {
        let mut l40 = record("L40");
        l40.fp16 = 181e12;
        l40.fp16_ignore_crippled = 181e12;
        AppState::new(
            vec![l40, record("T4"), crippled("RTX 4090", 330e12)],
            Box::new(MemoryStore::new()),
        )
    }

    fn select(state: &mut AppState, id: ColumnId) {
        state.selected_column = state
            .visible_columns()
            .iter()
            .position(|c| *c == id)
            .unwrap();
    }

    fn names(state: &AppState) -> Vec<String> {
        state
            .page_rows()
            .into_iter()
            .map(|i| state.grid.records()[i].name.clone())
            .collect()
    }

    #[test]
    fn toggle_resorts_active_dual_column() {
        let mut s = state();
        select(&mut s, ColumnId::Fp16);
        s.cycle_sort();
        assert_eq!(
            s.grid.sort().map(|x| x.direction),
            Some(SortDirection::Descending)
        );
        assert_eq!(names(&s), vec!["L40", "RTX 4090", "T4"]);

        s.toggle_cripple_mode();
        assert_eq!(names(&s), vec!["RTX 4090", "L40", "T4"]);
        assert_eq!(s.popup, PopupState::CrippleNotice);

        s.acknowledge_notice();
        assert_eq!(s.popup, PopupState::None);
        s.toggle_cripple_mode();
        s.toggle_cripple_mode();
        assert_eq!(s.popup, PopupState::None);
    }

    #[test]
    fn stored_preference_is_honoured_at_startup() {
        let store = MemoryStore::with_entry(SETTINGS_KEY, r#"{"version":1,"crippled":false}"#);
        let s = AppState::new(vec![record("T4")], Box::new(store));
        assert!(!s.factor_in_cripple());
    }

    #[test]
    fn filter_lands_after_debounce() {
        let mut s = state();
        let t0 = Instant::now();
        s.begin_filter();
        s.push_filter_char('r', t0);
        s.push_filter_char('t', t0 + Duration::from_millis(100));
        s.on_tick(t0 + Duration::from_millis(200));
        assert_eq!(s.grid.filter(), None);

        s.on_tick(t0 + Duration::from_millis(400));
        assert_eq!(s.grid.filter(), Some("rt"));
        assert_eq!(names(&s), vec!["RTX 4090"]);
    }

    #[test]
    fn commit_and_cancel_filter() {
        let mut s = state();
        let t0 = Instant::now();
        s.begin_filter();
        s.push_filter_char('l', t0);
        s.commit_filter();
        assert_eq!(s.input_mode, InputMode::Normal);
        assert_eq!(s.grid.filter(), Some("l"));
        assert!(!s.filter_debounce.is_pending());

        s.begin_filter();
        assert_eq!(s.filter_input, "l");
        s.cancel_filter();
        assert_eq!(s.grid.filter(), None);
        assert_eq!(names(&s).len(), 3);
    }

    #[test]
    fn hiding_sorted_column_clears_sort() {
        let mut s = state();
        select(&mut s, ColumnId::Tdp);
        s.cycle_sort();
        assert!(s.grid.sort().is_some());
        s.hide_selected_column();
        assert!(!s.prefs.visibility().is_visible(ColumnId::Tdp));
        assert_eq!(s.grid.sort(), None);

        s.show_column(ColumnId::Tdp);
        assert_eq!(s.selected_column_id(), Some(ColumnId::Tdp));
    }

    #[test]
    fn last_column_cannot_be_hidden() {
        let mut s = state();
        while s.visible_columns().len() > 1 {
            s.selected_column = 0;
            s.hide_selected_column();
        }
        s.hide_selected_column();
        assert_eq!(s.visible_columns().len(), 1);
        assert!(s.status_message.is_some());
    }

    #[test]
    fn hidden_column_chooser_requires_hidden_columns() {
        let mut s = state();
        s.open_hidden_columns();
        assert_eq!(s.popup, PopupState::HiddenColumns { selected: 0 });

        for id in ColumnId::ALL {
            s.prefs.show(id);
        }
        s.popup = PopupState::None;
        s.open_hidden_columns();
        assert_eq!(s.popup, PopupState::None);
    }

    #[test]
    fn paging_resets_row_and_page_jump_clamps() {
        let ds = Dataset::embedded().unwrap();
        let mut s = AppState::new(ds.records().to_vec(), Box::new(MemoryStore::new()));
        s.select_down();
        s.select_down();
        assert_eq!(s.selected_row, 2);
        s.next_page();
        assert_eq!(s.selected_row, 0);
        assert_eq!(s.grid.pagination().page_index, 1);

        s.begin_page_jump();
        s.page_jump_input.push_str("99");
        s.commit_page_jump();
        assert_eq!(s.grid.pagination().page_index, 2);

        s.begin_page_jump();
        s.page_jump_input.push_str("x");
        s.commit_page_jump();
        assert_eq!(s.grid.pagination().page_index, 2);
        assert!(s.status_message.is_some());

        s.cycle_page_size();
        assert_eq!(s.grid.pagination().page_size, 20);
        s.cycle_page_size();
        assert_eq!(s.grid.pagination().page_size, 10);
    }

    #[test]
    fn toggle_without_sort_stays_on_page() {
        let ds = Dataset::embedded().unwrap();
        let mut s = AppState::new(ds.records().to_vec(), Box::new(MemoryStore::new()));
        s.next_page();
        s.toggle_cripple_mode();
        assert_eq!(s.grid.pagination().page_index, 1);
    }

    #[test]
    fn detail_opens_on_selected_record() {
        let mut s = state();
        s.select_down();
        s.open_detail();
        assert_eq!(s.popup, PopupState::Detail { record: 1, scroll: 0 });
    }
}
