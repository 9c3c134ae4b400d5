//! Generic grid state: sorting, filtering, pagination.
//!
//! The grid owns the record array and the column descriptors and combines
//! them with caller-held visibility and cripple-mode state into pages. The
//! sorted order is cached and only recomputed by [`Grid::apply_sort`], so a
//! cripple-mode flip must call it explicitly.

use crate::column::{CellValue, ColumnDescriptor, ColumnId};
use crate::model::GpuRecord;
use crate::visibility::ColumnVisibility;

/// Selectable page sizes.
pub const PAGE_SIZES: [usize; 2] = [10, 20];

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: ColumnId,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    /// Index into the grid's record array.
    pub record: usize,
    /// One cell per visible column.
    pub cells: Vec<CellValue>,
}

/// A sorted, filtered, paginated view over the records.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPage {
    pub columns: Vec<ColumnId>,
    pub rows: Vec<GridRow>,
    pub sort: Option<SortState>,
    pub page_index: usize,
    pub page_count: usize,
    /// Rows surviving the filter, across all pages.
    pub filtered_rows: usize,
    pub total_rows: usize,
}

/// Sortable, filterable, paginated grid over GPU records.
#[derive(Debug, Clone)]
pub struct Grid {
    records: Vec<GpuRecord>,
    columns: Vec<ColumnDescriptor>,
    sort: Option<SortState>,
    filter: Option<String>,
    pagination: Pagination,
    /// Record indices in current sort order.
    order: Vec<usize>,
}

impl Grid {
    pub fn new(records: Vec<GpuRecord>, columns: Vec<ColumnDescriptor>) -> Self {
        let order = (0..records.len()).collect();
        Self {
            records,
            columns,
            sort: None,
            filter: None,
            pagination: Pagination::default(),
            order,
        }
    }

    pub fn records(&self) -> &[GpuRecord] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&GpuRecord> {
        self.records.get(index)
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    fn descriptor(&self, id: ColumnId) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|d| d.id == id)
    }

    /// Recomputes the cached order from the current sort and cripple mode.
    ///
    /// Returns to the first page only when a sort is active, so unsorted
    /// grids keep their page across a cripple-mode flip.
    pub fn apply_sort(&mut self, factor_in_cripple: bool) {
        let mut order: Vec<usize> = (0..self.records.len()).collect();
        if let Some(sort) = self.sort
            && let Some(desc) = self.descriptor(sort.column).copied()
        {
            let records = &self.records;
            order.sort_by(|&a, &b| {
                let cmp = desc.compare(&records[a], &records[b], factor_in_cripple);
                match sort.direction {
                    SortDirection::Ascending => cmp,
                    SortDirection::Descending => cmp.reverse(),
                }
            });
        }
        self.order = order;
        if self.sort.is_some() {
            self.pagination.page_index = 0;
        }
    }

    /// Replaces the sort; any change of sort returns to the first page.
    pub fn set_sort(&mut self, sort: Option<SortState>, factor_in_cripple: bool) {
        self.sort = sort;
        self.apply_sort(factor_in_cripple);
        self.pagination.page_index = 0;
    }

    /// Header-click behaviour: first direction, the other direction, unsorted.
    ///
    /// Text columns start ascending, everything else descending.
    pub fn cycle_sort(&mut self, column: ColumnId, factor_in_cripple: bool) {
        let first = self.first_direction(column, factor_in_cripple);
        let next = match self.sort {
            Some(s) if s.column == column && s.direction == first => Some(SortState {
                column,
                direction: first.flipped(),
            }),
            Some(s) if s.column == column => None,
            _ => Some(SortState {
                column,
                direction: first,
            }),
        };
        self.set_sort(next, factor_in_cripple);
    }

    fn first_direction(&self, column: ColumnId, factor_in_cripple: bool) -> SortDirection {
        let sample = self.records.first().map(|r| column.value(r, factor_in_cripple));
        match sample {
            Some(CellValue::Text(_)) | Some(CellValue::Link(_)) => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }

    /// Drops a sort whose column just became hidden.
    pub fn sync_visibility(&mut self, visibility: &ColumnVisibility, factor_in_cripple: bool) {
        if let Some(sort) = self.sort
            && !visibility.is_visible(sort.column)
        {
            self.set_sort(None, factor_in_cripple);
        }
    }

    /// Sets the name filter. Empty strings clear it. Resets to the first page.
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter.filter(|f| !f.is_empty());
        self.pagination.page_index = 0;
    }

    /// Case-insensitive substring match on `name`.
    pub fn matches_filter(record: &GpuRecord, filter: &str) -> bool {
        record
            .name
            .to_lowercase()
            .contains(&filter.to_lowercase())
    }

    /// Record indices passing the filter, in sort order.
    pub fn filtered_indices(&self) -> Vec<usize> {
        self.order
            .iter()
            .copied()
            .filter(|&i| {
                self.filter
                    .as_deref()
                    .is_none_or(|f| Self::matches_filter(&self.records[i], f))
            })
            .collect()
    }

    /// Number of pages for the filtered rows; never zero.
    pub fn page_count(&self) -> usize {
        self.filtered_indices()
            .len()
            .div_ceil(self.pagination.page_size)
            .max(1)
    }

    /// Jumps to `index`, clamped to the valid range.
    pub fn set_page_index(&mut self, index: usize) {
        let last = self.page_count() - 1;
        self.pagination.page_index = index.min(last);
    }

    pub fn can_previous_page(&self) -> bool {
        self.pagination.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.pagination.page_index + 1 < self.page_count()
    }

    pub fn previous_page(&mut self) {
        if self.can_previous_page() {
            self.pagination.page_index -= 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.can_next_page() {
            self.pagination.page_index += 1;
        }
    }

    /// Changes rows per page, keeping the current top row on screen.
    pub fn set_page_size(&mut self, size: usize) {
        if size == 0 {
            return;
        }
        let top_row = self.pagination.page_size * self.pagination.page_index;
        self.pagination.page_size = size;
        self.pagination.page_index = top_row / size;
    }

    /// Builds the current page.
    pub fn page(&self, visibility: &ColumnVisibility, factor_in_cripple: bool) -> GridPage {
        let columns: Vec<ColumnId> = self
            .columns
            .iter()
            .map(|d| d.id)
            .filter(|id| visibility.is_visible(*id))
            .collect();

        let filtered = self.filtered_indices();
        let size = self.pagination.page_size;
        let page_count = filtered.len().div_ceil(size).max(1);
        let page_index = self.pagination.page_index.min(page_count - 1);

        let rows = filtered
            .iter()
            .skip(page_index * size)
            .take(size)
            .map(|&i| GridRow {
                record: i,
                cells: columns
                    .iter()
                    .map(|c| c.value(&self.records[i], factor_in_cripple))
                    .collect(),
            })
            .collect();

        GridPage {
            columns,
            rows,
            sort: self.sort,
            page_index,
            page_count,
            filtered_rows: filtered.len(),
            total_rows: self.records.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::columns;
    use crate::model::Dataset;
    use crate::model::fixtures::{crippled, record};

    fn names(grid: &Grid) -> Vec<String> {
        grid.filtered_indices()
            .into_iter()
            .map(|i| grid.records()[i].name.clone())
            .collect()
    }

    fn sample() -> Grid {
        let mut l40 = record("L40");
        l40.fp16 = 181e12;
        l40.fp16_ignore_crippled = 181e12;
        l40.fp8 = Some(362e12);
        l40.fp8_ignore_crippled = Some(362e12);
        let t4 = record("T4"); // 120e12, no fp8
        let rtx = crippled("RTX 4090", 330e12); // 165 / 330
        Grid::new(vec![l40, t4, rtx], columns())
    }

    #[test]
    fn unsorted_keeps_dataset_order() {
        let grid = sample();
        assert_eq!(names(&grid), vec!["L40", "T4", "RTX 4090"]);
    }

    #[test]
    fn dual_column_sort_follows_toggle_after_reapply() {
        let mut grid = sample();
        grid.set_sort(
            Some(SortState {
                column: ColumnId::Fp16,
                direction: SortDirection::Descending,
            }),
            true,
        );
        assert_eq!(names(&grid), vec!["L40", "RTX 4090", "T4"]);

        // Cached order is stale until re-applied.
        grid.apply_sort(false);
        assert_eq!(names(&grid), vec!["RTX 4090", "L40", "T4"]);
    }

    #[test]
    fn missing_values_first_ascending_last_descending() {
        let mut grid = sample();
        for mode in [true, false] {
            grid.set_sort(
                Some(SortState {
                    column: ColumnId::Fp8,
                    direction: SortDirection::Ascending,
                }),
                mode,
            );
            assert_eq!(names(&grid)[0], "T4");
            grid.set_sort(
                Some(SortState {
                    column: ColumnId::Fp8,
                    direction: SortDirection::Descending,
                }),
                mode,
            );
            assert_eq!(names(&grid)[2], "T4");
        }
    }

    #[test]
    fn cycle_sort_numeric_starts_descending() {
        let mut grid = sample();
        grid.cycle_sort(ColumnId::Fp16, true);
        assert_eq!(grid.sort().map(|s| s.direction), Some(SortDirection::Descending));
        grid.cycle_sort(ColumnId::Fp16, true);
        assert_eq!(grid.sort().map(|s| s.direction), Some(SortDirection::Ascending));
        grid.cycle_sort(ColumnId::Fp16, true);
        assert_eq!(grid.sort(), None);
    }

    #[test]
    fn cycle_sort_text_starts_ascending() {
        let mut grid = sample();
        grid.cycle_sort(ColumnId::Name, true);
        assert_eq!(grid.sort().map(|s| s.direction), Some(SortDirection::Ascending));
        assert_eq!(names(&grid), vec!["L40", "RTX 4090", "T4"]);
        grid.cycle_sort(ColumnId::Tdp, true);
        assert_eq!(
            grid.sort(),
            Some(SortState {
                column: ColumnId::Tdp,
                direction: SortDirection::Descending
            })
        );
    }

    #[test]
    fn name_sort_is_natural_on_embedded_data() {
        let ds = Dataset::embedded().unwrap();
        let mut grid = Grid::new(ds.records().to_vec(), columns());
        grid.set_filter(Some("a10".to_string()));
        grid.cycle_sort(ColumnId::Name, true);
        assert_eq!(names(&grid), vec!["A10", "A10g", "A100-SXM"]);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let mut grid = sample();
        grid.set_filter(Some("rtx".to_string()));
        assert_eq!(names(&grid), vec!["RTX 4090"]);
        grid.set_filter(Some("RTX".to_string()));
        assert_eq!(names(&grid), vec!["RTX 4090"]);
        grid.set_filter(Some(String::new()));
        assert_eq!(grid.filter(), None);
        assert_eq!(names(&grid).len(), 3);
    }

    #[test]
    fn embedded_rtx_filter_returns_only_matching_names() {
        let ds = Dataset::embedded().unwrap();
        let mut grid = Grid::new(ds.records().to_vec(), columns());
        grid.set_filter(Some("RTX".to_string()));
        let found = names(&grid);
        assert!(!found.is_empty());
        for n in &found {
            assert!(n.contains("RTX"), "{}", n);
        }
        grid.set_filter(Some("rtx".to_string()));
        assert_eq!(names(&grid), found);
    }

    #[test]
    fn pagination_and_filter_reset() {
        let ds = Dataset::embedded().unwrap();
        let mut grid = Grid::new(ds.records().to_vec(), columns());
        let vis = ColumnVisibility::default();

        assert_eq!(grid.page_count(), 3);
        grid.next_page();
        grid.next_page();
        assert!(!grid.can_next_page());
        grid.next_page();
        assert_eq!(grid.pagination().page_index, 2);

        let page = grid.page(&vis, true);
        assert_eq!(page.rows.len(), 10);
        assert_eq!(page.filtered_rows, 30);

        grid.set_filter(Some("A".to_string()));
        assert_eq!(grid.pagination().page_index, 0);

        grid.set_filter(None);
        grid.set_page_index(99);
        assert_eq!(grid.pagination().page_index, 2);
        grid.previous_page();
        assert_eq!(grid.pagination().page_index, 1);
    }

    #[test]
    fn reapplying_without_sort_keeps_page() {
        let ds = Dataset::embedded().unwrap();
        let mut grid = Grid::new(ds.records().to_vec(), columns());
        grid.set_page_index(2);
        grid.apply_sort(false);
        assert_eq!(grid.pagination().page_index, 2);

        grid.set_sort(
            Some(SortState {
                column: ColumnId::Fp16,
                direction: SortDirection::Descending,
            }),
            true,
        );
        assert_eq!(grid.pagination().page_index, 0);
        grid.set_page_index(1);
        grid.apply_sort(false);
        assert_eq!(grid.pagination().page_index, 0);

        grid.set_page_index(1);
        grid.set_sort(None, false);
        assert_eq!(grid.pagination().page_index, 0);
    }

    #[test]
    fn page_size_change_keeps_top_row() {
        let ds = Dataset::embedded().unwrap();
        let mut grid = Grid::new(ds.records().to_vec(), columns());
        grid.set_page_index(2); // top row 20
        grid.set_page_size(20);
        assert_eq!(grid.pagination().page_index, 1);
        assert_eq!(grid.page_count(), 2);
    }

    #[test]
    fn empty_filter_result_has_one_page() {
        let mut grid = sample();
        grid.set_filter(Some("no such gpu".to_string()));
        let page = grid.page(&ColumnVisibility::default(), true);
        assert!(page.rows.is_empty());
        assert_eq!(page.page_count, 1);
        assert_eq!(page.filtered_rows, 0);
    }

    #[test]
    fn page_cells_follow_visibility_and_mode() {
        let grid = sample();
        let vis = ColumnVisibility::default().hide(ColumnId::Citation).unwrap();
        let page = grid.page(&vis, false);
        assert_eq!(page.columns.len(), 7);
        let fp16_col = page.columns.iter().position(|c| *c == ColumnId::Fp16).unwrap();
        let rtx = &page.rows[2];
        assert_eq!(rtx.cells[fp16_col].display(), "330.00 TFLOPS");
    }

    #[test]
    fn hiding_sorted_column_clears_sort() {
        let mut grid = sample();
        grid.cycle_sort(ColumnId::Tdp, true);
        let vis = ColumnVisibility::default().hide(ColumnId::Tdp).unwrap();
        grid.sync_visibility(&vis, true);
        assert_eq!(grid.sort(), None);
    }
}
