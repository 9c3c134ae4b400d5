//! GPU table view model.

use crate::column::{CellValue, ColumnId};
use crate::fmt::{FmtStyle, Unit, format_magnitude, truncate};
use crate::grid::{Grid, SortDirection};
use crate::model::GpuRecord;
use crate::resolve::DualField;
use crate::view::common::{RowStyleClass, TableViewModel, ViewCell, ViewRow};
use crate::visibility::ColumnVisibility;

/// Widest a column gets before cells are truncated.
pub const MAX_COLUMN_WIDTH: u16 = 40;

/// Everything the main screen shows, minus popups.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuView {
    /// Row ids are indices into the grid's record array.
    pub table: TableViewModel<usize>,
    pub columns: Vec<ColumnId>,
    /// Hidden columns in mapping order, rendered as "show" chips.
    pub hidden: Vec<ColumnId>,
    pub footer: String,
    pub page_label: String,
    pub page_size: usize,
    pub can_previous: bool,
    pub can_next: bool,
}

/// `"Showing 10 of 30 GPUs"`. The total counts rows surviving the filter.
pub fn showing_label(shown: usize, total: usize) -> String {
    format!("Showing {} of {} GPUs", shown, total)
}

fn mode_label(factor_in_cripple: bool) -> &'static str {
    if factor_in_cripple {
        "factoring in crippled FP32 accumulate"
    } else {
        "ignoring crippled FP32 accumulate"
    }
}

fn cell_style(value: &CellValue) -> Option<RowStyleClass> {
    match value {
        CellValue::Flag(true) => Some(RowStyleClass::Warning),
        CellValue::Flag(false) => Some(RowStyleClass::Active),
        CellValue::Link(_) => Some(RowStyleClass::Accent),
        v if v.is_not_applicable() => Some(RowStyleClass::Dimmed),
        _ => None,
    }
}

fn view_cell(value: &CellValue, width: u16) -> ViewCell {
    let text = truncate(&value.display(), width as usize);
    match cell_style(value) {
        Some(style) => ViewCell::styled(text, style),
        None => ViewCell::plain(text),
    }
}

/// Builds the current page of the GPU table.
pub fn build_gpu_view(
    grid: &Grid,
    visibility: &ColumnVisibility,
    factor_in_cripple: bool,
) -> GpuView {
    let page = grid.page(visibility, factor_in_cripple);

    // Header width leaves room for the sort indicator.
    let widths: Vec<u16> = page
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let header = c.display_name().chars().count() + 1;
            let widest_cell = page
                .rows
                .iter()
                .map(|r| r.cells[i].display().chars().count())
                .max()
                .unwrap_or(0);
            (header.max(widest_cell) as u16).min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let rows = page
        .rows
        .iter()
        .map(|r| ViewRow {
            id: r.record,
            cells: r
                .cells
                .iter()
                .zip(&widths)
                .map(|(v, w)| view_cell(v, *w))
                .collect(),
            style: RowStyleClass::Normal,
        })
        .collect();

    let sort_column = page
        .sort
        .and_then(|s| page.columns.iter().position(|c| *c == s.column));
    let sort_ascending = page
        .sort
        .is_some_and(|s| s.direction == SortDirection::Ascending);

    let title = match grid.filter() {
        Some(f) => format!(" GPUs [{}] filter: {} ", mode_label(factor_in_cripple), f),
        None => format!(" GPUs [{}] ", mode_label(factor_in_cripple)),
    };

    GpuView {
        table: TableViewModel {
            title,
            headers: page
                .columns
                .iter()
                .map(|c| c.display_name().to_string())
                .collect(),
            widths,
            rows,
            sort_column,
            sort_ascending,
        },
        hidden: visibility.hidden(),
        footer: showing_label(page.rows.len(), page.filtered_rows),
        page_label: format!("Page {} of {}", page.page_index + 1, page.page_count),
        page_size: grid.pagination().page_size,
        can_previous: grid.can_previous_page(),
        can_next: grid.can_next_page(),
        columns: page.columns,
    }
}

/// Plain-text table for non-interactive output.
pub fn render_plain(view: &GpuView) -> String {
    let mut out = String::new();
    let pad = |text: &str, w: u16| format!("{:<width$}", text, width = w as usize);

    let header: Vec<String> = view
        .table
        .headers
        .iter()
        .zip(&view.table.widths)
        .enumerate()
        .map(|(i, (h, w))| {
            let indicator = match view.table.sort_column {
                Some(s) if s == i && view.table.sort_ascending => SortDirection::Ascending.indicator(),
                Some(s) if s == i => SortDirection::Descending.indicator(),
                _ => "",
            };
            pad(&format!("{}{}", h, indicator), *w)
        })
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    for row in &view.table.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .zip(&view.table.widths)
            .map(|(c, w)| pad(&c.text, *w))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }

    out.push_str(&format!("{}  |  {}\n", view.footer, view.page_label));
    out
}

/// One labelled value in the detail popup.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailLine {
    pub label: String,
    pub value: String,
    pub style: Option<RowStyleClass>,
}

/// Precise readings for a single GPU.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailViewModel {
    pub title: String,
    /// Every column at full precision, current mode.
    pub lines: Vec<DetailLine>,
    /// Both readings of each dual-reading column.
    pub dual: Vec<DetailLine>,
}

fn dual_column(field: DualField) -> ColumnId {
    match field {
        DualField::Fp16 => ColumnId::Fp16,
        DualField::Bf16 => ColumnId::Bf16,
        DualField::Fp8 => ColumnId::Fp8,
    }
}

/// Builds the detail popup content for `record`.
pub fn build_detail_view(record: &GpuRecord, factor_in_cripple: bool) -> DetailViewModel {
    let lines = ColumnId::ALL
        .iter()
        .filter(|c| **c != ColumnId::Name)
        .map(|c| {
            let value = c.value(record, factor_in_cripple);
            DetailLine {
                label: c.display_name().to_string(),
                value: value.precise(),
                style: cell_style(&value),
            }
        })
        .collect();

    let dual = DualField::ALL
        .iter()
        .flat_map(|f| {
            let name = dual_column(*f).display_name();
            [
                (format!("{} (nominal)", name), f.nominal(record)),
                (format!("{} (ignore crippled)", name), f.ignore_crippled(record)),
            ]
        })
        .map(|(label, v)| {
            let value = format_magnitude(v, Unit::TeraOps, FmtStyle::Precise);
            let style = CellValue::Magnitude(v, Unit::TeraOps)
                .is_not_applicable()
                .then_some(RowStyleClass::Dimmed);
            DetailLine { label, value, style }
        })
        .collect();

    DetailViewModel {
        title: format!(" {} ", record.name),
        lines,
        dual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::columns;
    use crate::grid::SortState;
    use crate::model::fixtures::{crippled, record};

    fn grid() -> Grid {
        let mut t4 = record("T4");
        t4.cache_l1 = None;
        Grid::new(vec![t4, crippled("RTX 4090", 330e12), record("V100")], columns())
    }

    #[test]
    fn builds_visible_columns_and_footer() {
        let g = grid();
        let view = build_gpu_view(&g, &ColumnVisibility::default(), true);
        assert_eq!(view.columns.len(), 8);
        assert_eq!(view.table.headers[0], "Name");
        assert_eq!(view.table.rows.len(), 3);
        assert_eq!(view.footer, "Showing 3 of 3 GPUs");
        assert_eq!(view.page_label, "Page 1 of 1");
        assert_eq!(view.hidden.len(), 13);
        assert!(!view.can_next);
        assert_eq!(view.table.sort_column, None);
    }

    #[test]
    fn footer_counts_filtered_rows() {
        let mut g = grid();
        g.set_filter(Some("rtx".to_string()));
        let view = build_gpu_view(&g, &ColumnVisibility::default(), true);
        assert_eq!(view.footer, "Showing 1 of 1 GPUs");
        assert!(view.table.title.contains("filter: rtx"));
    }

    #[test]
    fn badges_and_not_applicable_are_styled() {
        let g = grid();
        let vis = ColumnVisibility::default().show(ColumnId::CacheL1);
        let view = build_gpu_view(&g, &vis, true);
        let badge = view
            .columns
            .iter()
            .position(|c| *c == ColumnId::CrippledFp32Acc)
            .unwrap();
        let l1 = view.columns.iter().position(|c| *c == ColumnId::CacheL1).unwrap();

        let t4 = &view.table.rows[0];
        assert_eq!(t4.cells[badge].text, "Good");
        assert_eq!(t4.cells[badge].style, Some(RowStyleClass::Active));
        assert_eq!(t4.cells[l1].text, "N/A");
        assert_eq!(t4.cells[l1].style, Some(RowStyleClass::Dimmed));

        let rtx = &view.table.rows[1];
        assert_eq!(rtx.cells[badge].text, "Crippled");
        assert_eq!(rtx.cells[badge].style, Some(RowStyleClass::Warning));
    }

    #[test]
    fn sort_indicator_position_tracks_visible_columns() {
        let mut g = grid();
        g.set_sort(
            Some(SortState {
                column: ColumnId::Fp16,
                direction: SortDirection::Ascending,
            }),
            true,
        );
        let view = build_gpu_view(&g, &ColumnVisibility::default(), true);
        let pos = view.table.sort_column.unwrap();
        assert_eq!(view.table.headers[pos], "FP16 Performance");
        assert!(view.table.sort_ascending);

        let text = render_plain(&view);
        assert!(text.contains("FP16 Performance▲"));
        assert!(text.ends_with("Showing 3 of 3 GPUs  |  Page 1 of 1\n"));
    }

    #[test]
    fn widths_are_capped() {
        let mut long = record("X");
        long.citation = "https://example.com/".to_string() + &"a".repeat(100);
        let g = Grid::new(vec![long], columns());
        let view = build_gpu_view(&g, &ColumnVisibility::default(), true);
        let cite = view.columns.iter().position(|c| *c == ColumnId::Citation).unwrap();
        assert_eq!(view.table.widths[cite], MAX_COLUMN_WIDTH);
        assert_eq!(
            view.table.rows[0].cells[cite].text.chars().count(),
            MAX_COLUMN_WIDTH as usize
        );
    }

    #[test]
    fn detail_shows_precise_and_both_readings() {
        let r = crippled("RTX 4090", 330e12);
        let d = build_detail_view(&r, false);
        assert_eq!(d.title, " RTX 4090 ");

        let fp16 = d.lines.iter().find(|l| l.label == "FP16 Performance").unwrap();
        assert_eq!(fp16.value, "330.0000000000 TFLOPS");
        let vram = d.lines.iter().find(|l| l.label == "VRAM").unwrap();
        assert_eq!(vram.value, "16.000 GB");

        assert_eq!(d.dual.len(), 6);
        assert_eq!(d.dual[0].label, "FP16 Performance (nominal)");
        assert_eq!(d.dual[0].value, "165.0000000000 TFLOPS");
        assert_eq!(d.dual[1].value, "330.0000000000 TFLOPS");

        let plain = build_detail_view(&record("T4"), true);
        let fp8 = plain
            .dual
            .iter()
            .find(|l| l.label == "FP8 Performance (nominal)")
            .unwrap();
        assert_eq!(fp8.value, "N/A");
        assert_eq!(fp8.style, Some(RowStyleClass::Dimmed));
    }
}
