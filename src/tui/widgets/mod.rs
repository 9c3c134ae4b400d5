//! TUI widgets.

mod cripple_notice;
mod detail;
mod footer;
mod gpu_table;
mod header;
mod help;
mod hidden_columns;
mod quit_confirm;

use ratatui::layout::Rect;

pub use cripple_notice::render_cripple_notice;
pub use detail::render_detail;
pub use footer::render_footer;
pub use gpu_table::render_gpu_table;
pub use header::render_header;
pub use help::render_help;
pub use hidden_columns::{render_hidden_chips, render_hidden_columns};
pub use quit_confirm::render_quit_confirm;

/// Centered popup of `width_pct`/`height_pct` of `area`, clamped to the given bounds.
pub(crate) fn popup_area(
    area: Rect,
    width_pct: u16,
    height_pct: u16,
    width_bounds: (u16, u16),
    height_bounds: (u16, u16),
) -> Rect {
    let scaled = |len: u16, pct: u16| (u32::from(len) * u32::from(pct) / 100) as u16;
    let width = scaled(area.width, width_pct)
        .clamp(width_bounds.0, width_bounds.1)
        .min(area.width);
    let height = scaled(area.height, height_pct)
        .clamp(height_bounds.0, height_bounds.1)
        .min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
