//! Pager and row-count footer.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::style::Styles;
use crate::view::gpu::GpuView;

pub fn render_footer(frame: &mut Frame, area: Rect, view: &GpuView) {
    let arrow = |enabled: bool, glyph: &'static str| {
        if enabled {
            Span::styled(glyph, Styles::help_key())
        } else {
            Span::styled(glyph, Styles::dim())
        }
    };

    let line = Line::from(vec![
        arrow(view.can_previous, " ◀ "),
        arrow(view.can_next, "▶ "),
        Span::styled(format!(" {} ", view.page_label), Styles::accent()),
        Span::styled("│", Styles::dim()),
        Span::styled(format!(" Show {} ", view.page_size), Styles::default()),
        Span::styled("│", Styles::dim()),
        Span::styled(format!(" {} ", view.footer), Styles::default()),
        Span::styled("│", Styles::dim()),
        Span::styled(" n/p", Styles::help_key()),
        Span::styled(" page ", Styles::help()),
        Span::styled("g", Styles::help_key()),
        Span::styled(" go to ", Styles::help()),
        Span::styled("z", Styles::help_key()),
        Span::styled(" size", Styles::help()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
