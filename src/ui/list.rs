//! Result list rendering
//!
//! Layout, top to bottom: title, status bar, one page of entries, pagination
//! dots, key help.

use crate::app::{CandidateList, Model};
use crate::keymap;
use crate::theme::{self, Styles};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

pub const LIST_TITLE: &str = "Please select the package to be imported.";

pub fn render_list(f: &mut Frame, area: Rect, model: &Model) {
    let list = model.list();

    // One blank row above the list, like the loading view.
    let top = area.y + area.height.min(1);
    let area = Rect::new(
        area.x,
        top,
        list.width().min(area.width),
        theme::LIST_HEIGHT.min(area.height.saturating_sub(1)),
    );

    let mut lines = vec![
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!(" {} ", LIST_TITLE), Styles::title()),
        ]),
        Line::default(),
        Line::styled(format!("  {}", status_text(model)), Styles::text_muted()),
        Line::default(),
    ];

    let mut shown = 0;
    for (index, candidate) in list.visible() {
        let line = if index == list.cursor() {
            Line::styled(
                format!("{}> {}", pad(theme::SELECTED_PADDING), candidate.label(index)),
                Styles::selected(),
            )
        } else {
            Line::styled(
                format!("{}{}", pad(theme::ITEM_PADDING), candidate.label(index)),
                Styles::text(),
            )
        };
        lines.push(line);
        shown += 1;
    }
    // Keep pagination and help anchored on short pages.
    lines.extend((shown..list.per_page()).map(|_| Line::default()));

    lines.push(Line::default());
    lines.push(pagination_line(list));
    lines.push(Line::styled(
        format!("{}{}", pad(theme::ITEM_PADDING), keymap::help_line()),
        Styles::text_muted(),
    ));

    f.render_widget(Paragraph::new(lines), area);
}

/// Status bar text: item count, or the package being installed.
pub fn status_text(model: &Model) -> String {
    if let Some(candidate) = model.installing() {
        return format!("Installing {}...", candidate.identifier);
    }
    match model.list().len() {
        0 => "No packages".to_string(),
        1 => "1 package".to_string(),
        n => format!("{} packages", n),
    }
}

fn pagination_line(list: &CandidateList) -> Line<'static> {
    let total = list.total_pages();
    if total <= 1 {
        return Line::default();
    }
    let mut spans = vec![Span::raw(pad(theme::ITEM_PADDING))];
    spans.extend((0..total).map(|page| {
        if page == list.page() {
            Span::styled("•", Styles::page_active())
        } else {
            Span::styled("○", Styles::text_muted())
        }
    }));
    Line::from(spans)
}

fn pad(width: u16) -> String {
    " ".repeat(width as usize)
}
