//! User interface rendering module
//!
//! Rendering is a pure function of the [`Model`]: exactly one of the four
//! views is drawn per frame.
//! - `list` - the navigable result list

mod list;

use crate::app::{Model, View};
use crate::theme::Styles;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

pub use list::status_text;

/// Text shown next to the spinner
pub const SEARCHING_TEXT: &str = "Searching for packages...";

/// Draw the frame for the current state
pub fn render(f: &mut Frame, model: &Model) {
    let area = f.area();
    match model.view() {
        View::Empty => f.render_widget(Clear, area),
        View::Loading { spinner } => render_loading(f, area, spinner),
        View::Output(lines) => render_output(f, area, lines),
        View::List => list::render_list(f, area, model),
    }
}

fn render_loading(f: &mut Frame, area: Rect, spinner: &'static str) {
    let lines = vec![
        Line::default(),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(spinner, Styles::spinner()),
            Span::raw(" "),
            Span::styled(SEARCHING_TEXT, Styles::text()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

/// Install output, newest lines kept on screen when it overflows.
fn render_output(f: &mut Frame, area: Rect, output: &[String]) {
    let start = output.len().saturating_sub(area.height as usize);
    let lines: Vec<Line> = output[start..]
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}
