//! Rendering tests against ratatui's TestBackend
//!
//! These tests verify:
//! - The loading spinner line
//! - List layout: title, status bar, highlighted entry, pagination
//! - Install output and the empty quit frame

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gkit::app::{CandidateList, Message, Model, SPINNER_FRAMES};
use gkit::executor::ExecutionEvent;
use gkit::types::{Candidate, SearchStatus};
use gkit::ui::{self, SEARCHING_TEXT};
use ratatui::{Terminal, backend::TestBackend};

fn draw(model: &Model, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| ui::render(f, model)).unwrap();
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

fn listing(items: Vec<Candidate>, per_page: usize) -> Model {
    let mut model = Model::with_list(CandidateList::new(80, per_page));
    model.update(Message::SearchResult(items));
    model.update(Message::SearchStatus(SearchStatus::Finished));
    model
}

fn press(model: &mut Model, code: KeyCode) {
    model.update(Message::Input(KeyEvent::new(code, KeyModifiers::NONE)));
}

#[test]
fn test_loading_view_shows_spinner() {
    let rows = draw(&Model::new(), 60, 5);
    assert_eq!(rows[0], "");
    assert_eq!(rows[1], format!("  {} {}", SPINNER_FRAMES[0], SEARCHING_TEXT));
}

#[test]
fn test_list_view_layout() {
    let model = listing(
        vec![
            Candidate::with_popularity("leftpad", "42"),
            Candidate::bare("github.com/x/leftpad"),
        ],
        10,
    );
    let rows = draw(&model, 80, 24);

    assert!(rows[1].contains("Please select the package to be imported."));
    assert_eq!(rows[3], "  2 packages");
    assert_eq!(rows[5], "  > 1. leftpad (42)");
    assert_eq!(rows[6], "    2. github.com/x/leftpad");
    assert!(rows.iter().any(|row| row.contains("q quit")));
}

#[test]
fn test_cursor_moves_highlight() {
    let mut model = listing(vec![Candidate::bare("a"), Candidate::bare("b")], 10);
    press(&mut model, KeyCode::Down);
    let rows = draw(&model, 80, 24);
    assert_eq!(rows[5], "    1. a");
    assert_eq!(rows[6], "  > 2. b");
}

#[test]
fn test_child_entries_name_their_parent() {
    let parent = Candidate::with_popularity("golang.org/x/text/language", "1000");
    let child = Candidate::child_of(&parent, "golang.org/x/text/language/display");
    let rows = draw(&listing(vec![parent, child], 10), 80, 24);
    assert_eq!(
        rows[6],
        "    2. golang.org/x/text/language/display (from golang.org/x/text/language)"
    );
}

#[test]
fn test_pagination_dots_follow_page() {
    let items = (0..5).map(|i| Candidate::bare(format!("p{}", i))).collect();
    let mut model = listing(items, 2);
    press(&mut model, KeyCode::Right);
    let rows = draw(&model, 80, 24);
    let dots = rows.iter().find(|row| row.contains('•') && row.contains('○')).unwrap();
    assert_eq!(dots.trim(), "○•○");
}

#[test]
fn test_status_bar_shows_install_target() {
    let mut model = listing(vec![Candidate::bare("errors")], 10);
    press(&mut model, KeyCode::Enter);
    let rows = draw(&model, 80, 24);
    assert_eq!(rows[3], "  Installing errors...");
}

#[test]
fn test_output_view_keeps_newest_lines() {
    let mut model = listing(vec![Candidate::bare("errors")], 10);
    press(&mut model, KeyCode::Enter);
    for i in 0..5 {
        model.update(Message::Execution(ExecutionEvent::Line(format!("line {}", i))));
    }
    let rows = draw(&model, 40, 3);
    assert_eq!(rows, vec!["line 2", "line 3", "line 4"]);
}

#[test]
fn test_output_stays_after_done() {
    let mut model = listing(vec![Candidate::with_popularity("leftpad", "42")], 10);
    press(&mut model, KeyCode::Enter);
    model.update(Message::Execution(ExecutionEvent::Line("go: downloading leftpad v1.0.0".into())));
    model.update(Message::Execution(ExecutionEvent::Line("go: added leftpad v1.0.0".into())));
    model.update(Message::Execution(ExecutionEvent::Done));

    let rows = draw(&model, 60, 4);
    assert_eq!(rows[0], "go: downloading leftpad v1.0.0");
    assert_eq!(rows[1], "go: added leftpad v1.0.0");
    assert_eq!(rows[2], "");
}

#[test]
fn test_quit_renders_empty_frame() {
    let mut model = Model::new();
    press(&mut model, KeyCode::Char('q'));
    let rows = draw(&model, 30, 4);
    assert!(rows.iter().all(String::is_empty));
}
