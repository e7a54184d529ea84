//! Property-based tests for the picker
//!
//! These tests verify:
//! - The cursor always lands on a real entry, whatever keys are pressed
//! - Screens never move backwards
//! - Output lines are kept in arrival order

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gkit::app::{CandidateList, Message, Model, Screen};
use gkit::executor::ExecutionEvent;
use gkit::types::{Candidate, SearchStatus};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        Just(KeyCode::Up),
        Just(KeyCode::Down),
        Just(KeyCode::Left),
        Just(KeyCode::Right),
        Just(KeyCode::PageUp),
        Just(KeyCode::PageDown),
        Just(KeyCode::Home),
        Just(KeyCode::End),
        Just(KeyCode::Char('j')),
        Just(KeyCode::Char('k')),
        Just(KeyCode::Char('x')),
    ]
}

fn message_strategy() -> impl Strategy<Value = Message> {
    prop_oneof![
        Just(Message::Tick),
        Just(Message::SearchStatus(SearchStatus::Started)),
        Just(Message::SearchStatus(SearchStatus::Finished)),
        (0usize..4).prop_map(|n| Message::SearchResult(
            (0..n).map(|i| Candidate::bare(format!("pkg{}", i))).collect()
        )),
        "[a-z ]{0,12}".prop_map(|s| Message::Execution(ExecutionEvent::Line(s))),
        Just(Message::Execution(ExecutionEvent::Done)),
        (1u16..200, 1u16..60).prop_map(|(width, height)| Message::Resize { width, height }),
        Just(KeyCode::Enter).prop_map(press),
        Just(KeyCode::Char('q')).prop_map(press),
        key_strategy().prop_map(press),
    ]
}

fn press(code: KeyCode) -> Message {
    Message::Input(KeyEvent::new(code, KeyModifiers::NONE))
}

fn listing(len: usize, per_page: usize) -> Model {
    let mut list = CandidateList::new(80, per_page);
    list.set_items((0..len).map(|i| Candidate::bare(format!("pkg{}", i))).collect());
    let mut model = Model::with_list(list);
    model.update(Message::SearchStatus(SearchStatus::Finished));
    model
}

proptest! {
    /// Navigation never moves the cursor off the list
    #[test]
    fn cursor_stays_in_bounds(
        len in 1usize..60,
        per_page in 1usize..15,
        keys in prop::collection::vec(key_strategy(), 0..80),
    ) {
        let mut model = listing(len, per_page);
        for code in keys {
            model.update(press(code));
            let list = model.list();
            prop_assert!(list.cursor() < len);
            prop_assert!(list.page() < list.total_pages());
            prop_assert!(list.selected().is_some());
        }
    }

    /// The highlighted entry is always on the visible page
    #[test]
    fn cursor_is_visible(
        len in 1usize..60,
        per_page in 1usize..15,
        keys in prop::collection::vec(key_strategy(), 0..40),
    ) {
        let mut model = listing(len, per_page);
        for code in keys {
            model.update(press(code));
        }
        let list = model.list();
        prop_assert!(list.visible().any(|(i, _)| i == list.cursor()));
        prop_assert!(list.visible().count() <= per_page);
    }

    /// Screens only advance, and nothing changes once quitting
    #[test]
    fn screens_are_monotonic(messages in prop::collection::vec(message_strategy(), 0..60)) {
        let mut model = Model::new();
        let mut previous = model.screen();
        let mut frozen: Option<Vec<String>> = None;
        for msg in messages {
            model.update(msg);
            prop_assert!(model.screen() >= previous);
            previous = model.screen();
            if let Some(lines) = &frozen {
                prop_assert_eq!(lines.as_slice(), model.output_lines());
            } else if model.screen() == Screen::Quitting {
                frozen = Some(model.output_lines().to_vec());
            }
        }
    }

    /// The transcript is exactly the executor lines in order
    #[test]
    fn transcript_preserves_order(lines in prop::collection::vec("[ -~]{0,30}", 0..20)) {
        let mut model = listing(1, 10);
        model.update(press(KeyCode::Enter));
        for line in &lines {
            model.update(Message::Execution(ExecutionEvent::Line(line.clone())));
        }
        model.update(Message::Execution(ExecutionEvent::Done));
        prop_assert_eq!(model.transcript(), lines.join("\n"));
    }
}
