//! Picker state machine
//!
//! [`Model`] holds everything the UI shows. [`Model::update`] is the only way
//! to change it: one message in, at most one [`Command`] out. No I/O happens
//! here, so every transition can be exercised without a terminal.
//!
//! # State Transitions
//!
//! ```text
//! Loading -> Listing -> Executing -> Quitting
//!    \          \
//!     +----------+--> Quitting   (quit key)
//! ```
//!
//! Screens only ever move to the right.

use super::{Command, Message};
use crate::executor::ExecutionEvent;
use crate::keymap::{self, KeyAction};
use crate::theme;
use crate::types::{Candidate, ResultSet, SearchStatus};
use crossterm::event::KeyEvent;
use strum::Display;
use tracing::debug;

/// Braille dot spinner, one frame per tick
pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Which screen is active. Ordering follows the only allowed direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Screen {
    Loading,
    Listing,
    Executing,
    Quitting,
}

/// What the renderer should draw for the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Empty,
    Loading { spinner: &'static str },
    Output(&'a [String]),
    List,
}

/// Result list plus selection cursor and pagination
#[derive(Debug, Clone)]
pub struct CandidateList {
    items: ResultSet,
    cursor: usize,
    per_page: usize,
    width: u16,
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::new(
            theme::DEFAULT_LIST_WIDTH,
            (theme::LIST_HEIGHT - theme::LIST_CHROME_ROWS) as usize,
        )
    }
}

impl CandidateList {
    pub fn new(width: u16, per_page: usize) -> Self {
        Self {
            items: ResultSet::new(),
            cursor: 0,
            per_page: per_page.max(1),
            width,
        }
    }

    /// Replace the contents and put the cursor back on the first entry.
    pub fn set_items(&mut self, items: ResultSet) {
        self.items = items;
        self.cursor = 0;
    }

    pub fn items(&self) -> &[Candidate] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&Candidate> {
        self.items.get(self.cursor)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn page(&self) -> usize {
        self.cursor / self.per_page
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.per_page).max(1)
    }

    /// Entries on the cursor's page with their absolute indices.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &Candidate)> {
        let start = self.page() * self.per_page;
        self.items
            .iter()
            .enumerate()
            .skip(start)
            .take(self.per_page)
    }

    fn last_index(&self) -> usize {
        self.items.len().saturating_sub(1)
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        self.cursor = (self.cursor + 1).min(self.last_index());
    }

    pub fn prev_page(&mut self) {
        let page = self.page();
        if page > 0 {
            self.cursor = (page - 1) * self.per_page;
        }
    }

    pub fn next_page(&mut self) {
        let page = self.page();
        if page + 1 < self.total_pages() {
            self.cursor = ((page + 1) * self.per_page).min(self.last_index());
        }
    }

    pub fn go_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn go_to_end(&mut self) {
        self.cursor = self.last_index();
    }
}

/// The picker's complete UI state
#[derive(Debug, Clone)]
pub struct Model {
    screen: Screen,
    list: CandidateList,
    output_lines: Vec<String>,
    reading_output: bool,
    loading: bool,
    spinner_frame: usize,
    installing: Option<Candidate>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Loading screen, empty list.
    pub fn new() -> Self {
        Self::with_list(CandidateList::default())
    }

    pub fn with_list(list: CandidateList) -> Self {
        Self {
            screen: Screen::Loading,
            list,
            output_lines: Vec::new(),
            reading_output: false,
            loading: true,
            spinner_frame: 0,
            installing: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn list(&self) -> &CandidateList {
        &self.list
    }

    pub fn output_lines(&self) -> &[String] {
        &self.output_lines
    }

    pub fn is_reading_output(&self) -> bool {
        self.reading_output
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_quitting(&self) -> bool {
        self.screen == Screen::Quitting
    }

    /// Candidate handed to the executor, once one was selected
    pub fn installing(&self) -> Option<&Candidate> {
        self.installing.as_ref()
    }

    /// Executor output joined with newlines, in arrival order.
    pub fn transcript(&self) -> String {
        self.output_lines.join("\n")
    }

    pub fn view(&self) -> View<'_> {
        if self.reading_output {
            View::Output(&self.output_lines)
        } else if self.screen == Screen::Quitting {
            View::Empty
        } else if self.screen == Screen::Loading {
            View::Loading {
                spinner: SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()],
            }
        } else {
            View::List
        }
    }

    /// Apply one message.
    ///
    /// Messages that make no sense for the current screen are dropped, and
    /// nothing is applied once the model is quitting.
    pub fn update(&mut self, msg: Message) -> Option<Command> {
        if self.screen == Screen::Quitting {
            return None;
        }

        match msg {
            Message::Input(key) => self.handle_key(key),
            Message::Resize { width, .. } => {
                self.list.set_width(width);
                None
            }
            Message::Tick => {
                if self.screen == Screen::Loading {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
                None
            }
            Message::SearchStatus(status) => {
                if self.screen == Screen::Loading {
                    match status {
                        SearchStatus::Started => self.loading = true,
                        SearchStatus::Finished => {
                            self.loading = false;
                            self.transition(Screen::Listing);
                        }
                    }
                }
                None
            }
            Message::SearchResult(items) => {
                if matches!(self.screen, Screen::Loading | Screen::Listing) {
                    debug!("Applying {} search result(s)", items.len());
                    self.list.set_items(items);
                }
                None
            }
            Message::Execution(event) => {
                if self.screen == Screen::Executing {
                    match event {
                        ExecutionEvent::Line(line) => {
                            self.reading_output = true;
                            self.output_lines.push(line);
                        }
                        ExecutionEvent::Done => self.transition(Screen::Quitting),
                    }
                }
                None
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        let action = keymap::action_for(&key)?;
        match self.screen {
            Screen::Loading => {
                if action == KeyAction::Quit {
                    self.transition(Screen::Quitting);
                }
                None
            }
            Screen::Listing => self.handle_list_action(action),
            Screen::Executing | Screen::Quitting => None,
        }
    }

    fn handle_list_action(&mut self, action: KeyAction) -> Option<Command> {
        match action {
            KeyAction::Quit => self.transition(Screen::Quitting),
            KeyAction::Select => {
                return match self.list.selected().cloned() {
                    Some(candidate) => {
                        self.installing = Some(candidate.clone());
                        self.transition(Screen::Executing);
                        Some(Command::Install(candidate))
                    }
                    None => {
                        self.transition(Screen::Quitting);
                        None
                    }
                };
            }
            KeyAction::CursorUp => self.list.cursor_up(),
            KeyAction::CursorDown => self.list.cursor_down(),
            KeyAction::PrevPage => self.list.prev_page(),
            KeyAction::NextPage => self.list.next_page(),
            KeyAction::GoToStart => self.list.go_to_start(),
            KeyAction::GoToEnd => self.list.go_to_end(),
        }
        None
    }

    fn transition(&mut self, next: Screen) {
        if next > self.screen {
            debug!("Screen {} -> {}", self.screen, next);
            self.screen = next;
        }
    }
}
