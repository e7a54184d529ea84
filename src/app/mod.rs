//! Application module
//!
//! Contains the program driver: the single event queue, the background
//! producers feeding it, and the loop that hands each event to the [`Model`].
//!
//! # Module Structure
//! - `state` - Screen, candidate list and the `Model` transition function
//! - Main module - `App` driver and the message types crossing the queue

mod state;

pub use state::{CandidateList, Model, SPINNER_FRAMES, Screen, View};

use crate::decoder::OutputDecoder;
use crate::error::{GkitError, Result};
use crate::executor::{self, ExecutionEvent, InstallCommand};
use crate::search::SearchClient;
use crate::types::{Candidate, ResultSet, SearchStatus};
use crate::ui;
use crossterm::event::{Event as TermEvent, KeyEvent};
use ratatui::{Terminal, backend::Backend};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Spinner frame interval
pub const TICK_RATE: Duration = Duration::from_millis(100);

/// Inputs to [`Model::update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A key press from the terminal
    Input(KeyEvent),
    /// Terminal was resized
    Resize { width: u16, height: u16 },
    /// Spinner animation tick
    Tick,
    /// Complete search results, delivered in one piece
    SearchResult(ResultSet),
    /// Search progress marker
    SearchStatus(SearchStatus),
    /// Install output or completion
    Execution(ExecutionEvent),
}

impl From<ExecutionEvent> for Message {
    fn from(event: ExecutionEvent) -> Self {
        Message::Execution(event)
    }
}

/// Side effects requested by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the install command for this candidate
    Install(Candidate),
}

/// What travels through the driver's queue.
///
/// Fatal errors never reach the model; the driver stops on them.
#[derive(Debug)]
pub enum Event {
    Message(Message),
    Fatal(GkitError),
}

impl From<Message> for Event {
    fn from(msg: Message) -> Self {
        Event::Message(msg)
    }
}

impl From<ExecutionEvent> for Event {
    fn from(event: ExecutionEvent) -> Self {
        Event::Message(event.into())
    }
}

/// Program driver owning the model and the event queue
pub struct App {
    model: Model,
    keyword: String,
    install: InstallCommand,
    /// Chosen once at startup, consumed by the single install run
    decoder: Option<Box<dyn OutputDecoder>>,
    search: Arc<dyn SearchClient>,
    tx: Sender<Event>,
    rx: Receiver<Event>,
    install_thread: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(
        keyword: impl Into<String>,
        install: InstallCommand,
        decoder: Box<dyn OutputDecoder>,
        search: Arc<dyn SearchClient>,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            model: Model::new(),
            keyword: keyword.into(),
            install,
            decoder: Some(decoder),
            search,
            tx,
            rx,
            install_thread: None,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Handle for posting events into the queue
    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    /// Mark the search as started and run it on a background thread.
    ///
    /// Results arrive as `SearchResult` followed by `SearchStatus::Finished`;
    /// a failure arrives as `Event::Fatal`.
    pub fn start_search(&mut self) -> Result<()> {
        self.dispatch(Message::SearchStatus(SearchStatus::Started))?;

        let tx = self.sender();
        let search = Arc::clone(&self.search);
        let keyword = self.keyword.clone();
        thread::spawn(move || {
            let events: Vec<Event> = match search.search(&keyword) {
                Ok(results) => vec![
                    Message::SearchResult(results).into(),
                    Message::SearchStatus(SearchStatus::Finished).into(),
                ],
                Err(e) => vec![Event::Fatal(e)],
            };
            for event in events {
                if tx.send(event).is_err() {
                    debug!("Search finished after the UI went away");
                    break;
                }
            }
        });
        Ok(())
    }

    /// Post a `Tick` every [`TICK_RATE`] until the queue closes.
    pub fn spawn_ticker(&self) {
        let tx = self.sender();
        thread::spawn(move || {
            loop {
                thread::sleep(TICK_RATE);
                if tx.send(Message::Tick.into()).is_err() {
                    break;
                }
            }
        });
    }

    /// Forward terminal key and resize events into the queue.
    pub fn spawn_input_pump(&self) {
        let tx = self.sender();
        thread::spawn(move || {
            loop {
                let event = match crossterm::event::read() {
                    Ok(TermEvent::Key(key)) => Message::Input(key).into(),
                    Ok(TermEvent::Resize(width, height)) => Message::Resize { width, height }.into(),
                    Ok(_) => continue,
                    Err(e) => Event::Fatal(GkitError::Terminal(e)),
                };
                let fatal = matches!(event, Event::Fatal(_));
                if tx.send(event).is_err() || fatal {
                    break;
                }
            }
        });
    }

    /// Block until the next queued event.
    pub fn next_event(&self) -> Event {
        // `self.tx` keeps the channel open, so recv only fails if it is dropped.
        self.rx
            .recv()
            .unwrap_or_else(|_| Event::Fatal(GkitError::config("event queue closed")))
    }

    /// Dispatch one event through the model and carry out its command.
    pub fn step(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Fatal(e) => Err(e),
            Event::Message(msg) => self.dispatch(msg),
        }
    }

    fn dispatch(&mut self, msg: Message) -> Result<()> {
        match self.model.update(msg) {
            Some(command) => self.execute(command),
            None => Ok(()),
        }
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Install(candidate) => {
                let decoder = match self.decoder.take() {
                    Some(decoder) => decoder,
                    None => {
                        warn!("Install requested twice, ignoring {}", candidate.identifier);
                        return Ok(());
                    }
                };
                info!("Installing {}", candidate.identifier);
                let handle =
                    executor::spawn_install(&self.install, &candidate, decoder, self.sender())?;
                self.install_thread = Some(handle);
                Ok(())
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.model.is_quitting()
    }

    /// Run the interactive session until the model quits.
    ///
    /// Events are dispatched one at a time; whatever is already queued is
    /// drained before the next frame is drawn.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting picker for {:?}", self.keyword);
        // crossterm reports no initial size, so seed the layout width here.
        let size = terminal.size()?;
        self.dispatch(Message::Resize {
            width: size.width,
            height: size.height,
        })?;
        self.start_search()?;
        self.spawn_ticker();
        self.spawn_input_pump();

        terminal.draw(|f| ui::render(f, &self.model))?;
        while !self.is_finished() {
            let event = self.next_event();
            self.step(event)?;
            while !self.is_finished() {
                match self.rx.try_recv() {
                    Ok(event) => self.step(event)?,
                    Err(_) => break,
                }
            }
            terminal.draw(|f| ui::render(f, &self.model))?;
        }

        info!("Picker finished on screen {}", self.model.screen());
        Ok(())
    }

    /// Wait for the install thread, if any, and return the transcript.
    pub fn finish(mut self) -> String {
        if let Some(handle) = self.install_thread.take() {
            if handle.join().is_err() {
                warn!("Install output thread panicked");
            }
        }
        self.model.transcript()
    }
}
