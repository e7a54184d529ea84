//! gkit library
//!
//! Searches pkg.go.dev for a keyword, lets the user pick a package in a
//! terminal list, and runs `go get` for it while streaming the output.

pub mod app;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod error;
pub mod executor;
pub mod keymap;
pub mod logging;
#[cfg(unix)]
pub mod process_guard;
pub mod search;
pub mod theme;
pub mod types;
pub mod ui;

pub use app::{App, Command, Event, Message, Model, Screen, View};
pub use config::{GetConfig, RunConfig, SearchConfig};
pub use decoder::{IdentityDecoder, LegacyEncodingDecoder, OutputDecoder};
pub use error::{GkitError, Result};
pub use executor::{ExecutionEvent, InstallCommand};
#[cfg(unix)]
pub use process_guard::{ChildRegistry, CommandProcessGroup, ProcessGuard};
pub use search::{RegistryClient, SearchClient};
pub use types::{Candidate, ResultSet, SearchStatus};
