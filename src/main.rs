//! gkit - main entry point

use anyhow::Context;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use gkit::cli::{Cli, Commands};
use gkit::config::{self, GetConfig, RunConfig, SearchConfig};
use gkit::logging::{self, LogTarget};
use gkit::search::{RegistryClient, SearchClient};
use gkit::App;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::stdout;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

fn main() {
    let cli = Cli::parse_args();

    let target = match (&cli.log_file, &cli.command) {
        (Some(path), _) => LogTarget::File(path),
        (None, Commands::Search { .. }) => LogTarget::Stderr,
        (None, Commands::Get { .. }) => LogTarget::Disabled,
    };
    if let Err(e) = logging::init(target) {
        eprintln!("gkit: cannot open log file: {}", e);
        std::process::exit(1);
    }
    info!("gkit {} starting up", env!("CARGO_PKG_VERSION"));

    #[cfg(unix)]
    if let Err(e) = gkit::process_guard::init_signal_handlers(restore_terminal) {
        warn!("Failed to initialize signal handlers: {}", e);
    }
    #[cfg(unix)]
    let _guard = gkit::ProcessGuard::new();

    let result = RunConfig::from_command(cli.command)
        .map_err(anyhow::Error::from)
        .and_then(|config| match config {
            RunConfig::Get(config) => run_get(config),
            RunConfig::Search(config) => run_search(config),
        });

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("gkit: {:#}", e);
        // Exiting skips destructors, so stop any install process here.
        #[cfg(unix)]
        drop(_guard);
        std::process::exit(1);
    }
}

/// Interactive picker: search, select, install.
fn run_get(config: GetConfig) -> anyhow::Result<()> {
    let decoder = config.decoder()?;
    debug!("Using {} decoder for install output", decoder.name());
    let client = RegistryClient::new(config.registry_url.clone(), config::USER_AGENT)?;
    let mut app = App::new(config.keyword, config.install, decoder, Arc::new(client));

    enable_raw_mode().context("failed to enable raw mode")?;
    let result = crossterm::execute!(stdout(), EnterAlternateScreen)
        .context("failed to enter alternate screen")
        .and_then(|_| Terminal::new(CrosstermBackend::new(stdout())).context("failed to create terminal"))
        .and_then(|mut terminal| app.run(&mut terminal).map_err(anyhow::Error::from));

    // Always restore, even when the picker failed.
    restore_terminal();
    result?;

    // The alternate screen is gone, so repeat the install output on the
    // regular terminal.
    let transcript = app.finish();
    if !transcript.is_empty() {
        println!("{}", transcript);
    }
    Ok(())
}

/// Headless search: print every candidate, one per line or as JSON.
fn run_search(config: SearchConfig) -> anyhow::Result<()> {
    let client = RegistryClient::new(config.registry_url, config::USER_AGENT)?;
    let results = client
        .search(&config.keyword)
        .with_context(|| format!("searching for {:?}", config.keyword))?;
    info!("Found {} candidate(s)", results.len());

    if config.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for (index, candidate) in results.iter().enumerate() {
            println!("{}", candidate.label(index));
        }
    }
    Ok(())
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
}
