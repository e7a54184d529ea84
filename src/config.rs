//! Run configuration
//!
//! Turns parsed CLI arguments (with their environment fallbacks already
//! applied by clap) into validated settings for one run.

use crate::cli::Commands;
use crate::decoder::{self, OutputDecoder};
use crate::error::{GkitError, Result};
use crate::executor::InstallCommand;
use url::Url;

/// User agent sent to the registry
pub const USER_AGENT: &str = concat!("gkit/", env!("CARGO_PKG_VERSION"));

/// Settings for the interactive `get` command
#[derive(Debug, Clone)]
pub struct GetConfig {
    pub keyword: String,
    pub registry_url: Url,
    pub install: InstallCommand,
    /// Explicit output encoding label; `None` picks by platform
    pub encoding: Option<String>,
}

impl GetConfig {
    /// Decoder for the install output, selected once for the run.
    pub fn decoder(&self) -> Result<Box<dyn OutputDecoder>> {
        match &self.encoding {
            Some(label) => decoder::for_label(label),
            None => Ok(decoder::for_current_platform()),
        }
    }
}

/// Settings for the headless `search` command
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub keyword: String,
    pub registry_url: Url,
    pub json: bool,
}

/// Validated configuration for whichever command was requested
#[derive(Debug, Clone)]
pub enum RunConfig {
    Get(GetConfig),
    Search(SearchConfig),
}

impl RunConfig {
    pub fn from_command(command: Commands) -> Result<Self> {
        match command {
            Commands::Get {
                package,
                no_update,
                encoding,
                registry,
            } => {
                validate_registry(&registry.registry_url)?;
                let config = GetConfig {
                    keyword: package,
                    registry_url: registry.registry_url,
                    install: InstallCommand::go_get(!no_update),
                    encoding: encoding.filter(|label| !label.trim().is_empty()),
                };
                // Surface a bad label now rather than after the user picked a package.
                config.decoder()?;
                Ok(RunConfig::Get(config))
            }
            Commands::Search {
                keyword,
                json,
                registry,
            } => {
                validate_registry(&registry.registry_url)?;
                Ok(RunConfig::Search(SearchConfig {
                    keyword,
                    registry_url: registry.registry_url,
                    json,
                }))
            }
        }
    }
}

fn validate_registry(url: &Url) -> Result<()> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(GkitError::config(format!(
            "registry URL must use http or https, got `{}`",
            other
        ))),
    }
}
