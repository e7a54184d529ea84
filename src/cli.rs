use crate::search::DEFAULT_REGISTRY_URL;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

/// gkit - find and install Go packages without remembering their import paths
#[derive(Parser, Debug)]
#[command(name = "gkit")]
#[command(about = "Search pkg.go.dev from the terminal and install the package you pick")]
#[command(version)]
pub struct Cli {
    /// Write logs to this file (the interactive picker owns the terminal)
    #[arg(long, global = true, env = "GKIT_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for a package and install the selected result with `go get`
    Get {
        /// Search keyword or partial import path
        #[arg(value_parser = parse_keyword)]
        package: String,

        /// Run `go get` without `-u`
        #[arg(long)]
        no_update: bool,

        /// Encoding of the install command's output (default: GBK on Windows, UTF-8 elsewhere)
        #[arg(long, env = "GKIT_OUTPUT_ENCODING")]
        encoding: Option<String>,

        #[command(flatten)]
        registry: RegistryArgs,
    },
    /// Print search results without the interactive picker
    Search {
        /// Search keyword or partial import path
        #[arg(value_parser = parse_keyword)]
        keyword: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        registry: RegistryArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RegistryArgs {
    /// Registry base URL
    #[arg(long = "registry", env = "GKIT_REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
    pub registry_url: Url,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

fn parse_keyword(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        Err("keyword must not be empty".to_string())
    } else {
        Ok(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_get_defaults() {
        let cli = Cli::try_parse_from(["gkit", "get", "left-pad"]).unwrap();
        match cli.command {
            Commands::Get {
                package,
                no_update,
                ..
            } => {
                assert_eq!(package, "left-pad");
                assert!(!no_update);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_registry_flag_overrides_default() {
        let cli = Cli::try_parse_from([
            "gkit",
            "search",
            "errors",
            "--json",
            "--registry",
            "http://localhost:8080/",
        ])
        .unwrap();
        match cli.command {
            Commands::Search { registry, json, .. } => {
                assert!(json);
                assert_eq!(registry.registry_url.as_str(), "http://localhost:8080/");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_blank_keyword_rejected() {
        assert!(Cli::try_parse_from(["gkit", "get", "   "]).is_err());
    }

    #[test]
    fn test_keyword_passed_verbatim() {
        let cli = Cli::try_parse_from(["gkit", "search", " left-pad "]).unwrap();
        match cli.command {
            Commands::Search { keyword, .. } => assert_eq!(keyword, " left-pad "),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
