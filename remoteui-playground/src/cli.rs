//! CLI definition for the RemoteUi playground.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use remoteui_schema::NamingStyle;

use crate::config::ConfigOverrides;

/// RemoteUi playground
///
/// Serves the demo schema and initial data, and runs payloads through an
/// editor session and the demo validator.
#[derive(Parser, Debug)]
#[command(name = "remoteui")]
#[command(version)]
#[command(about = "RemoteUi playground - schema, initial data and validation round trips")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Identifier transform: verbatim, snake or camel
    #[arg(long, global = true)]
    pub naming: Option<NamingStyle>,

    /// Print compact JSON
    #[arg(long, global = true)]
    pub compact: bool,

    /// Flag currently invalid fields as well as reported ones
    #[arg(long, global = true)]
    pub highlight: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the schema definition
    Schema,
    /// Print the initial data
    Initial,
    /// Validate a payload and print the error tree
    Validate {
        /// Payload file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Open an editor session over the initial data and describe its tree
    Session,
}

impl Cli {
    /// Command line values for the top configuration layer.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            naming: self.naming,
            pretty: self.compact.then_some(false),
            highlight_errors: self.highlight.then_some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_schema() {
        let cli = Cli::parse_from(["remoteui", "schema"]);
        assert!(!cli.debug);
        assert!(matches!(cli.command, Commands::Schema));
        let overrides = cli.overrides();
        assert!(overrides.naming.is_none());
        assert!(overrides.pretty.is_none());
        assert!(overrides.highlight_errors.is_none());
    }

    #[test]
    fn test_cli_parsing_global_flags() {
        let cli = Cli::parse_from([
            "remoteui",
            "initial",
            "--naming",
            "camel",
            "--compact",
            "--highlight",
            "-d",
        ]);
        assert!(cli.debug);
        let overrides = cli.overrides();
        assert_eq!(overrides.naming, Some(NamingStyle::Camel));
        assert_eq!(overrides.pretty, Some(false));
        assert_eq!(overrides.highlight_errors, Some(true));
    }

    #[test]
    fn test_cli_parsing_validate_file() {
        let cli = Cli::parse_from(["remoteui", "validate", "payload.json"]);
        match cli.command {
            Commands::Validate { file } => assert_eq!(file, Some(PathBuf::from("payload.json"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_naming() {
        assert!(Cli::try_parse_from(["remoteui", "schema", "--naming", "kebab"]).is_err());
    }
}
