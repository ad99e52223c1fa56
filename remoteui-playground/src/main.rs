//! RemoteUi playground command-line interface.
//!
//! Commands:
//! - `remoteui schema`: Print the schema definition
//! - `remoteui initial`: Print the initial data
//! - `remoteui validate [file]`: Validate a payload (stdin when no file) and print the report
//! - `remoteui session`: Describe an editor session over the initial data
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use remoteui_playground::{commands, Cli, Commands, PlaygroundConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("remoteui=debug,remoteui_schema=debug,remoteui_editor=debug,remoteui_playground=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = result_to_exit(dispatch_command(cli).await);
    std::process::exit(exit_code);
}

/// Load configuration and run the selected command.
async fn dispatch_command(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = PlaygroundConfig::load(&cwd, &cli.overrides())?;

    match cli.command {
        Commands::Schema => print(&commands::schema(&config)?, config.pretty),
        Commands::Initial => print(&commands::initial(&config)?, config.pretty),
        Commands::Validate { file } => {
            let payload = commands::read_payload(file.as_deref())?;
            let report = commands::validate(&config, payload).await?;
            print(&report, config.pretty)
        }
        Commands::Session => print(&commands::session(&config)?, config.pretty),
    }
}

fn print<T: Serialize>(document: &T, pretty: bool) -> anyhow::Result<()> {
    println!("{}", commands::render(document, pretty)?);
    Ok(())
}

/// Convert a `Result<(), E: Display>` to an exit code.
fn result_to_exit<E: std::fmt::Display>(result: Result<(), E>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_to_exit() {
        assert_eq!(result_to_exit::<String>(Ok(())), 0);
        assert_eq!(result_to_exit(Err("boom")), 1);
    }

    #[test]
    fn test_cli_parsing_session() {
        let cli = Cli::parse_from(["remoteui", "session"]);
        assert!(matches!(cli.command, Commands::Session));
    }
}
