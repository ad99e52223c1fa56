//! RemoteUi playground
//!
//! A command-line stand-in for a RemoteUi host application. It builds the
//! schema of a small demo object model, serves its initial data, and runs
//! payloads through an editor session and a demo validator.
//!
//! ```rust,ignore
//! use remoteui_playground::{commands, PlaygroundConfig, ConfigOverrides};
//!
//! let config = PlaygroundConfig::load(Path::new("."), &ConfigOverrides::default())?;
//! let payload = commands::initial(&config)?;
//! let report = commands::validate(&config, payload).await?;
//! println!("{}", commands::render(&report.errors, config.pretty)?);
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod validator;

pub use cli::{Cli, Commands};
pub use config::{ConfigOverrides, PlaygroundConfig};
pub use error::{PlaygroundError, Result};
