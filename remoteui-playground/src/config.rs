//! Playground configuration loaded with figment.

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml, Yaml},
    Figment,
};
use remoteui_schema::NamingStyle;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Result;

/// Base name of the optional configuration files in the working directory.
pub const CONFIG_FILE_STEM: &str = "remoteui";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "REMOTEUI_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Identifier transform for schema ids and payload keys
    pub naming: NamingStyle,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Flag currently invalid fields, not only those the validator reports
    pub highlight_errors: bool,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            naming: NamingStyle::Snake,
            pretty: true,
            highlight_errors: false,
        }
    }
}

/// Values given on the command line. Unset values leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub naming: Option<NamingStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_errors: Option<bool>,
}

impl PlaygroundConfig {
    /// Load configuration rooted at `dir`.
    ///
    /// Sources are merged in precedence order (later sources override earlier ones):
    /// 1. Default values
    /// 2. `remoteui.yaml`, then `remoteui.toml`, when present in `dir`
    /// 3. Environment variables with the `REMOTEUI_` prefix
    /// 4. Command line overrides
    pub fn load(dir: &Path, overrides: &ConfigOverrides) -> Result<Self> {
        let config: Self = Self::figment(dir, overrides).extract()?;
        debug!(
            naming = %config.naming,
            pretty = config.pretty,
            highlight_errors = config.highlight_errors,
            "loaded playground configuration"
        );
        Ok(config)
    }

    fn figment(dir: &Path, overrides: &ConfigOverrides) -> Figment {
        let yaml = dir.join(format!("{CONFIG_FILE_STEM}.yaml"));
        let toml = dir.join(format!("{CONFIG_FILE_STEM}.toml"));
        trace!(yaml = %yaml.display(), toml = %toml.display(), "configuration file candidates");

        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml))
            .merge(Toml::file(toml))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }
}
