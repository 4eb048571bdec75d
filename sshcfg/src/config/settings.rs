//! Settings for sshcfg itself
// (c) 2025 Ross Younger

use anyhow::Context as _;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::cli::styles::ColourMode;
use crate::render::OutputFormat;
use crate::util::TimeFormat;

/// The configuration file read when none is specified
pub const DEFAULT_CONFIG_FILE: &str = "~/.ssh/config";

/// Prefix of environment variables which supply settings
pub const ENV_PREFIX: &str = "SSHCFG_";

/// Run-time settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// The configuration file to resolve. A leading `~` is expanded.
    pub file: String,
    /// Output format
    pub format: OutputFormat,
    /// Terminal colour mode
    pub color: ColourMode,
    /// Time stamp format for log messages
    pub time_format: TimeFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file: DEFAULT_CONFIG_FILE.into(),
            format: OutputFormat::default(),
            color: ColourMode::default(),
            time_format: TimeFormat::default(),
        }
    }
}

/// Settings given on the command line. Fields left as `None` do not override anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overrides {
    /// Overrides [`Settings::file`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Overrides [`Settings::format`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    /// Overrides [`Settings::color`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColourMode>,
    /// Overrides [`Settings::time_format`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_format: Option<TimeFormat>,
}

impl Settings {
    /// Defaults overlaid with the environment
    fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    /// Merges all sources, without adding context to any error
    pub(crate) fn extract(overrides: &Overrides) -> Result<Self, figment::Error> {
        Self::figment()
            .merge(Serialized::defaults(overrides))
            .extract()
    }

    /// Assembles settings from defaults, the environment and the command line
    pub fn load(overrides: &Overrides) -> anyhow::Result<Self> {
        Self::extract(overrides).context("invalid settings")
    }
}
