//! Command-line argument definitions
// (c) 2024 Ross Younger

use clap::Parser;
use std::ffi::OsString;

use super::styles::{CLAP_STYLES, ColourMode};
use crate::config::{DEFAULT_CONFIG_FILE, Overrides};
use crate::render::OutputFormat;
use crate::util::TimeFormat;

/// Options which may be provided on the command line
#[derive(Debug, Parser, Clone, Default)]
#[command(
    author,
    version,
    about,
    long_about = "Reads an OpenSSH-style client configuration file and shows the settings that apply to the given host(s).",
    styles = CLAP_STYLES,
    infer_long_args(true)
)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CliArgs {
    /// Enable detailed debug output
    ///
    /// This has the same effect as setting `RUST_LOG=sshcfg=debug` in the environment.
    /// If present, `RUST_LOG` overrides this option.
    #[arg(short, long, action, help_heading("Debug"), display_order(0))]
    pub(crate) debug: bool,

    /// Quiet mode: reports only errors
    #[arg(short, long, action, conflicts_with("debug"), help_heading("Output"))]
    pub(crate) quiet: bool,

    /// The configuration file to read
    #[arg(
        short('F'),
        long,
        value_name("FILE"),
        help_heading("Configuration"),
        long_help(format!("The configuration file to read [default: {DEFAULT_CONFIG_FILE}]\n\nThis may also be set by the environment variable SSHCFG_FILE."))
    )]
    pub(crate) file: Option<String>,

    /// Output format [default: text]
    #[arg(long, value_enum, help_heading("Output"))]
    pub(crate) format: Option<OutputFormat>,

    /// Colour mode for console output [default: auto]
    #[arg(long, value_enum, alias("colour"), help_heading("Output"))]
    pub(crate) color: Option<ColourMode>,

    /// Time format for log messages
    /// [default: local]
    #[arg(
        short = 'T',
        long,
        value_name("FORMAT"),
        help_heading("Output"),
        next_line_help(true)
    )]
    pub(crate) time_format: Option<TimeFormat>,

    /// Show every directive, filed under the host patterns as written in the file
    #[arg(short, long, action, conflicts_with("hosts"), help_heading("Output"))]
    pub(crate) all: bool,

    // (POSITIONAL ARGUMENTS!)
    /// The host(s) to resolve. Hosts are matched exactly as given; no DNS lookup takes place.
    #[arg(value_name = "HOST")]
    pub(crate) hosts: Vec<String>,
}

impl CliArgs {
    pub(crate) fn custom_parse<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    /// The settings this command line overrides
    pub(crate) fn overrides(&self) -> Overrides {
        Overrides {
            file: self.file.clone(),
            format: self.format,
            color: self.color,
            time_format: self.time_format,
        }
    }

    /// Computes the trace level
    pub(crate) fn trace_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}

/// What are we doing?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MainMode {
    /// Resolve for the hosts given on the command line
    Resolve,
    /// Dump everything
    Everything,
}

impl From<&CliArgs> for MainMode {
    fn from(args: &CliArgs) -> Self {
        if args.all {
            MainMode::Everything
        } else {
            MainMode::Resolve
        }
    }
}
