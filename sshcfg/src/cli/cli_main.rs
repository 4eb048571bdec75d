//! Main CLI for sshcfg
// (c) 2024 Ross Younger

use std::ffi::OsString;
use std::process::ExitCode;

use super::{CliArgs, args::MainMode};
use crate::{
    cli::styles::{configure_colours, error, use_colours},
    config::{Settings, expand_home_directory},
    parser::parse,
    render::render,
    resolver::Resolver,
    util::{setup_tracing, tracing_is_initialised},
};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Main CLI entrypoint
///
/// Call this from `main`, passing the arguments to use.
/// Normally you will call `cli(std::env::args_os())` but you can pass in alternate arguments for CLI testing.
#[must_use]
#[allow(clippy::match_bool)] // improved readability
pub fn cli<I, T>(args: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    cli_inner(args)
        .inspect_err(|e| {
            if tracing_is_initialised() {
                tracing::error!("{e:#}");
            } else {
                let style = error();
                anstream::eprintln!("{style}Error:{style:#} {e:#}");
            }
        })
        .map_or(ExitCode::FAILURE, |success| match success {
            true => ExitCode::SUCCESS,
            false => ExitCode::FAILURE,
        })
}

/// Inner CLI logic
///
/// # Return
/// true indicates success. false indicates a failure where the callee has output to stderr.
fn cli_inner<I, T>(args: I) -> Result<bool>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let Some(args) = parse_args(args)? else {
        return Ok(true); // help/version shown; exit
    };

    let settings = Settings::load(&args.overrides())?;
    configure_colours(Some(settings.color));
    setup_tracing(args.trace_level(), settings.time_format)?; // to provoke error: set RUST_LOG=.

    let output = run(&args, &settings)?;
    anstream::print!("{output}");
    Ok(true)
}

fn parse_args<I, T>(args: I) -> Result<Option<CliArgs>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    use clap::error::ErrorKind::{DisplayHelp, DisplayVersion};
    match CliArgs::custom_parse(args) {
        Ok(args) => Ok(Some(args)),
        Err(e) if matches!(e.kind(), DisplayHelp | DisplayVersion) => {
            let message = e.render();
            if use_colours() {
                anstream::println!("{}", message.ansi());
            } else {
                anstream::println!("{message}");
            }
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Reads, resolves and renders, returning the text to output
fn run(args: &CliArgs, settings: &Settings) -> Result<String> {
    let mode = MainMode::from(args);
    let mut resolver = match mode {
        MainMode::Everything => Resolver::everything(),
        MainMode::Resolve => Resolver::for_hosts(args.hosts.iter().cloned())
            .context("specify at least one HOST, or --all")?,
    };

    let path = expand_home_directory(&settings.file)
        .with_context(|| format!("locating configuration file {}", settings.file))?;
    debug!("reading {}", path.display());
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;

    parse(&text, &mut resolver).with_context(|| format!("parsing {}", path.display()))?;
    let resolved = resolver.finalize();

    if mode == MainMode::Resolve {
        for host in args.hosts.iter().filter(|h| !resolved.contains_host(h)) {
            warn!("no configuration applies to {host}");
        }
    }
    render(&resolved, settings.format)
}
