//! Command Line Interface for sshcfg
// (c) 2024 Ross Younger
mod args;
pub(crate) use args::CliArgs;
mod cli_main;
pub mod styles;
pub use cli_main::cli;
