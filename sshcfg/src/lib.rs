// (c) 2024 Ross Younger

#![allow(clippy::doc_markdown)]
//! `sshcfg` resolves OpenSSH-style client configuration files.
//!
//! Given the text of a configuration file and one or more host names, it works out which
//! directives apply to each host, honouring `Host` blocks and their wildcard patterns, and
//! merges repeated directives.
//!
//! It is a syntax-level tool. Apart from `Host`, keywords are not interpreted.
//!
//! ## Overview
//!
//! * The [parser] is a character-at-a-time state machine which reports each completed
//!   [Directive] to a [DirectiveSink].
//! * The [Resolver] is a sink which tracks the `Host` patterns in force, and uses the
//!   [glob] matcher to decide which hosts each directive applies to.
//! * The result is a [ResolvedConfig]: host, to keyword, to arguments.
//!
//! ```
//! let text = "Host *.example.com\n  User admin\n  IdentityFile a\n  IdentityFile b\n";
//! let config = sshcfg::resolve(text, Some("www.example.com")).unwrap();
//! let files = config.lookup("www.example.com", "IdentityFile").unwrap();
//! assert_eq!(files, ["a", "b"]);
//! ```
//!
//! ## 📖 Documentation
//!
//! * [File format and settings](config)
//!
//! ## Command line
//!
//! The `sshcfg` binary reads `~/.ssh/config` (or the file given with `-F`) and prints the
//! settings for the host(s) named on the command line. `--all` prints everything in the file,
//! grouped by host pattern. `--format` selects text, table or JSON output.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub(crate) mod cli;
pub use cli::cli as main;
pub use cli::styles;

pub mod config;
pub mod errors;
pub use errors::{Error, SyntaxError};

pub mod glob;
pub mod parser;
pub use parser::{Directive, DirectiveSink, Parser, parse};

pub mod render;
pub mod resolver;
pub use resolver::{ResolvedConfig, Resolver, resolve, resolve_hosts};

pub mod tape;
pub mod util;
