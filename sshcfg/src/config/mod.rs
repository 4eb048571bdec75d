// (c) 2024 Ross Younger
//! # 📖 Configuration
//!
//! There are two kinds of configuration here: the ssh-style configuration file that
//! `sshcfg` reads and resolves, and the settings that control `sshcfg` itself.
//!
//! ## File format
//!
//! This is the same basic format as OpenSSH client configuration files.
//!
//! Each line contains a keyword and one or more arguments.
//! Keywords are not interpreted, apart from `Host`; they are reported as written.
//!
//! Arguments are separated from keywords, and each other, by whitespace or commas.
//!
//! Arguments may be surrounded by double quotes (`"`); this allows you to set an argument containing spaces.
//! Within quotes, a double quote, single quote or backslash must be backslash-escaped i.e. `\"` or `\\`.
//!
//! Empty lines are ignored, as are lines beginning with `#`.
//!
//! #### Host
//!
//! `Host host [host2 host3...]`
//!
//! This directive introduces a _host block_.
//! All following directives - up to the next `Host` - only apply to hosts matching any of the patterns given.
//!
//! * Pattern matching uses `*` and `?` as wildcards in the usual way.
//! * A single asterisk `*` matches all hosts; this is used to provide defaults.
//! * Directives before the first `Host` apply to all hosts.
//! * If a directive applies more than once to the same host, its arguments accumulate
//!   in file order.
//!
//! ## Settings
//!
//! `sshcfg` obtains its own settings from the following sources, in order of precedence:
//! 1. Command-line options
//! 2. Environment variables beginning `SSHCFG_` (for example `SSHCFG_FORMAT=json`)
//! 3. Hard-wired defaults
//!
//! The available settings are the fields of [Settings].

mod path;
pub use path::expand_home_directory;

mod settings;
pub use settings::{DEFAULT_CONFIG_FILE, ENV_PREFIX, Overrides, Settings};
