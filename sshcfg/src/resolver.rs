//! Host resolution and merging
// (c) 2025 Ross Younger
//!
//! The [`Resolver`] follows the `Host` blocks of a configuration file as the parser reports
//! them, and accumulates the directives that apply to each host of interest.
//!
//! * Before the first `Host` directive, everything applies to every host (`*`).
//! * Each `Host` directive replaces the set of patterns in force.
//! * A directive is recorded for a queried host once for each pattern in force that matches it.
//! * When a keyword is seen again for the same host, its arguments are appended to those
//!   already collected.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::errors::{Error, SyntaxError};
use crate::glob::matches;
use crate::parser::{Directive, DirectiveSink, parse};

/// The keyword which introduces a host block
pub const HOST_KEYWORD: &str = "Host";

/// The properties collected for one host: keyword to merged arguments
pub type Properties = HashMap<String, Vec<String>>;

/// The result of resolving a configuration file: host name to [`Properties`].
///
/// Ordering is not defined; see [`sorted`](ResolvedConfig::sorted).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedConfig(HashMap<String, Properties>);

impl ResolvedConfig {
    /// The properties for a host, if any were found
    #[must_use]
    pub fn get(&self, host: &str) -> Option<&Properties> {
        self.0.get(host)
    }

    /// The merged arguments of a single keyword for a host
    #[must_use]
    pub fn lookup(&self, host: &str, keyword: &str) -> Option<&[String]> {
        self.0
            .get(host)
            .and_then(|p| p.get(keyword))
            .map(Vec::as_slice)
    }

    /// Does this host have any properties?
    #[must_use]
    pub fn contains_host(&self, host: &str) -> bool {
        self.0.contains_key(host)
    }

    /// Number of hosts with properties
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Were no properties found at all?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hosts in sorted order, each with its keywords in sorted order
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, Vec<(&str, &[String])>)> {
        let mut hosts: Vec<_> = self
            .0
            .iter()
            .map(|(host, props)| {
                let mut keywords: Vec<_> = props
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_slice()))
                    .collect();
                keywords.sort_unstable_by_key(|(k, _)| *k);
                (host.as_str(), keywords)
            })
            .collect();
        hosts.sort_unstable_by_key(|(h, _)| *h);
        hosts
    }

    fn record(&mut self, host: &str, keyword: &str, arguments: &[String]) {
        self.0
            .entry(host.to_owned())
            .or_default()
            .entry(keyword.to_owned())
            .or_default()
            .extend_from_slice(arguments);
    }
}

/// Which hosts does the resolver collect data for?
#[derive(Debug, Clone, PartialEq, Eq)]
enum Targets {
    /// Record every directive under the literal patterns in force
    Everything,
    /// Record directives under each matching host name
    Hosts(Vec<String>),
}

/// Accumulates directives for the host(s) of interest.
///
/// This is a [`DirectiveSink`]; hand it to [`parse`].
#[derive(Debug, Clone)]
pub struct Resolver {
    targets: Targets,
    patterns: Vec<String>,
    resolved: ResolvedConfig,
}

impl Resolver {
    fn new(targets: Targets) -> Self {
        Self {
            targets,
            patterns: vec!["*".into()],
            resolved: ResolvedConfig::default(),
        }
    }

    /// A resolver that keeps everything, filed under the host patterns as written
    #[must_use]
    pub fn everything() -> Self {
        Self::new(Targets::Everything)
    }

    /// A resolver for a single host
    #[must_use]
    pub fn for_host(host: &str) -> Self {
        Self::new(Targets::Hosts(vec![host.to_owned()]))
    }

    /// A resolver for several hosts at once
    pub fn for_hosts<I, S>(hosts: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let hosts: Vec<String> = hosts.into_iter().map(Into::into).collect();
        if hosts.is_empty() {
            return Err(Error::EmptyQuery);
        }
        Ok(Self::new(Targets::Hosts(hosts)))
    }

    /// The host patterns currently in force
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Applies a single directive
    pub fn apply(&mut self, keyword: &str, arguments: &[String]) {
        if keyword == HOST_KEYWORD {
            // Quoted patterns may still contain commas
            self.patterns = arguments
                .iter()
                .flat_map(|a| a.split(','))
                .filter(|p| !p.is_empty())
                .map(ToOwned::to_owned)
                .collect();
            debug!("host patterns now {:?}", self.patterns);
            return;
        }
        match &self.targets {
            Targets::Everything => {
                for pattern in &self.patterns {
                    self.resolved.record(pattern, keyword, arguments);
                }
            }
            Targets::Hosts(hosts) => {
                for host in hosts {
                    for _ in self.patterns.iter().filter(|p| matches(p, host)) {
                        self.resolved.record(host, keyword, arguments);
                    }
                }
            }
        }
    }

    /// Finishes resolution, returning the collected data
    #[must_use]
    pub fn finalize(self) -> ResolvedConfig {
        self.resolved
    }
}

impl DirectiveSink for Resolver {
    fn ingest(&mut self, directive: Directive) {
        self.apply(&directive.keyword, &directive.arguments);
    }

    fn scope(&self) -> String {
        self.patterns.join(", ")
    }
}

/// Resolves a configuration for a single host, or for everything if `host` is `None`
pub fn resolve(text: &str, host: Option<&str>) -> Result<ResolvedConfig, SyntaxError> {
    let mut resolver = host.map_or_else(Resolver::everything, Resolver::for_host);
    parse(text, &mut resolver)?;
    Ok(resolver.finalize())
}

/// Resolves a configuration for several hosts in a single pass
pub fn resolve_hosts<S: AsRef<str>>(text: &str, hosts: &[S]) -> Result<ResolvedConfig, Error> {
    let mut resolver = Resolver::for_hosts(hosts.iter().map(AsRef::as_ref))?;
    parse(text, &mut resolver)?;
    Ok(resolver.finalize())
}
