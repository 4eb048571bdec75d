//! Output rendering
// (c) 2025 Ross Younger

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::LazyLock;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tabled::{
    Table, Tabled,
    settings::{Theme, style::Style},
};

use crate::resolver::{HOST_KEYWORD, ResolvedConfig};

/// How to print resolved configuration
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    clap::ValueEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Configuration file syntax, one `Host` block per host
    #[default]
    Text,
    /// A table of host, keyword and arguments
    Table,
    /// A JSON object mapping host to keyword to arguments
    Json,
}

static TABLE_STYLE: LazyLock<Theme> = LazyLock::new(|| {
    if cfg!(windows) {
        Style::psql().into()
    } else {
        Style::sharp().into()
    }
});

/// Data type used when rendering the table
#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Keyword")]
    keyword: String,
    #[tabled(rename = "Arguments")]
    arguments: String,
}

/// Renders resolved configuration. Hosts and keywords are output in sorted order.
pub fn render(config: &ResolvedConfig, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(config, crate::cli::styles::host()),
        OutputFormat::Table => render_table(config),
        OutputFormat::Json => render_json(config)?,
    })
}

/// Quotes an argument if it would not otherwise read back as a single word.
///
/// A line break is written as an escaped line break. The parser keeps the backslash of such
/// an escape, so a backslash already preceding a line break is written once, not doubled.
fn quote(arg: &str) -> Cow<'_, str> {
    let needs_quotes = arg.is_empty()
        || arg.chars().any(|c| {
            matches!(
                c,
                ' ' | '\t' | ',' | '"' | '\\' | '#' | '\'' | '\n' | '\r'
            )
        });
    if !needs_quotes {
        return arg.into();
    }
    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    let mut chars = arg.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if matches!(chars.peek(), Some('\n' | '\r')) => {
                out.push(c);
                if let Some(line_break) = chars.next() {
                    out.push(line_break);
                }
            }
            '"' | '\\' | '\n' | '\r' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out.into()
}

fn joined(args: &[String]) -> String {
    args.iter().map(|a| quote(a)).collect::<Vec<_>>().join(" ")
}

fn render_text(config: &ResolvedConfig, host_style: anstyle::Style) -> String {
    let mut out = String::new();
    for (i, (host, keywords)) in config.sorted().into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(
            out,
            "{host_style}{HOST_KEYWORD} {}{host_style:#}",
            quote(host)
        );
        for (keyword, args) in keywords {
            let _ = writeln!(out, "    {keyword} {}", joined(args));
        }
    }
    out
}

fn render_table(config: &ResolvedConfig) -> String {
    let rows = config.sorted().into_iter().flat_map(|(host, keywords)| {
        keywords.into_iter().map(move |(keyword, args)| Row {
            host: host.to_owned(),
            keyword: keyword.to_owned(),
            arguments: joined(args),
        })
    });
    let mut table = Table::new(rows);
    let _ = table.with(TABLE_STYLE.clone());
    format!("{table}\n")
}

fn render_json(config: &ResolvedConfig) -> Result<String> {
    let ordered: BTreeMap<&str, BTreeMap<&str, &[String]>> = config
        .sorted()
        .into_iter()
        .map(|(host, keywords)| (host, keywords.into_iter().collect()))
        .collect();
    let mut s = serde_json::to_string_pretty(&ordered)?;
    s.push('\n');
    Ok(s)
}
