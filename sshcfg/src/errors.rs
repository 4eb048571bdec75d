//! Error types
// (c) 2025 Ross Younger

use thiserror::Error;

/// A fatal problem with the structure of a configuration file.
///
/// Every variant carries the host context (the patterns of the `Host` block being parsed,
/// or `*` before the first `Host`) and the 1-based line number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A line terminator arrived while reading a keyword
    #[error("unexpected end-of-line attempting to parse keyword for {host} (line {line})")]
    KeywordEndOfLine {
        /// Host context
        host: String,
        /// Line number
        line: usize,
    },
    /// An argument separator arrived before any keyword characters
    #[error("found argument separator but have no keyword for {host} (line {line})")]
    MissingKeyword {
        /// Host context
        host: String,
        /// Line number
        line: usize,
    },
    /// The line ended with a keyword but no arguments
    #[error("unexpected end-of-line parsing {keyword} for {host} (line {line})")]
    MissingArgument {
        /// The keyword awaiting an argument
        keyword: String,
        /// Host context
        host: String,
        /// Line number
        line: usize,
    },
    /// A quoted argument was not closed before the end of the line
    #[error("unterminated quoted argument parsing {keyword} for {host} (line {line})")]
    UnterminatedQuote {
        /// The keyword whose argument was being read
        keyword: String,
        /// Host context
        host: String,
        /// Line number on which the quote was opened
        line: usize,
    },
    /// The input ended part way through a directive
    #[error("unexpected end of input parsing {keyword} for {host} (line {line})")]
    UnexpectedEndOfInput {
        /// The unfinished keyword
        keyword: String,
        /// Host context
        host: String,
        /// Line number
        line: usize,
    },
}

impl SyntaxError {
    /// The 1-based line number the error refers to
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::KeywordEndOfLine { line, .. }
            | Self::MissingKeyword { line, .. }
            | Self::MissingArgument { line, .. }
            | Self::UnterminatedQuote { line, .. }
            | Self::UnexpectedEndOfInput { line, .. } => *line,
        }
    }

    /// The host context the error occurred in
    #[must_use]
    pub fn host(&self) -> &str {
        match self {
            Self::KeywordEndOfLine { host, .. }
            | Self::MissingKeyword { host, .. }
            | Self::MissingArgument { host, .. }
            | Self::UnterminatedQuote { host, .. }
            | Self::UnexpectedEndOfInput { host, .. } => host,
        }
    }
}

/// Errors returned by the resolution entrypoints
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The configuration could not be parsed
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// No hosts were given to resolve against
    #[error("no hosts were given to resolve")]
    EmptyQuery,
}
