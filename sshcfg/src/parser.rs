//! Configuration file tokenizer
// (c) 2025 Ross Younger
//!
//! A character-at-a-time state machine which turns the text of a configuration file
//! into a stream of [`Directive`]s, one per logical line.
//!
//! * Keywords and arguments are separated by spaces, tabs or commas.
//! * `#` at the start of a line, or where an argument would start, begins a comment.
//! * Arguments may be double-quoted to include separators. Within quotes, `\"`, `\'` and `\\`
//!   escape the following character; any other backslash is kept as it is.
//! * Blank lines are ignored.
//!
//! Directives are handed to a [`DirectiveSink`] as soon as they are complete.
//! The parser does not keep them.

use tracing::trace;

use crate::errors::SyntaxError;
use crate::tape::Tape;

/// One parsed configuration line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// The first word on the line
    pub keyword: String,
    /// The remaining words on the line, in order
    pub arguments: Vec<String>,
    /// The line number (1-based) on which the directive started
    pub line: usize,
}

impl Directive {
    /// Constructor
    #[must_use]
    pub fn new<K, I, A>(keyword: K, arguments: I, line: usize) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            keyword: keyword.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
            line,
        }
    }
}

/// Receives directives from the [`Parser`]
pub trait DirectiveSink {
    /// Accepts one directive
    fn ingest(&mut self, directive: Directive);

    /// Describes the host context currently in force, for error messages
    fn scope(&self) -> String {
        "*".into()
    }
}

impl<T: DirectiveSink + ?Sized> DirectiveSink for &mut T {
    fn ingest(&mut self, directive: Directive) {
        (**self).ingest(directive);
    }
    fn scope(&self) -> String {
        (**self).scope()
    }
}

/// Collects directives without interpreting them
impl DirectiveSink for Vec<Directive> {
    fn ingest(&mut self, directive: Directive) {
        self.push(directive);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ReadLine,
    Comment,
    Keyword,
    LineWhitespace,
    Argument,
    EnclosedArgument,
    EscapeInQuote,
    EndOfEntry,
}

const fn is_entry_end(c: char) -> bool {
    matches!(c, '\r' | '\n')
}

const fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | ',')
}

const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// The tokenizer state machine.
///
/// Each state handler looks at the character under the cursor. A handler either consumes it
/// or changes state and leaves it for the next state to look at again.
#[derive(Debug)]
pub struct Parser<S: DirectiveSink> {
    tape: Tape,
    state: State,
    sink: S,
    /// Current line number (1-based)
    line: usize,
    /// Line on which the pending directive started
    entry_line: usize,
    keyword: Option<String>,
    argument: Option<String>,
    arguments: Vec<String>,
    /// Have we consumed the opening quote of the current enclosed argument?
    quote_open: bool,
    /// Line on which the current quote was opened
    quote_line: usize,
}

impl<S: DirectiveSink> Parser<S> {
    /// Creates a parser over the given text which reports to `sink`
    #[must_use]
    pub fn new(text: &str, sink: S) -> Self {
        Self {
            tape: Tape::new(text),
            state: State::ReadLine,
            sink,
            line: 1,
            entry_line: 1,
            keyword: None,
            argument: None,
            arguments: Vec::new(),
            quote_open: false,
            quote_line: 1,
        }
    }

    /// Runs the machine to the end of the input.
    ///
    /// Stops at the first error; directives already emitted stay with the sink.
    pub fn run(mut self) -> Result<S, SyntaxError> {
        while let Some(c) = self.tape.current() {
            match self.state {
                State::ReadLine => self.read_line(c),
                State::Comment => self.comment(c),
                State::Keyword => self.keyword(c)?,
                State::LineWhitespace => self.line_whitespace(c),
                State::Argument => self.argument(c),
                State::EnclosedArgument => self.enclosed_argument(c)?,
                State::EscapeInQuote => self.escape_in_quote(c),
                State::EndOfEntry => self.end_of_entry(c)?,
            }
        }
        self.finish()?;
        Ok(self.sink)
    }

    fn read_line(&mut self, c: char) {
        if is_blank(c) {
            if c == '\n' {
                self.line += 1;
            }
            self.tape.advance();
        } else if c == '#' {
            self.state = State::Comment;
        } else {
            self.keyword = Some(String::new());
            self.entry_line = self.line;
            self.state = State::Keyword;
        }
    }

    fn comment(&mut self, c: char) {
        if is_entry_end(c) {
            self.state = State::EndOfEntry;
        } else {
            self.tape.advance();
        }
    }

    fn keyword(&mut self, c: char) -> Result<(), SyntaxError> {
        if is_entry_end(c) {
            return Err(SyntaxError::KeywordEndOfLine {
                host: self.sink.scope(),
                line: self.line,
            });
        }
        let keyword = self.keyword.get_or_insert_with(String::new);
        if is_separator(c) {
            if keyword.is_empty() {
                return Err(SyntaxError::MissingKeyword {
                    host: self.sink.scope(),
                    line: self.line,
                });
            }
            self.state = State::LineWhitespace;
        } else {
            keyword.push(c);
            self.tape.advance();
        }
        Ok(())
    }

    fn line_whitespace(&mut self, c: char) {
        if is_separator(c) {
            self.tape.advance();
        } else if c == '#' {
            self.state = State::Comment;
        } else if is_entry_end(c) {
            self.state = State::EndOfEntry;
        } else {
            self.state = State::Argument;
        }
    }

    fn argument(&mut self, c: char) {
        if is_entry_end(c) {
            self.state = State::EndOfEntry;
        } else if is_separator(c) {
            if let Some(arg) = self.argument.take() {
                self.arguments.push(arg);
            }
            self.state = State::LineWhitespace;
        } else if c == '"' {
            // An empty pair of quotes still makes an argument
            let _ = self.argument.get_or_insert_with(String::new);
            self.quote_open = false;
            self.quote_line = self.line;
            self.state = State::EnclosedArgument;
        } else {
            self.argument.get_or_insert_with(String::new).push(c);
            self.tape.advance();
        }
    }

    fn enclosed_argument(&mut self, c: char) -> Result<(), SyntaxError> {
        match c {
            '"' if !self.quote_open => {
                self.quote_open = true;
                self.tape.advance();
            }
            '"' => {
                self.quote_open = false;
                self.tape.advance();
                self.state = State::Argument;
            }
            '\\' => {
                self.tape.advance();
                self.state = State::EscapeInQuote;
            }
            c if is_entry_end(c) => return Err(self.unterminated_quote()),
            c => {
                self.argument.get_or_insert_with(String::new).push(c);
                self.tape.advance();
            }
        }
        Ok(())
    }

    fn escape_in_quote(&mut self, c: char) {
        let arg = self.argument.get_or_insert_with(String::new);
        if !matches!(c, '"' | '\'' | '\\') {
            arg.push('\\');
        }
        arg.push(c);
        if c == '\n' {
            self.line += 1;
        }
        self.tape.advance();
        self.state = State::EnclosedArgument;
    }

    fn end_of_entry(&mut self, c: char) -> Result<(), SyntaxError> {
        let Some(keyword) = self.keyword.take() else {
            // Nothing pending (a comment line). ReadLine will consume the terminator.
            self.state = State::ReadLine;
            return Ok(());
        };
        if let Some(arg) = self.argument.take() {
            self.arguments.push(arg);
        }
        if self.arguments.is_empty() {
            return Err(SyntaxError::MissingArgument {
                keyword,
                host: self.sink.scope(),
                line: self.line,
            });
        }
        let directive = Directive {
            keyword,
            arguments: std::mem::take(&mut self.arguments),
            line: self.entry_line,
        };
        trace!(
            "line {}: {} {:?}",
            directive.line, directive.keyword, directive.arguments
        );
        self.sink.ingest(directive);

        if c == '\n' {
            self.line += 1;
        }
        self.tape.advance();
        self.state = State::ReadLine;
        Ok(())
    }

    /// Checks the machine stopped somewhere sensible
    fn finish(&mut self) -> Result<(), SyntaxError> {
        if matches!(self.state, State::EnclosedArgument | State::EscapeInQuote) {
            return Err(self.unterminated_quote());
        }
        if let Some(keyword) = self.keyword.take() {
            return Err(SyntaxError::UnexpectedEndOfInput {
                keyword,
                host: self.sink.scope(),
                line: self.line,
            });
        }
        Ok(())
    }

    fn unterminated_quote(&self) -> SyntaxError {
        SyntaxError::UnterminatedQuote {
            keyword: self.keyword.clone().unwrap_or_default(),
            host: self.sink.scope(),
            line: self.quote_line,
        }
    }
}

/// Parses `text`, passing each directive to `sink` in file order
pub fn parse<S: DirectiveSink>(text: &str, sink: &mut S) -> Result<(), SyntaxError> {
    let _ = Parser::new(text, sink).run()?;
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod test {
    use super::{Directive, parse};
    use crate::errors::SyntaxError;
    use assertables::assert_matches;
    use pretty_assertions::assert_eq;

    fn directives(text: &str) -> Vec<Directive> {
        let mut sink = Vec::new();
        parse(text, &mut sink).unwrap();
        sink
    }

    fn error(text: &str) -> SyntaxError {
        let mut sink = Vec::new();
        parse(text, &mut sink).unwrap_err()
    }

    #[test]
    fn host_block() {
        assert_eq!(
            directives("Host foo\n  User bob\n"),
            vec![
                Directive::new("Host", ["foo"], 1),
                Directive::new("User", ["bob"], 2),
            ]
        );
    }

    #[test]
    fn comments_and_blank_lines() {
        let text = "# leading comment\n\n   # indented comment\n\t\nPort 22 # trailing\n";
        assert_eq!(directives(text), vec![Directive::new("Port", ["22"], 5)]);
    }

    #[test]
    fn separators() {
        assert_eq!(
            directives("Host a,b  c\t,d\n"),
            vec![Directive::new("Host", ["a", "b", "c", "d"], 1)]
        );
        assert_eq!(
            directives("Keyword,value\n"),
            vec![Directive::new("Keyword", ["value"], 1)]
        );
    }

    #[test]
    fn hash_inside_a_word_is_literal() {
        assert_eq!(
            directives("Foo bar#baz\n"),
            vec![Directive::new("Foo", ["bar#baz"], 1)]
        );
    }

    #[test]
    fn quoted_arguments_keep_whitespace() {
        assert_eq!(
            directives("ProxyCommand \"ssh -W %h:%p jump\"\n"),
            vec![Directive::new("ProxyCommand", ["ssh -W %h:%p jump"], 1)]
        );
        assert_eq!(
            directives("Foo \"a, b\" c\n"),
            vec![Directive::new("Foo", ["a, b", "c"], 1)]
        );
    }

    #[test]
    fn quotes_join_adjacent_text() {
        assert_eq!(
            directives("Foo pre\"a b\"post next\n"),
            vec![Directive::new("Foo", ["prea bpost", "next"], 1)]
        );
    }

    #[test]
    fn empty_quotes_are_an_argument() {
        assert_eq!(directives("Foo \"\"\n"), vec![Directive::new("Foo", [""], 1)]);
    }

    #[test]
    fn escapes_in_quotes() {
        assert_eq!(
            directives(r#"Foo "say \"hi\" \\ \x"
"#),
            vec![Directive::new("Foo", [r#"say "hi" \ \x"#], 1)]
        );
    }

    #[test]
    fn crlf_counts_each_line_once() {
        let text = "Host a\r\nUser b\r\n\r\n# note\r\nPort 1\r\n";
        assert_eq!(
            directives(text),
            vec![
                Directive::new("Host", ["a"], 1),
                Directive::new("User", ["b"], 2),
                Directive::new("Port", ["1"], 5),
            ]
        );
    }

    #[test]
    fn escaped_newline_in_quotes_is_counted() {
        let text = "Foo \"a\\\nb\"\nBar 1\n";
        assert_eq!(
            directives(text),
            vec![
                Directive::new("Foo", ["a\\\nb"], 1),
                Directive::new("Bar", ["1"], 3),
            ]
        );
    }

    #[test]
    fn trailing_comment_without_newline_is_fine() {
        assert_eq!(
            directives("Port 22\n# the end"),
            vec![Directive::new("Port", ["22"], 1)]
        );
        assert!(directives("").is_empty());
        assert!(directives("\n\n  \n").is_empty());
    }

    #[test]
    fn keyword_at_end_of_line() {
        let e = error("Host foo\nUser\n");
        assert_eq!(
            e,
            SyntaxError::KeywordEndOfLine {
                host: "*".into(),
                line: 2
            }
        );
    }

    #[test]
    fn keyword_without_arguments() {
        let e = error("Port 22\n\nCompression \n");
        assert_eq!(
            e,
            SyntaxError::MissingArgument {
                keyword: "Compression".into(),
                host: "*".into(),
                line: 3
            }
        );
        let e = error("Compression # no value\n");
        assert_matches!(e, SyntaxError::MissingArgument { line: 1, .. });
    }

    #[test]
    fn separator_before_keyword() {
        assert_matches!(error(",foo bar\n"), SyntaxError::MissingKeyword { line: 1, .. });
        assert_matches!(error("\n\n  , x\n"), SyntaxError::MissingKeyword { line: 3, .. });
    }

    #[test]
    fn unterminated_quotes() {
        assert_matches!(
            error("A 1\nFoo \"abc\nBar 2\n"),
            SyntaxError::UnterminatedQuote { line: 2, .. }
        );
        let e = error("Foo \"abc");
        assert_eq!(
            e,
            SyntaxError::UnterminatedQuote {
                keyword: "Foo".into(),
                host: "*".into(),
                line: 1
            }
        );
        assert_matches!(error("Foo \"abc\\"), SyntaxError::UnterminatedQuote { .. });
    }

    #[test]
    fn end_of_input_mid_directive() {
        assert_eq!(
            error("Host a\nPort 22"),
            SyntaxError::UnexpectedEndOfInput {
                keyword: "Port".into(),
                host: "*".into(),
                line: 2
            }
        );
        assert_matches!(
            error("Port"),
            SyntaxError::UnexpectedEndOfInput { line: 1, .. }
        );
        assert_matches!(
            error("Port 22 # comment"),
            SyntaxError::UnexpectedEndOfInput { .. }
        );
    }

    #[test]
    fn errors_abort_but_keep_earlier_directives() {
        let mut sink = Vec::new();
        let _ = parse("A 1\nB\nC 3\n", &mut sink).unwrap_err();
        assert_eq!(sink, vec![Directive::new("A", ["1"], 1)]);
    }

    #[test]
    fn parsing_is_repeatable() {
        let text = "Host x\nIdentityFile a\nIdentityFile b\n";
        assert_eq!(directives(text), directives(text));
    }
}
