//! Host pattern matching
// (c) 2025 Ross Younger
//!
//! Patterns use the usual wildcards:
//! * `*` matches any run of characters, including none
//! * `?` matches exactly one character
//!
//! Every other character matches only itself. Matching is case-sensitive.
//!
//! The matcher walks the pattern and the candidate in lock-step. When it meets a `*` it
//! records a checkpoint; a later mismatch rewinds to the most recent checkpoint with the star
//! having swallowed one more candidate character. Only one checkpoint is ever live.

use crate::tape::Tape;

/// Outcome of a single matching step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Keep going
    Continue,
    /// The candidate is exhausted and the rest of the pattern is all `*`
    Matched,
    /// No possible match
    Failed,
}

/// Where to resume after a mismatch following a `*`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Checkpoint {
    /// Pattern position just past the `*`
    pattern: usize,
    /// Candidate position the `*` has consumed up to
    candidate: usize,
}

#[derive(Debug)]
struct MatchState {
    pattern: Tape,
    candidate: Tape,
    /// `None` until the first `*` is seen
    checkpoint: Option<Checkpoint>,
}

impl MatchState {
    fn new(pattern: &str, candidate: &str) -> Self {
        Self {
            pattern: Tape::new(pattern),
            candidate: Tape::new(candidate),
            checkpoint: None,
        }
    }

    fn step(&mut self) -> Step {
        if self.candidate.is_exhausted() {
            // Anything left in the pattern had better be glob-only.
            return if self.pattern.remaining().iter().all(|&c| c == '*') {
                Step::Matched
            } else {
                Step::Failed
            };
        }
        let Some(wanted) = self.pattern.current() else {
            // Pattern ran out with candidate data left over
            return self.backtrack();
        };
        match wanted {
            '*' => {
                self.pattern.advance();
                self.checkpoint = Some(Checkpoint {
                    pattern: self.pattern.position(),
                    candidate: self.candidate.position(),
                });
                Step::Continue
            }
            '?' => {
                self.pattern.advance();
                self.candidate.advance();
                Step::Continue
            }
            c if self.candidate.current() == Some(c) => {
                self.pattern.advance();
                self.candidate.advance();
                Step::Continue
            }
            _ => self.backtrack(),
        }
    }

    fn backtrack(&mut self) -> Step {
        let Some(checkpoint) = self.checkpoint.as_mut() else {
            return Step::Failed;
        };
        checkpoint.candidate += 1;
        self.pattern.seek(checkpoint.pattern);
        self.candidate.seek(checkpoint.candidate);
        Step::Continue
    }
}

/// Does `candidate` match the glob `pattern`?
///
/// ```
/// use sshcfg::glob::matches;
/// assert!(matches("*.example.com", "www.example.com"));
/// assert!(matches("web?", "web1"));
/// assert!(!matches("web?", "web10"));
/// ```
#[must_use]
pub fn matches(pattern: &str, candidate: &str) -> bool {
    let mut state = MatchState::new(pattern, candidate);
    loop {
        match state.step() {
            Step::Continue => (),
            Step::Matched => return true,
            Step::Failed => return false,
        }
    }
}

/// Does `candidate` match any of the given patterns?
#[must_use]
pub fn matches_any<S: AsRef<str>>(patterns: &[S], candidate: &str) -> bool {
    patterns.iter().any(|p| matches(p.as_ref(), candidate))
}
