//! Character tape with a cursor
// (c) 2025 Ross Younger

/// An immutable sequence of characters with a read cursor.
///
/// Both the directive parser and the glob matcher read their input through a tape.
/// The parser only ever moves the cursor forwards; the matcher may [`seek`](Tape::seek)
/// backwards to restore a backtrack checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    data: Vec<char>,
    cursor: usize,
}

impl Tape {
    /// Creates a tape over the given text, with the cursor at the start
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            data: text.chars().collect(),
            cursor: 0,
        }
    }

    /// The character under the cursor, if any
    #[must_use]
    pub fn current(&self) -> Option<char> {
        self.data.get(self.cursor).copied()
    }

    /// The character at an arbitrary position, if any
    #[must_use]
    pub fn at(&self, position: usize) -> Option<char> {
        self.data.get(position).copied()
    }

    /// Moves the cursor on by one character.
    /// Advancing past the end of the tape is a no-op.
    pub fn advance(&mut self) {
        if self.cursor < self.data.len() {
            self.cursor += 1;
        }
    }

    /// Moves the cursor to an absolute position, clamped to the end of the tape
    pub fn seek(&mut self, position: usize) {
        self.cursor = position.min(self.data.len());
    }

    /// Current cursor position (0-based)
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Are there no characters left under or after the cursor?
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.data.len()
    }

    /// Total number of characters on the tape
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Is the tape empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The characters from the cursor to the end of the tape
    #[must_use]
    pub fn remaining(&self) -> &[char] {
        &self.data[self.cursor..]
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod test {
    use super::Tape;
    use pretty_assertions::assert_eq;

    #[test]
    fn walks_forwards() {
        let mut t = Tape::new("ab");
        assert_eq!(t.len(), 2);
        assert_eq!(t.current(), Some('a'));
        t.advance();
        assert_eq!(t.current(), Some('b'));
        assert_eq!(t.position(), 1);
        t.advance();
        assert!(t.is_exhausted());
        assert_eq!(t.current(), None);
        // no further movement at the end
        t.advance();
        assert_eq!(t.position(), 2);
    }

    #[test]
    fn seek_is_clamped() {
        let mut t = Tape::new("xyz");
        t.seek(2);
        assert_eq!(t.current(), Some('z'));
        assert_eq!(t.remaining(), &['z']);
        t.seek(0);
        assert_eq!(t.current(), Some('x'));
        t.seek(99);
        assert!(t.is_exhausted());
        assert_eq!(t.position(), 3);
    }

    #[test]
    fn multibyte_characters_are_single_cells() {
        let t = Tape::new("h\u{e9}llo");
        assert_eq!(t.len(), 5);
        assert_eq!(t.at(1), Some('\u{e9}'));
        assert!(!t.is_empty());
        assert!(Tape::new("").is_empty());
    }
}
