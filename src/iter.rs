use smallvec::SmallVec;
use std::fmt;

/// Per-request sequence storage. Compound routes rarely exceed four
/// dimensions (host, method, path, header), so the containers stay on the
/// stack in the common case.
pub(crate) type SeqVec = SmallVec<[String; 4]>;
pub(crate) type SepVec = SmallVec<[u8; 4]>;

/// Saved cursor state, restored when a trie branch fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CharPos {
    i: usize,
    si: usize,
}

/// Byte-by-byte cursor over a sequence of request-derived strings. Every
/// string carries the separator trie matching uses in its dimension, e.g.
/// `["a.host", "/path"]` pairs with `['.', '/']`.
pub(crate) struct CharIter {
    /// Byte offset in the current string.
    i: usize,
    /// Index of the current string.
    si: usize,
    seq: SeqVec,
    sep: SepVec,
}

impl CharIter {
    pub(crate) fn new(seq: SeqVec, sep: SepVec) -> CharIter {
        CharIter {
            i: 0,
            si: 0,
            seq,
            sep,
        }
    }

    /// Dimension the cursor is currently in.
    pub(crate) fn level(&self) -> usize {
        self.si
    }

    pub(crate) fn is_end(&self) -> bool {
        if self.seq.is_empty() {
            return true;
        }
        (self.si >= self.seq.len() - 1 && self.i >= self.seq[self.si].len())
            || self.seq[self.si].is_empty()
    }

    pub(crate) fn position(&self) -> CharPos {
        CharPos {
            i: self.i,
            si: self.si,
        }
    }

    pub(crate) fn set_position(&mut self, p: CharPos) {
        self.i = p.i;
        self.si = p.si;
    }

    /// Steps back over the last consumed byte, reversing a dimension
    /// crossing if `next` performed one. No-op at the very start.
    pub(crate) fn push_back(&mut self) {
        if self.i == 0 && self.si == 0 {
            return;
        }
        if self.i == 0 {
            self.si -= 1;
            self.i = self.seq[self.si].len().saturating_sub(1);
            return;
        }
        self.i -= 1;
    }

    /// Returns the byte at the cursor and the separator of its dimension,
    /// then advances, crossing into the next string once the current one is
    /// exhausted. `None` only when the cursor is already at the end.
    pub(crate) fn next(&mut self) -> Option<(u8, u8)> {
        if self.is_end() {
            return None;
        }
        let b = self.seq[self.si].as_bytes()[self.i];
        let sep = self.sep[self.si];
        self.i += 1;
        if self.i >= self.seq[self.si].len() && self.si < self.seq.len() - 1 {
            self.si += 1;
            self.i = 0;
        }
        Some((b, sep))
    }
}

impl fmt::Display for CharIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end() {
            write!(f, "<end>")
        } else {
            write!(f, "<{}:{}>", self.i, self.seq[self.si])
        }
    }
}
