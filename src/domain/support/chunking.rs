//! Fixed-width chunking policy for progressive delivery.
//!
//! Canned and default replies are split into slices of at most `width`
//! characters (Unicode scalar values, not bytes, so emoji never split) and
//! sent one after another to give the client a live-typing feel. Joining
//! every slice reproduces the input exactly.

use std::num::NonZeroUsize;

/// Slice width in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkWidth(NonZeroUsize);

impl ChunkWidth {
    /// Creates a width. Returns `None` for zero.
    pub const fn new(chars: usize) -> Option<Self> {
        match NonZeroUsize::new(chars) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Creates a width for a constant; a zero width fails at compile time.
    pub const fn of(chars: usize) -> Self {
        match NonZeroUsize::new(chars) {
            Some(n) => Self(n),
            None => panic!("chunk width must be non-zero"),
        }
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

/// Lazy, restartable iterator over the slices of a text.
///
/// Cloning the iterator (or calling [`chunk_text`] again) restarts from the
/// beginning.
#[derive(Debug, Clone)]
pub struct TextChunks<'a> {
    rest: &'a str,
    width: usize,
}

impl<'a> TextChunks<'a> {
    pub fn new(text: &'a str, width: ChunkWidth) -> Self {
        Self {
            rest: text,
            width: width.get(),
        }
    }
}

impl<'a> Iterator for TextChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let split_at = self
            .rest
            .char_indices()
            .nth(self.width)
            .map(|(idx, _)| idx)
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(split_at);
        self.rest = tail;
        Some(head)
    }
}

/// Splits `text` into slices of at most `width` characters.
pub fn chunk_text(text: &str, width: ChunkWidth) -> TextChunks<'_> {
    TextChunks::new(text, width)
}
