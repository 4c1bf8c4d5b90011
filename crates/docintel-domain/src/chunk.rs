//! Chunk module - overlapping slices of a document's text

/// A contiguous slice of a document's extracted text
///
/// Offsets are measured in characters (Unicode scalar values), not bytes.
/// Consecutive chunks share `overlap` leading characters with their
/// predecessor; the remainder is the chunk's unique span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position in the chunk sequence, starting at 0
    pub index: usize,

    /// Chunk text, including the leading overlap
    pub text: String,

    /// Character offset of the first character in the source text
    pub start: usize,

    /// Character offset one past the last character in the source text
    pub end: usize,

    /// Number of leading characters shared with the previous chunk
    pub overlap: usize,
}

impl Chunk {
    /// Length of the chunk in characters
    pub fn char_len(&self) -> usize {
        self.end - self.start
    }

    /// The part of the chunk not repeated from the previous chunk
    ///
    /// # Examples
    ///
    /// ```
    /// use docintel_domain::Chunk;
    ///
    /// let chunk = Chunk {
    ///     index: 1,
    ///     text: "lo world".to_string(),
    ///     start: 3,
    ///     end: 11,
    ///     overlap: 2,
    /// };
    /// assert_eq!(chunk.unique_text(), " world");
    /// ```
    pub fn unique_text(&self) -> &str {
        match self.text.char_indices().nth(self.overlap) {
            Some((byte_idx, _)) => &self.text[byte_idx..],
            None => "",
        }
    }
}
