//! Overlapping text chunking
//!
//! Greedy recursive splitting: each chunk ends at the latest paragraph
//! boundary that fits, falling back to a sentence boundary, then a word
//! boundary, then a hard cut. The next chunk starts exactly `overlap`
//! characters before the previous end, so removing each chunk's leading
//! overlap reconstructs the text.
//!
//! All sizes and offsets count characters, not bytes.

use docintel_domain::Chunk;

/// Maximum chunk length in characters
pub const CHUNK_SIZE: usize = 1000;

/// Characters shared between adjacent chunks
pub const CHUNK_OVERLAP: usize = 200;

/// Splits text into overlapping chunks
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    chunk_size: usize,
    overlap: usize,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(CHUNK_SIZE, CHUNK_OVERLAP)
    }
}

/// Kinds of break, in order of preference
#[derive(Debug, Clone, Copy)]
enum Boundary {
    Paragraph,
    Sentence,
    Word,
}

impl Boundary {
    /// Whether a chunk may end at `pos` (i.e. between `chars[pos - 1]` and `chars[pos]`)
    fn allows(self, chars: &[char], pos: usize) -> bool {
        let prev = chars[pos - 1];
        match self {
            Boundary::Paragraph => prev == '\n' && pos >= 2 && chars[pos - 2] == '\n',
            Boundary::Sentence => {
                prev == '\n'
                    || (prev.is_whitespace() && pos >= 2 && matches!(chars[pos - 2], '.' | '!' | '?'))
            }
            Boundary::Word => prev.is_whitespace(),
        }
    }
}

impl TextChunker {
    /// Create a chunker with custom limits
    ///
    /// The overlap is clamped below the chunk size so every chunk advances.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            overlap: overlap.min(chunk_size - 1),
        }
    }

    /// Maximum chunk length in characters
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Overlap between adjacent chunks in characters
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Chunk the given text
    ///
    /// # Examples
    ///
    /// ```
    /// use docintel_pipeline::TextChunker;
    ///
    /// let chunker = TextChunker::default();
    /// assert!(chunker.chunk("").is_empty());
    ///
    /// let chunks = chunker.chunk("A short note.");
    /// assert_eq!(chunks.len(), 1);
    /// assert_eq!(chunks[0].text, "A short note.");
    /// ```
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let chars: Vec<char> = text.chars().collect();
        let total = chars.len();
        if total == 0 {
            return Vec::new();
        }

        // Byte offset of every char position, plus the end of the text
        let byte_at: Vec<usize> = text
            .char_indices()
            .map(|(b, _)| b)
            .chain(std::iter::once(text.len()))
            .collect();

        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let overlap = if chunks.is_empty() { 0 } else { self.overlap };

            let end = if total - start <= self.chunk_size {
                total
            } else {
                self.find_break(&chars, start)
            };

            chunks.push(Chunk {
                index: chunks.len(),
                text: text[byte_at[start]..byte_at[end]].to_string(),
                start,
                end,
                overlap,
            });

            if end == total {
                break;
            }
            start = end - self.overlap;
        }

        chunks
    }

    /// Latest preferred break in `(start + overlap, start + chunk_size]`
    fn find_break(&self, chars: &[char], start: usize) -> usize {
        let hard_end = start + self.chunk_size;
        let lowest = start + self.overlap + 1;

        for boundary in [Boundary::Paragraph, Boundary::Sentence, Boundary::Word] {
            if let Some(pos) = (lowest..=hard_end).rev().find(|&p| boundary.allows(chars, p)) {
                return pos;
            }
        }
        hard_end
    }
}
