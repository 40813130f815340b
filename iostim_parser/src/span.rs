//! Source locations
//!
//! Expressions are usually a single line, but loop bodies can spread over
//! several, so spans keep a line number as well as byte offsets.

/// Byte range in the source plus the position of its first byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset start (0-indexed)
    pub start: usize,
    /// Byte offset end (exclusive)
    pub end: usize,
    /// Line of `start` (1-indexed)
    pub line: usize,
    /// Column of `start` (1-indexed, in bytes)
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Byte offset to line/column lookup
#[derive(Debug, Clone)]
pub struct SourceMap {
    /// Offset of the first byte of every line
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: &str) -> Self {
        let newlines = memchr::memchr_iter(b'\n', source.as_bytes()).map(|i| i + 1);
        Self {
            line_starts: std::iter::once(0).chain(newlines).collect(),
        }
    }

    /// 1-indexed `(line, column)` of a byte offset
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        // Index of the last line starting at or before `offset`
        let index = self.line_starts.partition_point(|&start| start <= offset) - 1;
        (index + 1, offset - self.line_starts[index] + 1)
    }

    pub fn span(&self, start: usize, end: usize) -> Span {
        let (line, column) = self.line_col(start);
        Span::new(start, end, line, column)
    }
}
