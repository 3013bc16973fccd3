use std::ops::Range;

/// A balanced-brace scanner over the contents of one JSON array.
///
/// The scanner walks the buffer byte by byte and reports the byte range of
/// every top-level `{ ... }` it sees close. Braces inside string literals are
/// ignored, and an escaped quote does not end a string. All delimiters are
/// ASCII, so walking bytes never splits a UTF-8 sequence.
///
/// State is kept between calls: appending to the buffer and calling
/// [`Scanner::advance`] again continues exactly where the last call stopped.
#[derive(Debug, Clone)]
pub struct Scanner {
    offset: usize,
    depth: usize,
    in_string: bool,
    escaped: bool,
    object_start: Option<usize>,
    closed: bool,
}

impl Scanner {
    /// Creates a scanner that starts at byte `start`, just past the array's `[`.
    pub fn new(start: usize) -> Self {
        Self {
            offset: start,
            depth: 0,
            in_string: false,
            escaped: false,
            object_start: None,
            closed: false,
        }
    }

    /// Scans everything appended since the previous call and returns the
    /// ranges of the objects completed in that span, in order.
    pub fn advance(&mut self, buffer: &str) -> Vec<Range<usize>> {
        let mut completed = Vec::new();
        if self.closed {
            return completed;
        }

        let bytes = buffer.as_bytes();
        while self.offset < bytes.len() {
            let index = self.offset;
            self.offset += 1;
            let byte = bytes[index];

            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if byte == b'\\' {
                    self.escaped = true;
                } else if byte == b'"' {
                    self.in_string = false;
                }
                continue;
            }

            match byte {
                b'"' => self.in_string = true,
                b'{' => {
                    if self.depth == 0 {
                        self.object_start = Some(index);
                    }
                    self.depth += 1;
                }
                b'}' if self.depth > 0 => {
                    self.depth -= 1;
                    if self.depth == 0 {
                        if let Some(start) = self.object_start.take() {
                            completed.push(start..index + 1);
                        }
                    }
                }
                b']' if self.depth == 0 => {
                    self.closed = true;
                    break;
                }
                _ => {}
            }
        }
        completed
    }

    /// Whether the array's closing bracket has been seen.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether the scanner is partway through an object.
    pub fn in_object(&self) -> bool {
        self.depth > 0
    }
}
