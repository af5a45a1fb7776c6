//! Logical line splitting.
//!
//! A logical line is one or more physical lines joined by backslash-escaped
//! newlines. The continuation markers are kept verbatim in the returned text;
//! removing them is up to the expression layer.

/// Finds the end of the logical line starting at `start`.
///
/// Returns the byte offset of the terminating newline (or `buf.len()` if the
/// buffer ends first) and the number of `\n` characters consumed, including
/// the terminating one.
///
/// Backslashes toggle an "escaped" flag so that `\\\\` cancels out. Only
/// characters other than `\n` and `\r` clear the flag, which keeps `\\\r\n`
/// a continuation and lets an escaped newline carry over into a following
/// empty line.
pub fn find_end_of_line(buf: &str, start: usize) -> (usize, usize) {
    let bytes = buf.as_bytes();
    let mut newlines = 0;
    let mut prev_backslash = false;

    for (e, &c) in bytes.iter().enumerate().skip(start) {
        match c {
            b'\\' => prev_backslash = !prev_backslash,
            b'\n' => {
                newlines += 1;
                if !prev_backslash {
                    return (e, newlines);
                }
            }
            b'\r' => {}
            _ => prev_backslash = false,
        }
    }

    (bytes.len(), newlines)
}

/// One logical line of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalLine<'a> {
    /// The line text, without its terminating newline.
    pub text: &'a str,
    /// Byte offset of the line start in the buffer.
    pub offset: usize,
    /// Number of `\n` characters consumed, including the terminator.
    pub newlines: usize,
}

/// Iterator over the logical lines of a buffer.
///
/// Yields exactly one more line than there are unescaped newlines, so a
/// buffer ending in `\n` produces a trailing empty line and an empty buffer
/// produces a single empty line.
#[derive(Debug, Clone)]
pub struct LogicalLines<'a> {
    buf: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> LogicalLines<'a> {
    /// Creates an iterator over the logical lines of `buf`.
    pub fn new(buf: &'a str) -> Self {
        Self {
            buf,
            pos: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for LogicalLines<'a> {
    type Item = LogicalLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let (end, newlines) = find_end_of_line(self.buf, self.pos);
        let line = LogicalLine {
            text: &self.buf[self.pos..end],
            offset: self.pos,
            newlines,
        };

        if end == self.buf.len() {
            self.done = true;
        } else {
            self.pos = end + 1;
        }
        Some(line)
    }
}
