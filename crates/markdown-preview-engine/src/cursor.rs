/// A cursor over the lines of a document with one line of lookahead.
///
/// Lines are split the way [`str::lines`] splits them, so `\r\n` endings are
/// stripped and a trailing newline does not produce an extra blank line.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    /// Index of the line `next_line` will return.
    i: usize,
}

impl<'a> LineCursor<'a> {
    /// Creates a cursor positioned before the first line of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            i: 0,
        }
    }

    /// Returns true once every line has been consumed.
    pub fn eof(&self) -> bool {
        self.i >= self.lines.len()
    }

    /// Consumes and returns the next line.
    pub fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.i).copied()?;
        self.i += 1;
        Some(line)
    }

    /// Returns the line after the one most recently consumed, without consuming it.
    ///
    /// `None` at end of input; callers treat that the same as "no continuation".
    pub fn peek_next_line(&self) -> Option<&'a str> {
        self.lines.get(self.i).copied()
    }

    /// 1-based number of the line most recently consumed (0 before the first).
    pub fn line_number(&self) -> usize {
        self.i
    }
}
