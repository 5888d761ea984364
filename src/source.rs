//! Character source: a forward-only cursor over the program text.

/// Cursor over the complete input. The cursor only ever moves forward, one
/// character at a time, and never past the end of the text.
#[derive(Debug, Clone)]
pub struct CharStream<'src> {
  text: &'src str,
  cursor: usize,
}

impl<'src> CharStream<'src> {
  pub fn new(text: &'src str) -> Self {
    Self { text, cursor: 0 }
  }

  /// The character under the cursor, or `None` once the input is exhausted.
  pub fn current(&self) -> Option<char> {
    self.text[self.cursor..].chars().next()
  }

  /// Step over the current character. Does nothing at the end of input.
  pub fn advance(&mut self) {
    if let Some(c) = self.current() {
      self.cursor += c.len_utf8();
    }
  }

  pub fn has_more(&self) -> bool {
    self.cursor < self.text.len()
  }

  /// Byte offset of the cursor.
  pub fn offset(&self) -> usize {
    self.cursor
  }

  /// Text consumed between `start` and the cursor.
  pub fn slice_from(&self, start: usize) -> &'src str {
    &self.text[start..self.cursor]
  }

  pub fn text(&self) -> &'src str {
    self.text
  }
}
