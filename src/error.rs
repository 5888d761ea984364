//! Shared error utilities used across the translation pipeline.
//!
//! Diagnostics stay lightweight: every error raised by the scanner or the
//! translator carries a [`Position`] that prints the offending source line
//! with a caret under the byte that stopped translation.

use std::fmt;
use std::io;

use snafu::Snafu;

use crate::parser::Expected;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CompileError {
  #[snafu(display("{pos}: illegal character '{found}'{}", pos.excerpt()))]
  IllegalCharacter { found: char, pos: Position },

  #[snafu(display("{pos}: illegal operator \"{found}\"{}", pos.excerpt()))]
  IllegalOperator { found: String, pos: Position },

  #[snafu(display(
    "{pos}: integer literal {digits} does not fit in 64 bits{}",
    pos.excerpt()
  ))]
  IntegerOutOfRange { digits: String, pos: Position },

  #[snafu(display(
    "{pos}: expecting {expected} but received \"{found}\"{}",
    pos.excerpt()
  ))]
  UnexpectedToken {
    expected: Expected,
    found: String,
    pos: Position,
  },

  #[snafu(display("could not read {path}: {source}"))]
  ReadInput { path: String, source: io::Error },

  #[snafu(display("could not write {path}: {source}"))]
  WriteOutput { path: String, source: io::Error },
}

/// Coarse classification of a [`CompileError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Raised by the scanner.
  Lexical,
  /// Raised by the translator when a production sees the wrong token.
  Grammar,
  /// Raised by the driver while reading source or writing output.
  Io,
}

impl CompileError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::IllegalCharacter { .. }
      | Self::IllegalOperator { .. }
      | Self::IntegerOutOfRange { .. } => ErrorKind::Lexical,
      Self::UnexpectedToken { .. } => ErrorKind::Grammar,
      Self::ReadInput { .. } | Self::WriteOutput { .. } => ErrorKind::Io,
    }
  }

  /// Where in the source the error was raised, if it came from the source.
  pub fn position(&self) -> Option<&Position> {
    match self {
      Self::IllegalCharacter { pos, .. }
      | Self::IllegalOperator { pos, .. }
      | Self::IntegerOutOfRange { pos, .. }
      | Self::UnexpectedToken { pos, .. } => Some(pos),
      Self::ReadInput { .. } | Self::WriteOutput { .. } => None,
    }
  }
}

/// A 1-based line/column pair together with the text needed to point at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
  pub line: usize,
  pub column: usize,
  line_text: String,
  marker: String,
}

impl Position {
  /// Resolve a byte offset in `src` into a printable position.
  pub fn locate(src: &str, loc: usize) -> Self {
    let safe_loc = loc.min(src.len());
    let line_start = src[..safe_loc].rfind('\n').map_or(0, |i| i + 1);
    let line_end = src[safe_loc..]
      .find('\n')
      .map_or(src.len(), |i| safe_loc + i);
    let line_text = src[line_start..line_end].trim_end_matches('\r').to_string();
    let line = src[..line_start].matches('\n').count() + 1;
    let column = src[line_start..safe_loc].chars().count() + 1;
    let marker = format!("{}^", " ".repeat(column - 1));
    Self {
      line,
      column,
      line_text,
      marker,
    }
  }

  /// The offending line followed by a caret line, prefixed by a newline.
  pub fn excerpt(&self) -> String {
    format!("\n{}\n{}", self.line_text, self.marker)
  }
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.line, self.column)
  }
}
