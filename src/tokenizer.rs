//! Lexical analysis: turns the character stream into classified tokens.
//!
//! The scanner is pull-based. It holds exactly one token, the most recently
//! produced one, and only scans further when asked to advance. Each character
//! class greedily consumes a maximal run, and the first matching class wins.

use std::fmt;

use crate::error::{CompileError, CompileResult, Position};
use crate::source::CharStream;

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  Begin,
  End,
  Loop,
  Break,
  Print,
  Read,
  Else,
  IfPositive,
  IfNegative,
  IfZero,
  Variable,
  Integer,
  Assign,
  Plus,
  Minus,
  Multiply,
  Divide,
  Modulus,
  LeftParen,
  RightParen,
  Whitespace,
  Eof,
}

impl TokenKind {
  /// Look up a reserved word. Keywords win over identifiers.
  pub fn keyword(text: &str) -> Option<Self> {
    let kind = match text {
      "BEGIN" => Self::Begin,
      "END" => Self::End,
      "LOOP" => Self::Loop,
      "BREAK" => Self::Break,
      "PRINT" => Self::Print,
      "READ" => Self::Read,
      "ELSE" => Self::Else,
      "IFP" | "IF+" => Self::IfPositive,
      "IFN" | "IF-" => Self::IfNegative,
      "IFZ" | "IF0" => Self::IfZero,
      _ => return None,
    };
    Some(kind)
  }

  /// Map a single operator character to its kind.
  pub fn operator(c: char) -> Option<Self> {
    let kind = match c {
      '=' => Self::Assign,
      '+' => Self::Plus,
      '-' => Self::Minus,
      '*' => Self::Multiply,
      '/' => Self::Divide,
      '%' => Self::Modulus,
      '(' => Self::LeftParen,
      ')' => Self::RightParen,
      _ => return None,
    };
    Some(kind)
  }

  /// Stable lower-case name, used by the token dump.
  pub fn name(self) -> &'static str {
    match self {
      Self::Begin => "begin",
      Self::End => "end",
      Self::Loop => "loop",
      Self::Break => "break",
      Self::Print => "print",
      Self::Read => "read",
      Self::Else => "else",
      Self::IfPositive => "if-positive",
      Self::IfNegative => "if-negative",
      Self::IfZero => "if-zero",
      Self::Variable => "variable",
      Self::Integer => "integer",
      Self::Assign => "assign",
      Self::Plus => "plus",
      Self::Minus => "minus",
      Self::Multiply => "multiply",
      Self::Divide => "divide",
      Self::Modulus => "modulus",
      Self::LeftParen => "left-paren",
      Self::RightParen => "right-paren",
      Self::Whitespace => "whitespace",
      Self::Eof => "end-of-input",
    }
  }

  pub fn is_additive(self) -> bool {
    matches!(self, Self::Plus | Self::Minus)
  }

  pub fn is_multiplicative(self) -> bool {
    matches!(self, Self::Multiply | Self::Divide | Self::Modulus)
  }

  /// `END` and `ELSE` close a block without being part of it.
  pub fn is_block_end(self) -> bool {
    matches!(self, Self::End | Self::Else)
  }
}

/// Renders the kind the way a user would write it in a program.
impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      Self::Begin => "BEGIN",
      Self::End => "END",
      Self::Loop => "LOOP",
      Self::Break => "BREAK",
      Self::Print => "PRINT",
      Self::Read => "READ",
      Self::Else => "ELSE",
      Self::IfPositive => "IFP",
      Self::IfNegative => "IFN",
      Self::IfZero => "IFZ",
      Self::Variable => "variable",
      Self::Integer => "integer",
      Self::Assign => "=",
      Self::Plus => "+",
      Self::Minus => "-",
      Self::Multiply => "*",
      Self::Divide => "/",
      Self::Modulus => "%",
      Self::LeftParen => "(",
      Self::RightParen => ")",
      Self::Whitespace => "whitespace",
      Self::Eof => "end of input",
    };
    f.write_str(text)
  }
}

/// A classified lexeme borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
  pub kind: TokenKind,
  pub text: &'src str,
  /// Byte offset of the lexeme in the source.
  pub loc: usize,
}

impl<'src> Token<'src> {
  pub fn new(kind: TokenKind, text: &'src str, loc: usize) -> Self {
    Self { kind, text, loc }
  }
}

/// Produces tokens one at a time from a [`CharStream`].
pub struct Scanner<'src> {
  stream: CharStream<'src>,
  current: Token<'src>,
}

impl<'src> Scanner<'src> {
  /// Create a scanner and immediately produce the first token.
  pub fn new(stream: CharStream<'src>) -> CompileResult<Self> {
    let mut scanner = Self {
      stream,
      current: Token::new(TokenKind::Eof, "", 0),
    };
    scanner.advance()?;
    Ok(scanner)
  }

  pub fn current(&self) -> &Token<'src> {
    &self.current
  }

  /// Replace the current token with the next one. Once the input is
  /// exhausted every further call yields another `Eof` token.
  pub fn advance(&mut self) -> CompileResult<()> {
    self.current = self.take_next()?;
    Ok(())
  }

  pub fn source(&self) -> &'src str {
    self.stream.text()
  }

  fn take_next(&mut self) -> CompileResult<Token<'src>> {
    let start = self.stream.offset();
    let Some(c) = self.stream.current() else {
      return Ok(Token::new(TokenKind::Eof, "", start));
    };

    if is_whitespace(c) {
      let text = self.take(is_whitespace);
      return Ok(Token::new(TokenKind::Whitespace, text, start));
    }

    if c.is_ascii_digit() {
      let digits = self.take(|c| c.is_ascii_digit());
      if digits.parse::<i64>().is_err() {
        return Err(CompileError::IntegerOutOfRange {
          digits: digits.to_string(),
          pos: self.position(start),
        });
      }
      return Ok(Token::new(TokenKind::Integer, digits, start));
    }

    if is_ident(c) {
      let ident = self.take(is_ident);
      // Symbolic spelling of the conditionals: IF+, IF-, IF0.
      if ident == "IF" && matches!(self.stream.current(), Some('+' | '-' | '0')) {
        self.stream.advance();
      }
      let text = self.stream.slice_from(start);
      let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Variable);
      return Ok(Token::new(kind, text, start));
    }

    if TokenKind::operator(c).is_some() {
      let text = self.take(|c| TokenKind::operator(c).is_some());
      let mut chars = text.chars();
      return match (chars.next().and_then(TokenKind::operator), chars.next()) {
        (Some(kind), None) => Ok(Token::new(kind, text, start)),
        _ => Err(CompileError::IllegalOperator {
          found: text.to_string(),
          pos: self.position(start),
        }),
      };
    }

    Err(CompileError::IllegalCharacter {
      found: c,
      pos: self.position(start),
    })
  }

  /// Consume the maximal run of characters accepted by `matches`.
  fn take(&mut self, matches: impl Fn(char) -> bool) -> &'src str {
    let start = self.stream.offset();
    while let Some(c) = self.stream.current()
      && matches(c)
    {
      self.stream.advance();
    }
    self.stream.slice_from(start)
  }

  fn position(&self, loc: usize) -> Position {
    Position::locate(self.stream.text(), loc)
  }
}

fn is_whitespace(c: char) -> bool {
  matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Identifiers are letters and underscores only; digits end an identifier.
fn is_ident(c: char) -> bool {
  c.is_ascii_alphabetic() || c == '_'
}

/// Lex the whole input into a vector of tokens terminated by an `Eof` marker.
/// Whitespace tokens are kept.
pub fn tokenize(input: &str) -> CompileResult<Vec<Token<'_>>> {
  let mut scanner = Scanner::new(CharStream::new(input))?;
  let mut tokens = Vec::new();
  loop {
    let token = *scanner.current();
    tokens.push(token);
    if token.kind == TokenKind::Eof {
      return Ok(tokens);
    }
    scanner.advance()?;
  }
}

/// Human-friendly description used in diagnostics.
pub fn describe_token(token: &Token<'_>) -> String {
  match token.kind {
    TokenKind::Eof => TokenKind::Eof.to_string(),
    _ => token.text.to_string(),
  }
}
