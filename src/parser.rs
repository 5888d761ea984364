//! Recursive-descent translator.
//!
//! There is no syntax tree: every production emits its host-language
//! fragment the moment it is recognized, so the order of the output mirrors
//! the order of the parse. Grammar:
//!
//! ```text
//! program        := BEGIN block END
//! block          := { statement }            // stops at END or ELSE
//! statement      := ifStatement | loopStatement | breakStatement
//!                 | printStatement | readStatement | assignment
//! ifStatement    := (IFP | IFN | IFZ) expression block [ ELSE block ] END
//! loopStatement  := LOOP block END
//! breakStatement := BREAK
//! printStatement := PRINT expression
//! readStatement  := READ variable
//! assignment     := variable ASSIGN expression
//! expression     := term { (PLUS | MINUS) term }
//! term           := signedFactor { (MUL | DIV | MOD) factor }
//! signedFactor   := [ PLUS | MINUS ] factor
//! factor         := INTEGER | VARIABLE | LEFT_PAREN expression RIGHT_PAREN
//! ```

use std::fmt;

use crate::codegen::{Backend, BinaryOp, Condition};
use crate::error::{CompileError, CompileResult, Position};
use crate::sink::Sink;
use crate::tokenizer::{Scanner, Token, TokenKind, describe_token};

const INDENT: &str = "    ";

/// What a production was looking for when it hit the wrong token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
  Token(TokenKind),
  /// Anything that can start a factor.
  Factor,
}

impl fmt::Display for Expected {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Token(kind) => write!(f, "{kind}"),
      Self::Factor => f.write_str("integer, variable or ("),
    }
  }
}

/// Parses a token stream and writes the translation into a [`Sink`].
pub struct Translator<'src, 'b, S: Sink> {
  scanner: Scanner<'src>,
  backend: &'b dyn Backend,
  sink: S,
  depth: usize,
}

impl<'src, 'b, S: Sink> Translator<'src, 'b, S> {
  /// Wrap a scanner; a leading whitespace token is skipped so the cursor
  /// starts on the first meaningful token.
  pub fn new(scanner: Scanner<'src>, backend: &'b dyn Backend, sink: S) -> CompileResult<Self> {
    let mut translator = Self {
      scanner,
      backend,
      sink,
      depth: backend.base_depth(),
    };
    if translator.current().kind == TokenKind::Whitespace {
      translator.advance()?;
    }
    Ok(translator)
  }

  /// Translate the whole program and hand back the sink.
  ///
  /// On error, whatever was appended before the offending token stays in
  /// the sink.
  pub fn translate(mut self) -> CompileResult<S> {
    self.program()?;
    Ok(self.sink)
  }

  fn current(&self) -> Token<'src> {
    *self.scanner.current()
  }

  /// Move to the next token that is not whitespace.
  fn advance(&mut self) -> CompileResult<()> {
    self.scanner.advance()?;
    while self.current().kind == TokenKind::Whitespace {
      self.scanner.advance()?;
    }
    Ok(())
  }

  /// Consume a token of the given kind and return its text.
  fn expect(&mut self, kind: TokenKind) -> CompileResult<&'src str> {
    let token = self.current();
    if token.kind != kind {
      return Err(self.unexpected(Expected::Token(kind), &token));
    }
    self.advance()?;
    Ok(token.text)
  }

  fn unexpected(&self, expected: Expected, token: &Token<'_>) -> CompileError {
    CompileError::UnexpectedToken {
      expected,
      found: describe_token(token),
      pos: Position::locate(self.scanner.source(), token.loc),
    }
  }

  fn emit(&mut self, text: &str) {
    self.sink.append(text);
  }

  fn start_line(&mut self) {
    for _ in 0..self.depth {
      self.sink.append(INDENT);
    }
  }

  fn end_line(&mut self) {
    self.sink.append("\n");
  }

  fn line(&mut self, code: &str) {
    self.start_line();
    self.emit(code);
    self.end_line();
  }

  /// Run `body` one indentation level deeper.
  fn nested(
    &mut self,
    body: impl FnOnce(&mut Self) -> CompileResult<()>,
  ) -> CompileResult<()> {
    self.depth += 1;
    let result = body(self);
    self.depth -= 1;
    result
  }

  fn program(&mut self) -> CompileResult<()> {
    let backend = self.backend;
    self.expect(TokenKind::Begin)?;
    self.emit(backend.prologue());

    self.block(false)?;

    self.expect(TokenKind::End)?;
    self.emit(backend.epilogue());

    self.expect(TokenKind::Eof)?;
    Ok(())
  }

  /// Statements up to, but not including, `END` or `ELSE`. `in_loop` only
  /// decides how a `BREAK` is emitted.
  fn block(&mut self, in_loop: bool) -> CompileResult<()> {
    while !self.current().kind.is_block_end() {
      self.statement(in_loop)?;
    }
    Ok(())
  }

  fn statement(&mut self, in_loop: bool) -> CompileResult<()> {
    let kind = self.current().kind;
    if let Some(test) = Condition::from_kind(kind) {
      return self.if_statement(test, in_loop);
    }
    match kind {
      TokenKind::Loop => self.loop_statement(),
      TokenKind::Break => self.break_statement(in_loop),
      TokenKind::Print => self.print_statement(),
      TokenKind::Read => self.read_statement(),
      _ => self.assignment(),
    }
  }

  /// Called with the cursor on the `IFP`, `IFN` or `IFZ` that selected `test`.
  fn if_statement(&mut self, test: Condition, in_loop: bool) -> CompileResult<()> {
    let backend = self.backend;
    self.advance()?;

    self.start_line();
    self.emit(backend.evaluate());
    self.expression()?;
    self.emit(backend.end_evaluate());
    self.end_line();

    self.line(&backend.if_open(test));
    self.nested(|t| t.block(in_loop))?;

    if self.current().kind == TokenKind::Else {
      self.expect(TokenKind::Else)?;
      self.line(backend.else_open());
      self.nested(|t| t.block(in_loop))?;
    }

    self.expect(TokenKind::End)?;
    self.line(backend.close());
    Ok(())
  }

  fn loop_statement(&mut self) -> CompileResult<()> {
    let backend = self.backend;
    self.expect(TokenKind::Loop)?;
    self.line(backend.loop_open());
    self.nested(|t| t.block(true))?;
    self.expect(TokenKind::End)?;
    self.line(backend.close());
    Ok(())
  }

  fn break_statement(&mut self, in_loop: bool) -> CompileResult<()> {
    let backend = self.backend;
    self.expect(TokenKind::Break)?;
    if in_loop {
      self.line(backend.break_loop());
    } else {
      self.line(backend.break_program());
    }
    Ok(())
  }

  fn print_statement(&mut self) -> CompileResult<()> {
    let backend = self.backend;
    self.expect(TokenKind::Print)?;
    self.start_line();
    self.emit(backend.print_open());
    self.expression()?;
    self.emit(backend.print_close());
    self.end_line();
    Ok(())
  }

  fn read_statement(&mut self) -> CompileResult<()> {
    let backend = self.backend;
    self.expect(TokenKind::Read)?;
    let name = self.expect(TokenKind::Variable)?;
    self.line(&backend.read(name));
    Ok(())
  }

  fn assignment(&mut self) -> CompileResult<()> {
    let backend = self.backend;
    let name = self.expect(TokenKind::Variable)?;
    self.expect(TokenKind::Assign)?;

    self.start_line();
    self.emit(backend.evaluate());
    self.expression()?;
    self.emit(backend.end_evaluate());
    self.end_line();

    self.line(&backend.store(name));
    Ok(())
  }

  fn expression(&mut self) -> CompileResult<()> {
    self.term()?;
    while let Some(op) = self.binary_op(TokenKind::is_additive) {
      self.operator(op)?;
      self.term()?;
    }
    Ok(())
  }

  // Only the first operand of a term may carry a sign.
  fn term(&mut self) -> CompileResult<()> {
    self.signed_factor()?;
    while let Some(op) = self.binary_op(TokenKind::is_multiplicative) {
      self.operator(op)?;
      self.factor()?;
    }
    Ok(())
  }

  fn signed_factor(&mut self) -> CompileResult<()> {
    let kind = self.current().kind;
    if kind.is_additive() {
      self.expect(kind)?;
      if kind == TokenKind::Minus {
        let negate = self.backend.negate();
        self.emit(negate);
      }
    }
    self.factor()
  }

  fn factor(&mut self) -> CompileResult<()> {
    let backend = self.backend;
    let token = self.current();
    match token.kind {
      TokenKind::Integer => {
        let digits = self.expect(TokenKind::Integer)?;
        self.emit(&backend.integer(digits));
      }
      TokenKind::Variable => {
        let name = self.expect(TokenKind::Variable)?;
        self.emit(&backend.variable(name));
      }
      TokenKind::LeftParen => {
        self.expect(TokenKind::LeftParen)?;
        self.emit(backend.open_group());
        self.expression()?;
        self.expect(TokenKind::RightParen)?;
        self.emit(backend.close_group());
      }
      _ => return Err(self.unexpected(Expected::Factor, &token)),
    }
    Ok(())
  }

  /// The operator under the cursor, if its kind passes `accepts`.
  fn binary_op(&self, accepts: fn(TokenKind) -> bool) -> Option<BinaryOp> {
    let kind = self.current().kind;
    if accepts(kind) {
      BinaryOp::from_kind(kind)
    } else {
      None
    }
  }

  /// Step over the operator under the cursor and emit `op`.
  fn operator(&mut self, op: BinaryOp) -> CompileResult<()> {
    self.advance()?;
    let text = self.backend.binary(op);
    self.emit(text);
    Ok(())
  }
}
