//! Code generation templates.
//!
//! The translator decides *when* a fragment is emitted; a [`Backend`] decides
//! *what* the fragment says in the host language. Statement fragments are
//! returned without indentation or line breaks, the translator lays them out.

mod rust;
mod swift;

use clap::ValueEnum;

use crate::tokenizer::TokenKind;

pub use rust::RustBackend;
pub use swift::SwiftBackend;

/// Host languages the translator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Target {
  #[default]
  Rust,
  Swift,
}

impl Target {
  pub fn backend(self) -> &'static dyn Backend {
    match self {
      Self::Rust => &RustBackend,
      Self::Swift => &SwiftBackend,
    }
  }
}

/// The runtime test performed by one of the three conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
  Positive,
  Negative,
  Zero,
}

impl Condition {
  pub fn from_kind(kind: TokenKind) -> Option<Self> {
    match kind {
      TokenKind::IfPositive => Some(Self::Positive),
      TokenKind::IfNegative => Some(Self::Negative),
      TokenKind::IfZero => Some(Self::Zero),
      _ => None,
    }
  }
}

/// Binary operators recognised by the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Mod,
}

impl BinaryOp {
  pub fn from_kind(kind: TokenKind) -> Option<Self> {
    match kind {
      TokenKind::Plus => Some(Self::Add),
      TokenKind::Minus => Some(Self::Sub),
      TokenKind::Multiply => Some(Self::Mul),
      TokenKind::Divide => Some(Self::Div),
      TokenKind::Modulus => Some(Self::Mod),
      _ => None,
    }
  }
}

/// Fragment templates for one host language.
///
/// Every generated program keeps its variables in a name-keyed map that
/// defaults to zero, plus a scratch `register` that receives the value of the
/// expression under evaluation. Both live in the prologue.
pub trait Backend {
  /// Runtime support emitted once, right after `BEGIN`.
  fn prologue(&self) -> &'static str;

  /// Emitted once, right after the closing `END`.
  fn epilogue(&self) -> &'static str;

  /// Nesting depth of top-level statements.
  fn base_depth(&self) -> usize;

  /// Opens `register = <expression>`.
  fn evaluate(&self) -> &'static str;

  /// Closes `register = <expression>`.
  fn end_evaluate(&self) -> &'static str;

  /// Copies the register into a variable.
  fn store(&self, name: &str) -> String;

  /// Reads one integer from standard input into a variable.
  fn read(&self, name: &str) -> String;

  fn print_open(&self) -> &'static str;

  fn print_close(&self) -> &'static str;

  /// Opens the branch taken when the register passes `test`.
  fn if_open(&self, test: Condition) -> String;

  fn else_open(&self) -> &'static str;

  fn loop_open(&self) -> &'static str;

  /// Closes an if, else or loop body.
  fn close(&self) -> &'static str;

  /// Leaves the innermost loop.
  fn break_loop(&self) -> &'static str;

  /// A `BREAK` outside of any loop: stops the program.
  fn break_program(&self) -> &'static str;

  fn integer(&self, digits: &str) -> String;

  fn variable(&self, name: &str) -> String;

  fn binary(&self, op: BinaryOp) -> &'static str;

  fn negate(&self) -> &'static str;

  fn open_group(&self) -> &'static str {
    "("
  }

  fn close_group(&self) -> &'static str {
    ")"
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn conditions_come_from_the_conditional_keywords_only() {
    assert_eq!(Condition::from_kind(TokenKind::IfZero), Some(Condition::Zero));
    assert_eq!(Condition::from_kind(TokenKind::Loop), None);
  }

  #[test]
  fn operators_map_from_token_kinds() {
    assert_eq!(BinaryOp::from_kind(TokenKind::Modulus), Some(BinaryOp::Mod));
    assert_eq!(BinaryOp::from_kind(TokenKind::Assign), None);
  }

  #[test]
  fn targets_pick_distinct_prologues() {
    let rust = Target::Rust.backend().prologue();
    let swift = Target::Swift.backend().prologue();
    assert!(rust.contains("fn main()"));
    assert!(swift.contains("struct Variables"));
    assert_eq!(Target::default(), Target::Rust);
  }
}
