//! Swift host language, the target of the first bitsy compilers.

use super::{Backend, BinaryOp, Condition};

const PROLOGUE: &str = r#"// Compiler Output

import Foundation

struct Variables {
    private var values: [String: Int] = [:]

    subscript(name: String) -> Int {
        get { return values[name] ?? 0 }
        set { values[name] = newValue }
    }
}

func readIn() -> Int {
    guard let line = readLine(), let value = Int(line.trimmingCharacters(in: .whitespaces)) else {
        return 0
    }
    return value
}

var register: Int = 0
var variables = Variables()

"#;

const EPILOGUE: &str = "\n// End Compiler Output\n";

pub struct SwiftBackend;

impl Backend for SwiftBackend {
  fn prologue(&self) -> &'static str {
    PROLOGUE
  }

  fn epilogue(&self) -> &'static str {
    EPILOGUE
  }

  fn base_depth(&self) -> usize {
    0
  }

  fn evaluate(&self) -> &'static str {
    "register = "
  }

  fn end_evaluate(&self) -> &'static str {
    ""
  }

  fn store(&self, name: &str) -> String {
    format!("variables[\"{name}\"] = register")
  }

  fn read(&self, name: &str) -> String {
    format!("variables[\"{name}\"] = readIn()")
  }

  fn print_open(&self) -> &'static str {
    "print("
  }

  fn print_close(&self) -> &'static str {
    ")"
  }

  fn if_open(&self, test: Condition) -> String {
    let cmp = match test {
      Condition::Positive => ">",
      Condition::Negative => "<",
      Condition::Zero => "==",
    };
    format!("if register {cmp} 0 {{")
  }

  fn else_open(&self) -> &'static str {
    "} else {"
  }

  fn loop_open(&self) -> &'static str {
    "while true {"
  }

  fn close(&self) -> &'static str {
    "}"
  }

  fn break_loop(&self) -> &'static str {
    "break"
  }

  fn break_program(&self) -> &'static str {
    "exit(0)"
  }

  fn integer(&self, digits: &str) -> String {
    digits.to_string()
  }

  fn variable(&self, name: &str) -> String {
    format!("variables[\"{name}\"]")
  }

  // Only `+ - *` have wrapping forms; `/`, `%` and negation trap on overflow.
  fn binary(&self, op: BinaryOp) -> &'static str {
    match op {
      BinaryOp::Add => " &+ ",
      BinaryOp::Sub => " &- ",
      BinaryOp::Mul => " &* ",
      BinaryOp::Div => " / ",
      BinaryOp::Mod => " % ",
    }
  }

  fn negate(&self) -> &'static str {
    "-"
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn additive_and_multiplicative_operators_wrap() {
    let backend = SwiftBackend;
    assert_eq!(backend.binary(BinaryOp::Add), " &+ ");
    assert_eq!(backend.binary(BinaryOp::Sub), " &- ");
    assert_eq!(backend.binary(BinaryOp::Mul), " &* ");
  }

  #[test]
  fn division_remainder_and_negation_use_trapping_forms() {
    let backend = SwiftBackend;
    assert_eq!(backend.binary(BinaryOp::Div), " / ");
    assert_eq!(backend.binary(BinaryOp::Mod), " % ");
    assert_eq!(backend.negate(), "-");
  }
}
