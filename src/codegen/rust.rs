//! Rust host language.
//!
//! Values are `Wrapping<i64>` so that overflow wraps instead of panicking.

use super::{Backend, BinaryOp, Condition};

const PROLOGUE: &str = r#"// Compiler Output

#![allow(unused_mut, unused_variables, unused_assignments, unreachable_code, dead_code)]

use std::collections::BTreeMap;
use std::io::BufRead;
use std::num::Wrapping;

#[derive(Default)]
struct Variables {
    values: BTreeMap<String, Wrapping<i64>>,
}

impl Variables {
    fn get(&self, name: &str) -> Wrapping<i64> {
        self.values.get(name).copied().unwrap_or(Wrapping(0))
    }

    fn set(&mut self, name: &str, value: Wrapping<i64>) {
        self.values.insert(name.to_string(), value);
    }
}

fn read_in() -> Wrapping<i64> {
    let mut line = String::new();
    match std::io::stdin().lock().read_line(&mut line) {
        Ok(_) => Wrapping(line.trim().parse().unwrap_or(0)),
        Err(_) => Wrapping(0),
    }
}

fn main() {
    let mut register = Wrapping(0i64);
    let mut variables = Variables::default();
"#;

const EPILOGUE: &str = "}\n\n// End Compiler Output\n";

pub struct RustBackend;

impl Backend for RustBackend {
  fn prologue(&self) -> &'static str {
    PROLOGUE
  }

  fn epilogue(&self) -> &'static str {
    EPILOGUE
  }

  fn base_depth(&self) -> usize {
    1
  }

  fn evaluate(&self) -> &'static str {
    "register = "
  }

  fn end_evaluate(&self) -> &'static str {
    ";"
  }

  fn store(&self, name: &str) -> String {
    format!("variables.set(\"{name}\", register);")
  }

  fn read(&self, name: &str) -> String {
    format!("variables.set(\"{name}\", read_in());")
  }

  fn print_open(&self) -> &'static str {
    "println!(\"{}\", "
  }

  fn print_close(&self) -> &'static str {
    ");"
  }

  fn if_open(&self, test: Condition) -> String {
    let cmp = match test {
      Condition::Positive => ">",
      Condition::Negative => "<",
      Condition::Zero => "==",
    };
    format!("if register {cmp} Wrapping(0) {{")
  }

  fn else_open(&self) -> &'static str {
    "} else {"
  }

  fn loop_open(&self) -> &'static str {
    "loop {"
  }

  fn close(&self) -> &'static str {
    "}"
  }

  fn break_loop(&self) -> &'static str {
    "break;"
  }

  fn break_program(&self) -> &'static str {
    "return;"
  }

  fn integer(&self, digits: &str) -> String {
    format!("Wrapping({digits}i64)")
  }

  fn variable(&self, name: &str) -> String {
    format!("variables.get(\"{name}\")")
  }

  fn binary(&self, op: BinaryOp) -> &'static str {
    match op {
      BinaryOp::Add => " + ",
      BinaryOp::Sub => " - ",
      BinaryOp::Mul => " * ",
      BinaryOp::Div => " / ",
      BinaryOp::Mod => " % ",
    }
  }

  fn negate(&self) -> &'static str {
    "-"
  }
}
