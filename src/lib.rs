//! Crate root: wires together the translation pipeline.
//!
//! Translation is a single pass with no syntax tree in between:
//! - `source` is a forward-only cursor over the program text.
//! - `tokenizer` turns characters into classified tokens on demand.
//! - `parser` recognizes the grammar and emits output as it goes.
//! - `codegen` holds the host-language text of every emitted fragment.
//! - `sink` is where that text ends up.
//! - `error` centralises reporting utilities shared by the other modules.

pub mod codegen;
pub mod error;
pub mod parser;
pub mod sink;
pub mod source;
pub mod tokenizer;

pub use codegen::{Backend, Target};
pub use error::{CompileError, CompileResult, ErrorKind};
pub use sink::Sink;

use parser::Translator;
use source::CharStream;
use tokenizer::Scanner;

/// Translate a Bitsy program into source code for `target`.
pub fn translate(source: &str, target: Target) -> CompileResult<String> {
  translate_into(source, target.backend(), String::new())
}

/// Translate into an arbitrary sink. Fragments emitted before an error stay
/// in the sink when it is passed by reference.
pub fn translate_into<S: Sink>(source: &str, backend: &dyn Backend, sink: S) -> CompileResult<S> {
  let scanner = Scanner::new(CharStream::new(source))?;
  Translator::new(scanner, backend, sink)?.translate()
}
