//! Emission sinks: append-only destinations for generated text.

/// Somewhere to put generated code. The translator only ever appends and
/// never reads back what it wrote.
pub trait Sink {
  fn append(&mut self, text: &str);
}

/// Collects the whole program as one string.
impl Sink for String {
  fn append(&mut self, text: &str) {
    self.push_str(text);
  }
}

/// Keeps each fragment separately, in emission order.
impl Sink for Vec<String> {
  fn append(&mut self, text: &str) {
    self.push(text.to_string());
  }
}

impl<S: Sink + ?Sized> Sink for &mut S {
  fn append(&mut self, text: &str) {
    (**self).append(text);
  }
}
