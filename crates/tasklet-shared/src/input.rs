use crate::store::{
  AddOutcome,
  TaskStore
};

/// In-progress text for the next task.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct InputBuffer {
  text: String
}

impl InputBuffer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn set(
    &mut self,
    text: impl Into<String>
  ) {
    self.text = text.into();
  }

  pub fn clear(&mut self) {
    self.text.clear();
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn is_blank(&self) -> bool {
    self.text.trim().is_empty()
  }

  /// Adds the buffered text to `store`.
  /// The buffer is only cleared when a
  /// task was actually added.
  pub fn submit(
    &mut self,
    store: &mut TaskStore
  ) -> AddOutcome {
    let outcome =
      store.add(self.text.as_str());
    if let AddOutcome::Added(_) = outcome {
      self.clear();
    }
    outcome
  }
}
