use std::fmt;

use uuid::Uuid;

/// Stable identity assigned to a task when
/// it is created. Positions shift on
/// delete; ids never do.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
pub struct TaskId(Uuid);

impl TaskId {
  pub fn new() -> Self {
    Self(Uuid::new_v4())
  }
}

impl Default for TaskId {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    self.0.fmt(f)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
  id:            TaskId,
  text:          String,
  pub completed: bool
}

impl Task {
  /// Text is kept verbatim, including any
  /// surrounding whitespace.
  pub fn new(text: String) -> Self {
    Self {
      id: TaskId::new(),
      text,
      completed: false
    }
  }

  pub fn id(&self) -> TaskId {
    self.id
  }

  pub fn text(&self) -> &str {
    &self.text
  }
}
