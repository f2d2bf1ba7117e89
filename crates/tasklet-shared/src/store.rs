use thiserror::Error;
use tracing::debug;

use crate::task::{
  Task,
  TaskId
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum AddOutcome {
  Added(TaskId),
  /// The text trimmed to nothing; the
  /// sequence is untouched.
  Blank
}

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum StoreError {
  #[error("task not found: {0}")]
  NotFound(TaskId)
}

/// Ordered, session-lived task sequence.
/// Display order is append order.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct TaskStore {
  tasks: Vec<Task>
}

impl TaskStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(
    &mut self,
    text: impl Into<String>
  ) -> AddOutcome {
    let text = text.into();
    if text.trim().is_empty() {
      debug!("ignoring blank task text");
      return AddOutcome::Blank;
    }

    let task = Task::new(text);
    let id = task.id();
    self.tasks.push(task);
    debug!(%id, len = self.tasks.len(), "added task");
    AddOutcome::Added(id)
  }

  /// Returns the new completion state.
  pub fn toggle_complete(
    &mut self,
    id: TaskId
  ) -> Result<bool, StoreError> {
    let task = self
      .tasks
      .iter_mut()
      .find(|task| task.id() == id)
      .ok_or(StoreError::NotFound(id))?;

    task.completed = !task.completed;
    debug!(%id, completed = task.completed, "toggled task");
    Ok(task.completed)
  }

  pub fn delete(
    &mut self,
    id: TaskId
  ) -> Result<Task, StoreError> {
    let idx = self
      .position(id)
      .ok_or(StoreError::NotFound(id))?;

    let task = self.tasks.remove(idx);
    debug!(%id, len = self.tasks.len(), "deleted task");
    Ok(task)
  }

  pub fn tasks(&self) -> &[Task] {
    &self.tasks
  }

  pub fn get(
    &self,
    id: TaskId
  ) -> Option<&Task> {
    self
      .tasks
      .iter()
      .find(|task| task.id() == id)
  }

  pub fn position(
    &self,
    id: TaskId
  ) -> Option<usize> {
    self
      .tasks
      .iter()
      .position(|task| task.id() == id)
  }

  /// Resolves a zero-based display
  /// position to the id currently there.
  pub fn id_at(
    &self,
    position: usize
  ) -> Option<TaskId> {
    self
      .tasks
      .get(position)
      .map(Task::id)
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  pub fn completed_count(&self) -> usize {
    self
      .tasks
      .iter()
      .filter(|task| task.completed)
      .count()
  }

  pub fn remaining_count(&self) -> usize {
    self.len() - self.completed_count()
  }
}
