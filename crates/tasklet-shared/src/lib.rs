pub mod input;
pub mod store;
pub mod task;
pub mod theme;

pub use input::InputBuffer;
pub use store::{
  AddOutcome,
  StoreError,
  TaskStore
};
pub use task::{
  Task,
  TaskId
};
pub use theme::{
  Theme,
  ThemeController,
  ThemeSink
};
