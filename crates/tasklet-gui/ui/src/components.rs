mod task_input;
mod task_list;
mod task_list_row;
mod theme_toggle;

pub use task_input::TaskInput;
pub use task_list::TaskList;
pub use theme_toggle::ThemeToggle;
use task_list_row::TaskListRow;
