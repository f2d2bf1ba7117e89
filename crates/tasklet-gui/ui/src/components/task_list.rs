use tasklet_shared::{
  Task,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub tasks:     Vec<Task>,
  pub on_toggle: Callback<TaskId>,
  pub on_delete: Callback<TaskId>
}

/// Rows are keyed by task id so the enter
/// transition only plays for new rows.
#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  html! {
      <ul class="task-list">
          {
              for props.tasks.iter().cloned().map(|task| {
                  let key = task.id().to_string();
                  html! {
                      <TaskListRow
                          key={key}
                          task={task}
                          on_toggle={props.on_toggle.clone()}
                          on_delete={props.on_delete.clone()}
                      />
                  }
              })
          }
      </ul>
  }
}
