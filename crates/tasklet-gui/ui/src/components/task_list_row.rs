use tasklet_shared::{
  Task,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub task:      Task,
  pub on_toggle: Callback<TaskId>,
  pub on_delete: Callback<TaskId>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let id = props.task.id();
  let completed = props.task.completed;
  let on_toggle =
    props.on_toggle.clone();
  let on_delete =
    props.on_delete.clone();

  html! {
      <li class="row task-enter">
          <span class={classes!("task-text", completed.then_some("done"))}>
              { props.task.text() }
          </span>
          <div class="row-actions">
              <button
                  class={classes!("btn", if completed { "muted" } else { "ok" })}
                  title="Toggle complete"
                  onclick={move |_| on_toggle.emit(id)}
              >
                  { "\u{2713}" }
              </button>
              <button
                  class="btn danger"
                  title="Delete task"
                  onclick={move |_| on_delete.emit(id)}
              >
                  { "\u{1F5D1}" }
              </button>
          </div>
      </li>
  }
}
