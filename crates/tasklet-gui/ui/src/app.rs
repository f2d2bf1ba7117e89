use tasklet_shared::{
  AddOutcome,
  InputBuffer,
  TaskId,
  TaskStore,
  ThemeController
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  classes,
  function_component,
  html,
  use_state
};

use crate::components::{
  TaskInput,
  TaskList,
  ThemeToggle
};
use crate::storage::BrowserThemeSink;

#[function_component(App)]
pub fn app() -> Html {
  let theme = use_state(|| {
    ThemeController::initialize(
      BrowserThemeSink
    )
  });
  let tasks = use_state(TaskStore::new);
  let input = use_state(InputBuffer::new);

  let on_toggle_theme = {
    let theme = theme.clone();
    Callback::from(
      move |_: MouseEvent| {
        let mut next = (*theme).clone();
        let applied = next.toggle();
        tracing::info!(
          theme = %applied,
          "toggled theme"
        );
        theme.set(next);
      }
    )
  };

  let on_input = {
    let input = input.clone();
    Callback::from(move |text: String| {
      let mut next = (*input).clone();
      next.set(text);
      input.set(next);
    })
  };

  let on_submit = {
    let tasks = tasks.clone();
    let input = input.clone();
    Callback::from(move |()| {
      let mut next_tasks =
        (*tasks).clone();
      let mut next_input =
        (*input).clone();
      match next_input
        .submit(&mut next_tasks)
      {
        | AddOutcome::Added(id) => {
          tracing::debug!(
            %id,
            "added task"
          );
          tasks.set(next_tasks);
          input.set(next_input);
        }
        | AddOutcome::Blank => {
          tracing::debug!(
            "ignored blank task"
          );
        }
      }
    })
  };

  let on_toggle = {
    let tasks = tasks.clone();
    Callback::from(move |id: TaskId| {
      let mut next = (*tasks).clone();
      match next.toggle_complete(id) {
        | Ok(_) => tasks.set(next),
        | Err(error) => {
          tracing::warn!(
            %error,
            "toggle ignored"
          );
        }
      }
    })
  };

  let on_delete = {
    let tasks = tasks.clone();
    Callback::from(move |id: TaskId| {
      let mut next = (*tasks).clone();
      match next.delete(id) {
        | Ok(_) => tasks.set(next),
        | Err(error) => {
          tracing::warn!(
            %error,
            "delete ignored"
          );
        }
      }
    })
  };

  let dark = theme.is_dark();

  html! {
      <div class={classes!("page", if dark { "page-dark" } else { "page-light" })}>
          <div class="card">
              <ThemeToggle theme={theme.theme()} on_toggle={on_toggle_theme} />
              <h1 class="title">{ "To-Do List" }</h1>
              <TaskInput
                  value={input.text().to_string()}
                  on_input={on_input}
                  on_submit={on_submit}
              />
              <TaskList
                  tasks={tasks.tasks().to_vec()}
                  on_toggle={on_toggle}
                  on_delete={on_delete}
              />
          </div>
      </div>
  }
}
