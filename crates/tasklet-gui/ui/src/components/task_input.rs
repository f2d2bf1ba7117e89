use yew::{
  Callback,
  Html,
  KeyboardEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskInputProps {
  pub value:     String,
  pub on_input:  Callback<String>,
  pub on_submit: Callback<()>
}

#[function_component(TaskInput)]
pub fn task_input(
  props: &TaskInputProps
) -> Html {
  let on_input = {
    let on_input = props.on_input.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        on_input.emit(input.value());
      }
    )
  };

  let on_keydown = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: KeyboardEvent| {
        if e.key() == "Enter" {
          e.prevent_default();
          on_submit.emit(());
        }
      }
    )
  };

  let on_click = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |_: yew::MouseEvent| {
        on_submit.emit(());
      }
    )
  };

  html! {
      <div class="task-input">
          <input
              type="text"
              value={props.value.clone()}
              placeholder="Add a new task..."
              oninput={on_input}
              onkeydown={on_keydown}
          />
          <button class="btn add" title="Add task" onclick={on_click}>{ "+" }</button>
      </div>
  }
}
