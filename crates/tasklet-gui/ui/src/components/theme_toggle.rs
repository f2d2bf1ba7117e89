use tasklet_shared::Theme;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ThemeToggleProps {
  pub theme:     Theme,
  pub on_toggle: Callback<MouseEvent>
}

#[function_component(ThemeToggle)]
pub fn theme_toggle(
  props: &ThemeToggleProps
) -> Html {
  let (title, icon_class) =
    if props.theme.is_dark() {
      ("Switch to light theme", "icon sun")
    } else {
      ("Switch to dark theme", "icon moon")
    };

  html! {
      <button
          class="theme-toggle"
          title={title}
          onclick={props.on_toggle.clone()}
      >
          <span class={icon_class}>{ props.theme.toggle_icon() }</span>
      </button>
  }
}
