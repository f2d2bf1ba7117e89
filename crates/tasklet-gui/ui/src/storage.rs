use tasklet_shared::{
  Theme,
  ThemeSink
};
use web_sys::{
  Document,
  Storage
};

pub const THEME_STORAGE_KEY: &str =
  "theme";
pub const ROOT_DARK_CLASS: &str = "dark";
pub const BODY_DARK_CLASSES: [&str; 2] =
  ["bg-gray-900", "text-white"];

/// Theme sink backed by `localStorage`
/// and the class lists of `<html>` and
/// `<body>`.
#[derive(
  Debug, Clone, Copy, Default, PartialEq,
)]
pub struct BrowserThemeSink;

impl ThemeSink for BrowserThemeSink {
  fn load(&self) -> Option<String> {
    local_storage().and_then(|storage| {
      storage
        .get_item(THEME_STORAGE_KEY)
        .ok()
        .flatten()
    })
  }

  fn apply(&mut self, theme: Theme) {
    let Some(document) = document() else {
      tracing::warn!(
        "no document; theme not applied"
      );
      return;
    };
    let dark = theme.is_dark();

    if let Some(root) =
      document.document_element()
      && let Err(error) = root
        .class_list()
        .toggle_with_force(
          ROOT_DARK_CLASS,
          dark
        )
    {
      tracing::error!(
        ?error,
        "failed updating root classes"
      );
    }

    if let Some(body) = document.body() {
      let classes = body.class_list();
      for class in BODY_DARK_CLASSES {
        if let Err(error) = classes
          .toggle_with_force(class, dark)
        {
          tracing::error!(
            ?error,
            class,
            "failed updating body classes"
          );
        }
      }
    }
  }

  fn persist(&mut self, theme: Theme) {
    let Some(storage) = local_storage()
    else {
      tracing::warn!(
        "local storage unavailable; \
         theme not saved"
      );
      return;
    };

    if let Err(error) = storage.set_item(
      THEME_STORAGE_KEY,
      theme.storage_value()
    ) {
      tracing::error!(
        ?error,
        %theme,
        "failed saving theme to local \
         storage"
      );
    }
  }
}

fn document() -> Option<Document> {
  web_sys::window()
    .and_then(|window| window.document())
}

fn local_storage() -> Option<Storage> {
  web_sys::window().and_then(|window| {
    window
      .local_storage()
      .ok()
      .flatten()
  })
}
