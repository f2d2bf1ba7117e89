use std::fmt;

use tracing::debug;

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
)]
pub enum Theme {
  #[default]
  Light,
  Dark
}

impl Theme {
  pub const DARK_VALUE: &'static str = "dark";
  pub const LIGHT_VALUE: &'static str = "light";

  /// Only the exact string `"dark"`
  /// selects the dark theme.
  pub fn from_stored(
    value: Option<&str>
  ) -> Self {
    match value {
      | Some(Self::DARK_VALUE) => {
        Self::Dark
      }
      | _ => Self::Light
    }
  }

  pub fn is_dark(self) -> bool {
    self == Self::Dark
  }

  pub fn toggled(self) -> Self {
    match self {
      | Self::Light => Self::Dark,
      | Self::Dark => Self::Light
    }
  }

  pub fn storage_value(
    self
  ) -> &'static str {
    match self {
      | Self::Light => Self::LIGHT_VALUE,
      | Self::Dark => Self::DARK_VALUE
    }
  }

  /// Glyph for the control that switches
  /// away from this theme.
  pub fn toggle_icon(self) -> &'static str {
    match self {
      | Self::Light => "\u{263E}",
      | Self::Dark => "\u{2600}"
    }
  }
}

impl fmt::Display for Theme {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.storage_value())
  }
}

/// Where a theme is shown and remembered.
///
/// Implementations are best-effort: a
/// failed read behaves like an empty slot
/// and a failed write is logged, never
/// surfaced.
pub trait ThemeSink {
  fn load(&self) -> Option<String>;

  fn apply(&mut self, theme: Theme);

  fn persist(&mut self, theme: Theme);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeController<S> {
  theme: Theme,
  sink:  S
}

impl<S: ThemeSink> ThemeController<S> {
  /// Reads the stored slot once, then
  /// applies and writes back the result so
  /// an empty slot becomes `"light"`.
  pub fn initialize(mut sink: S) -> Self {
    let stored = sink.load();
    let theme =
      Theme::from_stored(stored.as_deref());
    debug!(?stored, %theme, "initialized theme");

    sink.apply(theme);
    sink.persist(theme);
    Self { theme, sink }
  }

  pub fn toggle(&mut self) -> Theme {
    let next = self.theme.toggled();
    self.set(next);
    next
  }

  pub fn set(&mut self, theme: Theme) {
    debug!(from = %self.theme, to = %theme, "setting theme");
    self.theme = theme;
    self.sink.apply(theme);
    self.sink.persist(theme);
  }

  pub fn theme(&self) -> Theme {
    self.theme
  }

  pub fn is_dark(&self) -> bool {
    self.theme.is_dark()
  }

  pub fn sink(&self) -> &S {
    &self.sink
  }

  pub fn into_sink(self) -> S {
    self.sink
  }
}

#[cfg(test)]
mod tests {
  use super::{
    Theme,
    ThemeController,
    ThemeSink
  };

  #[derive(Debug, Default)]
  struct RecordingSink {
    stored:  Option<String>,
    applied: Vec<Theme>
  }

  impl ThemeSink for RecordingSink {
    fn load(&self) -> Option<String> {
      self.stored.clone()
    }

    fn apply(&mut self, theme: Theme) {
      self.applied.push(theme);
    }

    fn persist(&mut self, theme: Theme) {
      self.stored = Some(
        theme.storage_value().to_string()
      );
    }
  }

  fn stored(value: &str) -> RecordingSink {
    RecordingSink {
      stored:  Some(value.to_string()),
      applied: vec![]
    }
  }

  #[test]
  fn only_exact_dark_is_dark() {
    assert_eq!(
      Theme::from_stored(Some("dark")),
      Theme::Dark
    );
    for other in
      ["light", "Dark", "DARK", " dark", ""]
    {
      assert_eq!(
        Theme::from_stored(Some(other)),
        Theme::Light,
        "{other:?}"
      );
    }
    assert_eq!(
      Theme::from_stored(None),
      Theme::Light
    );
  }

  #[test]
  fn unset_storage_starts_light_then_toggles_dark()
   {
    let mut controller =
      ThemeController::initialize(
        RecordingSink::default()
      );
    assert!(!controller.is_dark());
    assert_eq!(
      controller.sink().stored.as_deref(),
      Some("light")
    );

    assert_eq!(
      controller.toggle(),
      Theme::Dark
    );
    assert!(controller.is_dark());
    assert_eq!(
      controller.sink().stored.as_deref(),
      Some("dark")
    );
    assert_eq!(
      controller.sink().applied,
      vec![Theme::Light, Theme::Dark]
    );
  }

  #[test]
  fn double_toggle_restores_flag_and_storage()
   {
    let mut controller =
      ThemeController::initialize(stored(
        "dark"
      ));
    controller.toggle();
    controller.toggle();

    assert!(controller.is_dark());
    assert_eq!(
      controller.sink().stored.as_deref(),
      Some("dark")
    );
  }

  #[test]
  fn toggled_dark_survives_reinitialize() {
    let mut controller =
      ThemeController::initialize(
        RecordingSink::default()
      );
    controller.toggle();

    let reloaded =
      ThemeController::initialize(
        controller.into_sink()
      );
    assert_eq!(reloaded.theme(), Theme::Dark);
  }

  #[test]
  fn garbage_value_is_rewritten_as_light()
  {
    let controller =
      ThemeController::initialize(stored(
        "midnight"
      ));

    assert_eq!(controller.theme(), Theme::Light);
    assert_eq!(
      controller.sink().stored.as_deref(),
      Some("light")
    );
  }
}
