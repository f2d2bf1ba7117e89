use tasklet_shared::{Theme, ThemeSink};
use tracing::{debug, error};

use crate::datastore::DataStore;
use crate::render::Palette;

/// Applies a theme by switching the terminal palette and remembers it in
/// the data directory.
#[derive(Debug, Clone)]
pub struct TerminalThemeSink {
    store: DataStore,
    palette: Palette,
}

impl TerminalThemeSink {
    pub fn new(store: DataStore) -> Self {
        Self {
            store,
            palette: Palette::LIGHT,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl ThemeSink for TerminalThemeSink {
    fn load(&self) -> Option<String> {
        match self.store.read_theme() {
            Ok(value) => value,
            Err(err) => {
                error!(error = %format!("{err:#}"), "failed reading stored theme");
                None
            }
        }
    }

    fn apply(&mut self, theme: Theme) {
        debug!(%theme, "applying terminal palette");
        self.palette = Palette::for_theme(theme);
    }

    fn persist(&mut self, theme: Theme) {
        if let Err(err) = self.store.write_theme(theme) {
            error!(error = %format!("{err:#}"), %theme, "failed saving theme");
        }
    }
}
