use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tasklet_shared::Theme;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Files tasklet keeps in its data directory. Tasks themselves are never
/// written; only the theme preference survives a session.
#[derive(Debug, Clone)]
pub struct DataStore {
    pub data_dir: PathBuf,
    pub theme_path: PathBuf,
}

impl DataStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path, theme_file: &str) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let theme_path = data_dir.join(theme_file);
        if !theme_path.exists() {
            fs::write(&theme_path, "")
                .with_context(|| format!("failed to create {}", theme_path.display()))?;
        }

        info!(
            data_dir = %data_dir.display(),
            theme = %theme_path.display(),
            "opened datastore"
        );

        Ok(Self {
            data_dir,
            theme_path,
        })
    }

    /// Raw stored value, `None` when the file is empty.
    #[tracing::instrument(skip(self))]
    pub fn read_theme(&self) -> anyhow::Result<Option<String>> {
        let raw = fs::read_to_string(&self.theme_path)
            .with_context(|| format!("failed reading {}", self.theme_path.display()))?;
        let trimmed = raw.trim_end();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn write_theme(&self, theme: Theme) -> anyhow::Result<()> {
        debug!(file = %self.theme_path.display(), %theme, "saving theme atomically");

        let dir = self.theme_path.parent().unwrap_or_else(|| Path::new("."));
        let failed = || format!("failed writing {}", self.theme_path.display());
        let mut temp = NamedTempFile::new_in(dir).with_context(failed)?;
        writeln!(temp, "{}", theme.storage_value()).with_context(failed)?;
        temp.flush().with_context(failed)?;

        temp.persist(&self.theme_path).map_err(|err| {
            anyhow!("failed to persist {}: {}", self.theme_path.display(), err)
        })?;

        Ok(())
    }
}
