use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use tracing::{
  debug,
  info,
  trace
};

pub const DEFAULT_THEME_FILE: &str =
  "theme.data";

#[derive(Debug, Clone)]
pub struct Config {
  map:              HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    let mut map = HashMap::new();
    map.insert(
      "data.location".to_string(),
      "~/.tasklet".to_string()
    );
    map.insert(
      "color".to_string(),
      "on".to_string()
    );
    map.insert(
      "theme.file".to_string(),
      DEFAULT_THEME_FILE.to_string()
    );

    Self {
      map,
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    let rc = resolve_rc_path(rc_override)?;
    if let Some(path) = rc {
      info!(taskletrc = %path.display(), "loading taskletrc");
      cfg.load_file(&path)?;
    } else {
      debug!(
        "no taskletrc found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  /// `None` for a missing key, an error
  /// for a value that is not a boolean.
  pub fn get_bool(
    &self,
    key: &str
  ) -> anyhow::Result<Option<bool>> {
    self
      .map
      .get(key)
      .map(|v| {
        parse_bool(v).ok_or_else(|| {
          anyhow!(
            "invalid {key} setting: {v}"
          )
        })
      })
      .transpose()
  }

  pub fn theme_file(&self) -> String {
    self
      .get("theme.file")
      .filter(|name| {
        !name.trim().is_empty()
      })
      .unwrap_or_else(|| {
        DEFAULT_THEME_FILE.to_string()
      })
  }

  #[tracing::instrument(skip(self))]
  fn load_file(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    let mut chain = Vec::new();
    self.load_chained(path, &mut chain)
  }

  /// `chain` holds the canonical paths of
  /// the files currently being included,
  /// outermost first.
  fn load_chained(
    &mut self,
    path: &Path,
    chain: &mut Vec<PathBuf>
  ) -> anyhow::Result<()> {
    let path = canonical(
      &expand_tilde(path)
    )?;
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    self
      .loaded_files
      .push(path.clone());
    chain.push(path.clone());

    let base_dir = path
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let line = match raw_line
        .split_once('#')
      {
        | Some((before, _)) => before,
        | None => raw_line
      }
      .trim();

      if line.is_empty() {
        continue;
      }

      if let Some(include_rest) =
        line.strip_prefix("include ")
      {
        let include_path = canonical(
          &resolve_include_path(
            &base_dir,
            include_rest.trim()
          )?
        )
        .with_context(|| {
          format!(
            "bad include at {}:{}",
            path.display(),
            line_num + 1
          )
        })?;
        debug!(
            file = %path.display(),
            include = %include_path.display(),
            line = line_num + 1,
            "processing include"
        );

        if chain.contains(&include_path) {
          return Err(anyhow!(
            "include cycle at {}:{}: \
             {}",
            path.display(),
            line_num + 1,
            include_path.display()
          ));
        }

        self.load_chained(
          &include_path,
          chain
        )?;
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            path.display(),
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    chain.pop();
    Ok(())
  }
}

#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = data_dir_path(
    cfg,
    override_dir,
    dirs::home_dir().as_deref()
  )?;

  if !dir.exists() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  Ok(dir)
}

fn data_dir_path(
  cfg: &Config,
  override_dir: Option<&Path>,
  home: Option<&Path>
) -> anyhow::Result<PathBuf> {
  if let Some(path) = override_dir {
    return Ok(path.to_path_buf());
  }
  if let Some(cfg_value) =
    cfg.get("data.location")
  {
    return Ok(expand_tilde_in(
      Path::new(&cfg_value),
      home
    ));
  }

  let home = home.ok_or_else(|| {
    anyhow!(
      "cannot determine home \
       directory"
    )
  })?;
  Ok(home.join(".tasklet"))
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_rc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  Ok(rc_path_from(
    override_path,
    std::env::var("TASKLETRC").ok(),
    dirs::home_dir().as_deref()
  ))
}

/// `--taskletrc`, then `$TASKLETRC`
/// (`/dev/null` disables), then an
/// existing `~/.taskletrc`.
fn rc_path_from(
  override_path: Option<&Path>,
  rc_env: Option<String>,
  home: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = override_path {
    return Some(path.to_path_buf());
  }

  if let Some(rc_env) = rc_env {
    if rc_env == "/dev/null" {
      return None;
    }
    return Some(PathBuf::from(rc_env));
  }

  let candidate =
    home?.join(".taskletrc");
  candidate
    .exists()
    .then_some(candidate)
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let expanded =
    expand_tilde(Path::new(include));
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

fn canonical(
  path: &Path
) -> anyhow::Result<PathBuf> {
  fs::canonicalize(path).with_context(
    || {
      format!(
        "failed to resolve {}",
        path.display()
      )
    }
  )
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  expand_tilde_in(
    path,
    dirs::home_dir().as_deref()
  )
}

fn expand_tilde_in(
  path: &Path,
  home: Option<&Path>
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = home
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> Option<bool> {
  match s
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "1" | "y" | "yes" | "on"
    | "true" => Some(true),
    | "0" | "n" | "no" | "off"
    | "false" => Some(false),
    | _ => None
  }
}

#[cfg(test)]
mod tests {
  use std::fs;
  use std::path::{
    Path,
    PathBuf
  };

  use tempfile::tempdir;

  use super::{
    Config,
    DEFAULT_THEME_FILE,
    data_dir_path,
    expand_tilde_in,
    rc_path_from
  };

  #[test]
  fn defaults_without_rc_file() {
    let cfg = Config::default();

    assert_eq!(
      cfg.get("data.location").as_deref(),
      Some("~/.tasklet")
    );
    assert_eq!(
      cfg.get_bool("color").unwrap(),
      Some(true)
    );
    assert_eq!(
      cfg.theme_file(),
      DEFAULT_THEME_FILE
    );
    assert!(cfg.loaded_files.is_empty());
  }

  #[test]
  fn rc_file_with_comments_and_include()
  {
    let temp = tempdir().unwrap();
    let extra = temp.path().join("extra.rc");
    fs::write(
      &extra,
      "theme.file = look.data\n"
    )
    .unwrap();

    let rc = temp.path().join("taskletrc");
    fs::write(
      &rc,
      "# tasklet settings\n\
       color=off   # no ansi\n\
       \n\
       include extra.rc\n",
    )
    .unwrap();

    let cfg = Config::load(Some(rc.as_path())).unwrap();

    assert_eq!(
      cfg.get_bool("color").unwrap(),
      Some(false)
    );
    assert_eq!(cfg.theme_file(), "look.data");
    assert_eq!(cfg.loaded_files.len(), 2);
  }

  #[test]
  fn line_without_equals_is_error() {
    let temp = tempdir().unwrap();
    let rc = temp.path().join("taskletrc");
    fs::write(&rc, "color on\n").unwrap();

    let err = Config::load(Some(rc.as_path()))
      .unwrap_err()
      .to_string();
    assert!(
      err.contains("invalid config line"),
      "{err}"
    );
  }

  #[test]
  fn self_include_is_rejected() {
    let temp = tempdir().unwrap();
    let rc = temp.path().join("taskletrc");
    fs::write(&rc, "include taskletrc\n")
      .unwrap();

    let err = Config::load(Some(rc.as_path()))
      .unwrap_err()
      .to_string();
    assert!(
      err.contains("include cycle"),
      "{err}"
    );
  }

  #[test]
  fn parent_dir_self_include_is_rejected() {
    let temp = tempdir().unwrap();
    let dir = temp.path().join("d");
    fs::create_dir(&dir).unwrap();
    let rc = dir.join("taskletrc");
    fs::write(
      &rc,
      "color=off\ninclude ../d/taskletrc\n"
    )
    .unwrap();

    let err = Config::load(Some(rc.as_path()))
      .unwrap_err()
      .to_string();
    assert!(
      err.contains("include cycle"),
      "{err}"
    );
  }

  #[test]
  fn indirect_cycle_is_rejected() {
    let temp = tempdir().unwrap();
    fs::write(
      temp.path().join("a.rc"),
      "include b.rc\n"
    )
    .unwrap();
    fs::write(
      temp.path().join("b.rc"),
      "include ./a.rc\n"
    )
    .unwrap();

    let rc = temp.path().join("a.rc");
    let err = Config::load(Some(rc.as_path()))
      .unwrap_err()
      .to_string();
    assert!(
      err.contains("include cycle"),
      "{err}"
    );
  }

  #[test]
  fn diamond_include_is_allowed() {
    let temp = tempdir().unwrap();
    fs::write(
      temp.path().join("common.rc"),
      "color=off\n"
    )
    .unwrap();
    fs::write(
      temp.path().join("a.rc"),
      "include common.rc\n"
    )
    .unwrap();
    fs::write(
      temp.path().join("b.rc"),
      "include common.rc\n\
       theme.file=b.data\n"
    )
    .unwrap();
    let rc = temp.path().join("taskletrc");
    fs::write(
      &rc,
      "include a.rc\ninclude b.rc\n"
    )
    .unwrap();

    let cfg = Config::load(Some(rc.as_path()))
      .unwrap();

    assert_eq!(
      cfg.get_bool("color").unwrap(),
      Some(false)
    );
    assert_eq!(cfg.theme_file(), "b.data");
    assert_eq!(cfg.loaded_files.len(), 5);
  }

  #[test]
  fn missing_include_is_error() {
    let temp = tempdir().unwrap();
    let rc = temp.path().join("taskletrc");
    fs::write(&rc, "include nope.rc\n")
      .unwrap();

    let err = format!(
      "{:#}",
      Config::load(Some(rc.as_path()))
        .unwrap_err()
    );
    assert!(
      err.contains("bad include"),
      "{err}"
    );
  }

  #[test]
  fn rc_flag_beats_env_and_home() {
    let temp = tempdir().unwrap();
    fs::write(
      temp.path().join(".taskletrc"),
      ""
    )
    .unwrap();
    let flag = Path::new("/etc/flag.rc");

    assert_eq!(
      rc_path_from(
        Some(flag),
        Some("/etc/env.rc".to_string()),
        Some(temp.path())
      ),
      Some(flag.to_path_buf())
    );
  }

  #[test]
  fn rc_env_is_used_or_disables() {
    let temp = tempdir().unwrap();
    fs::write(
      temp.path().join(".taskletrc"),
      ""
    )
    .unwrap();

    assert_eq!(
      rc_path_from(
        None,
        Some("/etc/env.rc".to_string()),
        Some(temp.path())
      ),
      Some(PathBuf::from("/etc/env.rc"))
    );
    assert_eq!(
      rc_path_from(
        None,
        Some("/dev/null".to_string()),
        Some(temp.path())
      ),
      None
    );
  }

  #[test]
  fn home_rc_only_when_present() {
    let temp = tempdir().unwrap();
    assert_eq!(
      rc_path_from(None, None, Some(temp.path())),
      None
    );

    let rc = temp.path().join(".taskletrc");
    fs::write(&rc, "").unwrap();
    assert_eq!(
      rc_path_from(None, None, Some(temp.path())),
      Some(rc)
    );
    assert_eq!(
      rc_path_from(None, None, None),
      None
    );
  }

  #[test]
  fn tilde_expands_against_home() {
    let home = Path::new("/home/ada");

    assert_eq!(
      expand_tilde_in(
        Path::new("~/.tasklet"),
        Some(home)
      ),
      PathBuf::from("/home/ada/.tasklet")
    );
    assert_eq!(
      expand_tilde_in(
        Path::new("~other/x"),
        Some(home)
      ),
      PathBuf::from("~other/x")
    );
    assert_eq!(
      expand_tilde_in(
        Path::new("~/.tasklet"),
        None
      ),
      PathBuf::from("~/.tasklet")
    );
  }

  #[test]
  fn data_location_is_expanded() {
    let home = Path::new("/home/ada");
    let mut cfg = Config::default();

    assert_eq!(
      data_dir_path(&cfg, None, Some(home))
        .unwrap(),
      PathBuf::from("/home/ada/.tasklet")
    );

    cfg.apply_overrides([(
      "data.location".to_string(),
      "~/todo".to_string()
    )]);
    assert_eq!(
      data_dir_path(&cfg, None, Some(home))
        .unwrap(),
      PathBuf::from("/home/ada/todo")
    );

    let flag = Path::new("/srv/tasklet");
    assert_eq!(
      data_dir_path(
        &cfg,
        Some(flag),
        Some(home)
      )
      .unwrap(),
      flag.to_path_buf()
    );
  }

  #[test]
  fn overrides_strip_rc_prefix() {
    let mut cfg = Config::default();
    cfg.apply_overrides([
      ("rc.color".to_string(), "no".to_string()),
      ("theme.file".to_string(), " ".to_string())
    ]);

    assert_eq!(
      cfg.get_bool("color").unwrap(),
      Some(false)
    );
    assert_eq!(
      cfg.theme_file(),
      DEFAULT_THEME_FILE
    );
  }

  #[test]
  fn non_boolean_value_is_error() {
    let mut cfg = Config::default();
    cfg.apply_overrides([(
      "color".to_string(),
      "sometimes".to_string()
    )]);

    assert!(cfg.get_bool("color").is_err());
  }
}
