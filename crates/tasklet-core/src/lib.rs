pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod render;
pub mod shell;
pub mod theme;

use std::ffi::OsString;
use std::io::{self, IsTerminal};

use anyhow::Context;
use clap::Parser;
use tasklet_shared::ThemeController;
use tracing::{debug, info};

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let pre = cli::preprocess_args(&raw_args);
    let cli = cli::GlobalCli::parse_from(pre.cleaned_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        "starting tasklet"
    );
    debug!(?pre.rc_overrides, "preprocessed rc overrides");

    let mut cfg = config::Config::load(cli.taskletrc.as_deref())?;
    cfg.apply_overrides(
        pre.rc_overrides
            .into_iter()
            .chain(cli.rc_overrides.iter().map(|kv| (kv.key.clone(), kv.value.clone()))),
    );

    let data_dir = config::resolve_data_dir(&cfg, cli.data.as_deref())
        .context("failed to resolve data directory")?;

    let store = datastore::DataStore::open(&data_dir, &cfg.theme_file())
        .with_context(|| format!("failed to open datastore at {}", data_dir.display()))?;

    let stdout = io::stdout();
    let renderer = render::Renderer::new(&cfg, stdout.is_terminal())?;
    let theme = ThemeController::initialize(theme::TerminalThemeSink::new(store));
    let mut session = commands::Session::new(theme, renderer);

    let mut out = stdout.lock();
    if let Some(line) = cli.one_shot_line() {
        debug!(%line, "running one-shot command");
        session.execute_line(&line, &mut out)?;
    } else {
        let stdin = io::stdin();
        let prompt = stdin.is_terminal();
        shell::run_loop(&mut session, stdin.lock(), &mut out, prompt)?;
    }

    info!("done");
    Ok(())
}
