//! Render a dashboard table to HTML from the command line.
//!
//! Sort and visibility changes made through `--click` and display commands
//! are persisted, so running the demo again picks them up.

mod args;
mod dashboard;
mod error;
mod paths;

use std::fs::{self, File};
use std::process::ExitCode;
use std::sync::Arc;

use gridtable::settings::{FileBackend, MemoryBackend, SettingsPersistence, SettingsProvider};
use clap::Parser;
use gridtable::{EventResult, Table};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::args::{Action, Args};
use crate::dashboard::Dashboard;
use crate::error::DemoError;

fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent()
        && fs::create_dir_all(dir).is_ok()
        && let Ok(file) = File::create(&path)
    {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
    }
}

async fn provider(args: &Args) -> Result<SettingsProvider, DemoError> {
    if args.memory {
        return Ok(SettingsProvider::new(MemoryBackend::new()));
    }
    match args.state_dir.clone().or_else(paths::state_dir) {
        Some(dir) => Ok(SettingsProvider::new(FileBackend::new(dir).await?)),
        None => {
            log::warn!("no data directory available, table state will not be kept");
            Ok(SettingsProvider::new(MemoryBackend::new()))
        }
    }
}

async fn run(args: Args) -> Result<String, DemoError> {
    let dashboard = Dashboard::load(&args.dashboard).await?;
    let tree = dashboard.tree()?;

    let persistence = Arc::new(SettingsPersistence::new(
        provider(&args).await?,
        &args.table_name(),
    )?);
    if args.reset {
        persistence.clear().await?;
    } else {
        persistence.preload().await?;
    }

    let table = Table::build(
        &dashboard.container,
        tree,
        dashboard.rows,
        dashboard.options,
        Some(persistence.clone()),
    )?;
    log::info!("built {} with {} rows", table.id(), table.len());

    for action in args.actions() {
        match action {
            Action::Display(command) => table.display(Some(command)),
            Action::Click(target) => {
                if table.on_click(&target) == EventResult::Ignored {
                    eprintln!("nothing to click at {target:?}");
                }
            }
            Action::Erase(text) => table.erase(text.as_deref()),
        }
    }

    persistence.flush().await;
    Ok(table.to_html())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let args = Args::parse();
    match run(args).await {
        Ok(html) => {
            println!("{html}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(state_dir: &std::path::Path, extra: &[&str]) -> Args {
        let mut argv = vec![
            "gridtable-demo".to_string(),
            concat!(env!("CARGO_MANIFEST_DIR"), "/data/servers.json").to_string(),
            "--state-dir".to_string(),
            state_dir.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::try_parse_from(argv).unwrap()
    }

    #[tokio::test]
    async fn test_state_carries_over_between_runs() {
        let dir = tempfile::tempdir().unwrap();

        let first = run(args(dir.path(), &["hide:1", "--click", "servers-h0"])).await.unwrap();
        assert!(first.contains("id=\"servers-h1\" class=\"leaf align-left hidden\""));

        let second = run(args(dir.path(), &[])).await.unwrap();
        assert!(second.contains("id=\"servers-h1\" class=\"leaf align-left hidden\""));
        assert!(
            second.contains("id=\"servers-h0\" class=\"leaf align-left sortable sorted-desc\""),
            "server column sort was kept"
        );

        let reset = run(args(dir.path(), &["--reset"])).await.unwrap();
        assert!(!reset.contains("hidden"));
    }

    #[tokio::test]
    async fn test_erase_shows_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let html = run(args(dir.path(), &["--erase"])).await.unwrap();
        assert!(html.contains("<em>No servers reporting</em>"));
    }
}
