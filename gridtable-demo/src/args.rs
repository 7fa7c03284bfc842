//! Command line parsing.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use gridtable::VisibilityCommand;

/// One step applied to the built table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Display(VisibilityCommand),
    Click(String),
    Erase(Option<String>),
}

/// Render a dashboard table to HTML.
///
/// Display commands are applied first, then clicks in the order given, then
/// `--erase`.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "gridtable-demo", about = "Render a dashboard table to HTML")]
pub struct Args {
    /// Dashboard JSON file
    pub dashboard: PathBuf,

    /// Display commands: show_all, hide_all, show:N, hide:N
    #[arg(value_parser = VisibilityCommand::from_str)]
    pub commands: Vec<VisibilityCommand>,

    /// Key the table state is stored under (default: file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Where table state is stored (default: platform data dir)
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Keep table state in memory only
    #[arg(long)]
    pub memory: bool,

    /// Forget stored state before building
    #[arg(long)]
    pub reset: bool,

    /// Simulate a click on a rendered element id
    #[arg(long = "click", value_name = "ID")]
    pub clicks: Vec<String>,

    /// Drop all rows, optionally with a placeholder
    #[arg(long, value_name = "TEXT")]
    pub erase: Option<Option<String>>,
}

impl Args {
    /// Name the table state is stored under.
    pub fn table_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.dashboard
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "table".to_string())
        })
    }

    pub fn actions(&self) -> Vec<Action> {
        let displays = self.commands.iter().copied().map(Action::Display);
        let clicks = self.clicks.iter().cloned().map(Action::Click);
        let erase = self.erase.clone().map(Action::Erase);
        displays.chain(clicks).chain(erase).collect()
    }
}
