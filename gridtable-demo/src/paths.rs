//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "gridtable";
const APPLICATION: &str = "gridtable-demo";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory holding persisted table state, one file per table.
///
/// - Linux: `$XDG_DATA_HOME/gridtable-demo/tables`
/// - macOS: `~/Library/Application Support/dev.gridtable.gridtable-demo/tables`
/// - Windows: `C:\Users\<User>\AppData\Roaming\gridtable\gridtable-demo\data\tables`
pub fn state_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("tables"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().join("latest.log"))
}

/// Keep the previous run's log next to the new one.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(latest) = log_file() else { return };
    if latest.exists() {
        let _ = fs::rename(&latest, latest.with_file_name("previous.log"));
    }
}
