use gridtable::ConfigurationError;
use gridtable::settings::SettingsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid dashboard file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
}
