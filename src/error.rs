use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Config directory not found at {0}. Run 'dashboard init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("No records file configured. Set records_file in config.toml or pass --records <FILE>.")]
    NoRecordsPath,

    #[error("Records file not found: {0}")]
    RecordsNotFound(PathBuf),

    #[error("Failed to parse records file {path}: {source}")]
    RecordsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Invalid year '{0}'. Use 'all' or a four-digit year (e.g., 2024).")]
    InvalidYear(String),

    #[error("Invalid status '{0}'. Use 'all', 'collected', 'unpaid', 'pending' or 'voided'.")]
    InvalidStatus(String),

    #[error("Unknown sort column '{0}'")]
    InvalidSortKey(String),

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
