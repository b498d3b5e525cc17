use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("ledger rejected the call: {0:?}")]
    Ledger(fund_ledger::Error),

    #[error("host error: {0}")]
    Host(String),

    #[error("unknown account #{0}")]
    UnknownAccount(usize),

    #[error("invalid step: {0}")]
    InvalidStep(String),

    #[error("invalid value for {key}: {value:?}")]
    InvalidSetting { key: String, value: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
