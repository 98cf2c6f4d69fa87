use ethers::types::H256;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can end a scan run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{0}")]
    MissingCredential(String),

    #[error("invalid value for {flag}: {reason}")]
    InvalidValue { flag: &'static str, reason: String },

    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("not connected to {0}")]
    NotConnected(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("block {0} not found")]
    BlockNotFound(u64),

    #[error("transaction {0:?} not found")]
    TransactionNotFound(H256),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Returns `true` for errors raised before any block is fetched.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::ConfigRead { .. }
                | Self::ConfigParse { .. }
                | Self::MissingCredential(_)
                | Self::InvalidValue { .. }
                | Self::InvalidRange(_)
                | Self::NotConnected(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
