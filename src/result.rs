use compact_str::CompactString;
use thiserror::Error;

use crate::client::ClientError;

pub type Result<T> = std::result::Result<T, GlimError>;

#[derive(Debug, Error)]
pub enum GlimError {
    #[error("Failure reading configuration file: {0}")]
    ConfigError(CompactString),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    GeneralError(CompactString),
}
