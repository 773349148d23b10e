//! Error types for the skin changer plugin.

use loadout_sdk::HostError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SkinChangerError {
    #[error("config store error: {0}")]
    Store(#[from] HostError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
