use ethers_core::types::H256;
use thiserror::Error;

/// Why a workflow stopped before producing its result.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The typed arguments could not be encoded for the target function.
    #[error("invalid input: {0:#}")]
    InvalidInput(#[source] anyhow::Error),

    /// The gas estimate request failed; nothing was broadcast.
    #[error("gas estimation failed: {0:#}")]
    Estimation(#[source] anyhow::Error),

    /// Signing or broadcasting the transaction failed.
    #[error("broadcast failed: {0:#}")]
    Broadcast(#[source] anyhow::Error),

    /// A read-only call failed or returned data the ABI cannot decode.
    #[error("read failed: {0:#}")]
    Read(#[source] anyhow::Error),

    #[error("no receipt for {tx_hash:?} after {attempts} attempts")]
    ConfirmationTimeout { tx_hash: H256, attempts: u32 },
}

impl WorkflowError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "InvalidInput",
            Self::Estimation(_) => "EstimationFailure",
            Self::Broadcast(_) => "BroadcastFailure",
            Self::Read(_) => "ReadFailure",
            Self::ConfirmationTimeout { .. } => "ConfirmationTimeout",
        }
    }
}
