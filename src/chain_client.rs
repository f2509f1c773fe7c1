#[cfg(feature = "ether")]
mod ethers_client;
use crate::contracts::CallInput;
use anyhow::Result;
use async_trait::async_trait;
use ethers_core::types::{Address, BlockNumber, Bytes, TransactionReceipt, H256, U256};
#[cfg(feature = "ether")]
pub use ethers_client::*;
use std::fmt;

#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn estimate_gas(&self, call: &CallInput) -> Result<U256>;
    async fn sign_and_broadcast(&self, tx: &Transaction) -> Result<H256>; // return transaction hash
    async fn get_receipt(&self, tx_hash: H256) -> Result<Option<TransactionReceipt>>;
    async fn call(&self, call: &CallInput, block: BlockNumber) -> Result<Bytes>;
}

/// Hex-encoded secp256k1 key as typed by the user. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(String);

impl PrivateKey {
    pub fn new(hex: &str) -> Self {
        Self(hex.trim().to_string())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// A state-changing call ready to be signed, alive for one submission.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub sender: Address,
    pub key: PrivateKey,
    pub gas: U256,
    pub gas_price: U256,
    pub call: CallInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_key_is_redacted_in_debug() {
        let key = PrivateKey::new(" 0xdeadbeef ");
        assert_eq!(key.expose(), "0xdeadbeef");
        assert_eq!(format!("{:?}", key), "PrivateKey(<redacted>)");
    }
}
