use std::str::FromStr;

use crate::chain_client::{ChainClient, Transaction};
use crate::contracts::CallInput;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ethers::middleware::SignerMiddleware;
use ethers_providers::{Http, Middleware, Provider};
use ethers_signers::{LocalWallet, Signer};
use ethers_core::types::{BlockId, BlockNumber, Bytes, TransactionReceipt, TransactionRequest, H256, U256};
use tracing::debug;

/// JSON-RPC client over HTTP. Keys arrive per transaction, so no wallet is held.
#[derive(Debug, Clone)]
pub struct EthersClient {
    provider: Provider<Http>,
    chain_id: u64,
}

#[async_trait]
impl ChainClient for EthersClient {
    async fn estimate_gas(&self, call: &CallInput) -> Result<U256> {
        let tx = call.to_typed_transaction();
        Ok(self.provider.estimate_gas(&tx, None).await?)
    }

    async fn sign_and_broadcast(&self, tx: &Transaction) -> Result<H256> {
        let wallet = LocalWallet::from_str(tx.key.expose())?.with_chain_id(self.chain_id);
        if wallet.address() != tx.sender {
            return Err(anyhow!(
                "private key belongs to {:?}, not to sender {:?}",
                wallet.address(),
                tx.sender
            ));
        }
        let signer = SignerMiddleware::new(self.provider.clone(), wallet);

        // Legacy transaction, the signer middleware fills in the nonce
        let request = TransactionRequest::new()
            .from(tx.sender)
            .to(tx.call.to)
            .gas(tx.gas)
            .gas_price(tx.gas_price)
            .data(tx.call.data.clone());
        debug!("Sending transaction {:?}", request);

        let pending_tx = signer.send_transaction(request, None).await?;
        Ok(pending_tx.tx_hash())
    }

    async fn get_receipt(&self, tx_hash: H256) -> Result<Option<TransactionReceipt>> {
        Ok(self.provider.get_transaction_receipt(tx_hash).await?)
    }

    async fn call(&self, call: &CallInput, block: BlockNumber) -> Result<Bytes> {
        let tx = call.to_typed_transaction();
        Ok(self.provider.call(&tx, Some(BlockId::Number(block))).await?)
    }
}

impl EthersClient {
    pub fn construct(rpc_url: &str, chain_id: u64) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)?;
        Ok(Self { provider, chain_id })
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain_client::PrivateKey;
    use crate::contracts::{ContractDescriptor, SET_DNA};
    use ethers_core::types::Address;

    const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    const KEY_ADDRESS: &str = "0x2c7536e3605d9c16a7a3d7b1898e529396a65c23";

    fn transaction(sender: Address, key: &str) -> Transaction {
        let contract = ContractDescriptor::item_manager(Address::repeat_byte(0x33)).unwrap();
        Transaction {
            sender,
            key: PrivateKey::new(key),
            gas: U256::from(42_000),
            gas_price: U256::zero(),
            call: contract.call_input(SET_DNA, Some(sender), &["1", "2"]).unwrap(),
        }
    }

    // nothing listens on port 1, these must fail before any request is made
    fn offline_client() -> EthersClient {
        EthersClient::construct("http://127.0.0.1:1", 4).unwrap()
    }

    #[tokio::test]
    async fn key_of_another_account_is_rejected() {
        let sender = Address::repeat_byte(0x11);
        let err = offline_client()
            .sign_and_broadcast(&transaction(sender, KEY))
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains(KEY_ADDRESS));
        assert!(err.contains("0x1111111111111111111111111111111111111111"));
    }

    #[tokio::test]
    async fn malformed_key_is_rejected() {
        let sender = Address::repeat_byte(0x11);
        let result = offline_client()
            .sign_and_broadcast(&transaction(sender, "0xnot-a-key"))
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn construct_rejects_a_malformed_url() {
        assert!(EthersClient::construct("not a url", 4).is_err());
    }

    #[test]
    fn construct_keeps_chain_id() {
        let client = EthersClient::construct("http://localhost:8545", 1337).unwrap();
        assert_eq!(client.chain_id(), 1337);
    }
}
