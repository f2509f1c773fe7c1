//! The three user-triggered workflows.
//!
//! Each is a plain `async fn` over a [`ChainClient`]; none of them holds UI
//! state. Set DNA reports its progress through a callback so the caller
//! decides where the status is shown.

use crate::chain_client::{ChainClient, PrivateKey, Transaction};
use crate::config::ConfirmationPolicy;
use crate::contracts::{CallInput, ContractDescriptor, GET_DNA, ITEMS_OF, SET_DNA};
use crate::error::WorkflowError;
use crate::render::ReadOutcome;
use anyhow::Context;
use ethers_core::types::{Address, BlockNumber, TransactionReceipt, H256, U256};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    #[default]
    Unset,
    Waiting,
    Done,
}

impl fmt::Display for SubmitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => Ok(()),
            Self::Waiting => write!(f, "waiting"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Inputs of one Set DNA press, as typed.
#[derive(Debug, Clone)]
pub struct SetDnaRequest {
    pub wallet: String,
    pub private_key: PrivateKey,
    pub item_id: String,
    pub dna: String,
}

#[derive(Debug, Clone)]
pub struct Submitted {
    pub tx_hash: H256,
    pub gas: U256,
    pub receipt: TransactionReceipt,
}

/// Estimates gas for `setDNA`, signs and broadcasts it, then polls for the receipt.
///
/// `on_status` sees `Waiting` once the transaction is broadcast and `Done`
/// once its receipt is found. It is never called when the workflow fails
/// before broadcasting.
pub async fn set_dna<C, F>(
    client: &C,
    item_manager: &ContractDescriptor,
    gas_price: U256,
    policy: &ConfirmationPolicy,
    request: &SetDnaRequest,
    mut on_status: F,
) -> Result<Submitted, WorkflowError>
where
    C: ChainClient + ?Sized,
    F: FnMut(SubmitStatus),
{
    let sender = parse_address(&request.wallet, "wallet")?;
    let call = item_manager
        .call_input(SET_DNA, Some(sender), &[&request.item_id, &request.dna])
        .map_err(WorkflowError::InvalidInput)?;

    let gas = match client.estimate_gas(&call).await {
        Ok(gas) => gas,
        Err(e) => {
            error!("Gas estimation for {} failed: {:#}", SET_DNA, e);
            return Err(WorkflowError::Estimation(e));
        }
    };
    info!("Gas: {}", gas);

    let tx = Transaction {
        sender,
        key: request.private_key.clone(),
        gas,
        gas_price,
        call,
    };
    let tx_hash = match client.sign_and_broadcast(&tx).await {
        Ok(tx_hash) => tx_hash,
        Err(e) => {
            error!("Broadcasting {} failed: {:#}", SET_DNA, e);
            return Err(WorkflowError::Broadcast(e));
        }
    };
    info!("Transaction hash: {:?}", tx_hash);

    on_status(SubmitStatus::Waiting);
    let receipt = wait_for_receipt(client, tx_hash, policy).await?;
    info!(
        "Transaction {:?} confirmed in block {:?} with status {:?}",
        tx_hash, receipt.block_number, receipt.status
    );
    on_status(SubmitStatus::Done);

    Ok(Submitted {
        tx_hash,
        gas,
        receipt,
    })
}

/// Polls for a receipt, sleeping `policy.interval` between attempts.
pub async fn wait_for_receipt<C>(
    client: &C,
    tx_hash: H256,
    policy: &ConfirmationPolicy,
) -> Result<TransactionReceipt, WorkflowError>
where
    C: ChainClient + ?Sized,
{
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        match client.get_receipt(tx_hash).await {
            Ok(Some(receipt)) => return Ok(receipt),
            Ok(None) => debug!("No receipt for {:?} yet (attempt {})", tx_hash, attempts),
            Err(e) => warn!("Receipt request for {:?} failed: {:#}", tx_hash, e),
        }
        if let Some(max) = policy.max_attempts {
            if attempts >= max.get() {
                error!("Gave up on {:?} after {} attempts", tx_hash, attempts);
                return Err(WorkflowError::ConfirmationTimeout { tx_hash, attempts });
            }
        }
        sleep(policy.interval).await;
    }
}

/// Reads the DNA of `item_id` for `game` from the Item Manager at the latest block.
pub async fn get_dna<C>(
    client: &C,
    item_manager: &ContractDescriptor,
    item_id: &str,
    game: &str,
) -> Result<ReadOutcome, WorkflowError>
where
    C: ChainClient + ?Sized,
{
    let call = item_manager
        .call_input(GET_DNA, None, &[item_id, game])
        .map_err(WorkflowError::InvalidInput)?;
    read(client, &call).await
}

/// Reads the items owned by `owner` from the Ownership contract at the latest block.
pub async fn get_items<C>(
    client: &C,
    ownership: &ContractDescriptor,
    owner: &str,
) -> Result<ReadOutcome, WorkflowError>
where
    C: ChainClient + ?Sized,
{
    let call = ownership
        .call_input(ITEMS_OF, None, &[owner])
        .map_err(WorkflowError::InvalidInput)?;
    read(client, &call).await
}

async fn read<C>(client: &C, call: &CallInput) -> Result<ReadOutcome, WorkflowError>
where
    C: ChainClient + ?Sized,
{
    let raw = match client.call(call, BlockNumber::Latest).await {
        Ok(raw) => raw,
        Err(e) => {
            error!("{} call failed: {:#}", call.function.name, e);
            return Err(WorkflowError::Read(e));
        }
    };
    // `0x` from an address without code is a valid answer, show it as is
    let tokens = match call.decode_output(&raw) {
        Ok(tokens) => tokens,
        Err(e) => {
            warn!("{:#}, showing raw output", e);
            Vec::new()
        }
    };
    let outcome = ReadOutcome { raw, tokens };
    info!("{} returned {}", call.function.name, outcome);
    Ok(outcome)
}

/// Runs one action until it finishes or `cancel` resolves, dropping the action.
///
/// `None` means the action was cancelled.
pub async fn cancellable<T, S>(
    action: impl Future<Output = Result<T, WorkflowError>>,
    cancel: S,
) -> Option<Result<(), WorkflowError>>
where
    S: Future,
{
    tokio::select! {
        result = action => Some(result.map(|_| ())),
        _ = cancel => None,
    }
}

fn parse_address(value: &str, field: &str) -> Result<Address, WorkflowError> {
    Address::from_str(value.trim())
        .with_context(|| format!("{} is not an address: {:?}", field, value))
        .map_err(WorkflowError::InvalidInput)
}
