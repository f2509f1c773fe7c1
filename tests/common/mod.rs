#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ethers_core::abi::{self, Token};
use ethers_core::types::{BlockNumber, Bytes, TransactionReceipt, H256, U256, U64};
use item_dna::{CallInput, ChainClient, ChainConfig, Transaction};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tokio::time::Instant;

pub const WALLET: &str = "0x1111111111111111111111111111111111111111";
pub const GAME: &str = "0x2222222222222222222222222222222222222222";
pub const KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    EstimateGas,
    SignAndBroadcast,
    GetReceipt,
    Call,
}

#[derive(Debug, Clone, Copy)]
pub enum ReceiptStep {
    Pending,
    Fail,
    Ready,
}

/// Scripted chain client. Receipt steps are consumed in order; once they run
/// out every poll answers with `fallback`.
pub struct MockChainClient {
    estimate: Result<U256, String>,
    broadcast: Result<H256, String>,
    receipts: Mutex<VecDeque<ReceiptStep>>,
    fallback: ReceiptStep,
    call_output: Mutex<Result<Bytes, String>>,
    pub requests: Mutex<Vec<Request>>,
    pub receipt_polls: Mutex<Vec<Instant>>,
    pub broadcasted: Mutex<Vec<Transaction>>,
    pub calls: Mutex<Vec<(CallInput, BlockNumber)>>,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self {
            estimate: Ok(U256::from(42_000)),
            broadcast: Ok(H256::repeat_byte(0xaa)),
            receipts: Mutex::new(VecDeque::new()),
            fallback: ReceiptStep::Ready,
            call_output: Mutex::new(Err("no call output scripted".to_string())),
            requests: Mutex::new(Vec::new()),
            receipt_polls: Mutex::new(Vec::new()),
            broadcasted: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_estimate(mut self, message: &str) -> Self {
        self.estimate = Err(message.to_string());
        self
    }

    pub fn failing_broadcast(mut self, message: &str) -> Self {
        self.broadcast = Err(message.to_string());
        self
    }

    pub fn receipts(self, steps: &[ReceiptStep]) -> Self {
        self.receipts.lock().unwrap().extend(steps.iter().copied());
        self
    }

    pub fn never_confirms(mut self) -> Self {
        self.fallback = ReceiptStep::Pending;
        self
    }

    pub fn returning(self, tokens: &[Token]) -> Self {
        self.set_call_output(tokens);
        self
    }

    pub fn set_call_output(&self, tokens: &[Token]) {
        *self.call_output.lock().unwrap() = Ok(abi::encode(tokens).into());
    }

    pub fn set_call_error(&self, message: &str) {
        *self.call_output.lock().unwrap() = Err(message.to_string());
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, request: Request) -> usize {
        self.requests().into_iter().filter(|r| *r == request).count()
    }

    fn record(&self, request: Request) {
        self.requests.lock().unwrap().push(request);
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn estimate_gas(&self, _call: &CallInput) -> Result<U256> {
        self.record(Request::EstimateGas);
        self.estimate.clone().map_err(|e| anyhow!(e))
    }

    async fn sign_and_broadcast(&self, tx: &Transaction) -> Result<H256> {
        self.record(Request::SignAndBroadcast);
        self.broadcasted.lock().unwrap().push(tx.clone());
        self.broadcast.clone().map_err(|e| anyhow!(e))
    }

    async fn get_receipt(&self, tx_hash: H256) -> Result<Option<TransactionReceipt>> {
        self.record(Request::GetReceipt);
        self.receipt_polls.lock().unwrap().push(Instant::now());
        let step = self.receipts.lock().unwrap().pop_front().unwrap_or(self.fallback);
        match step {
            ReceiptStep::Pending => Ok(None),
            ReceiptStep::Fail => Err(anyhow!("connection reset")),
            ReceiptStep::Ready => Ok(Some(TransactionReceipt {
                transaction_hash: tx_hash,
                block_number: Some(U64::from(7)),
                status: Some(U64::from(1)),
                ..Default::default()
            })),
        }
    }

    async fn call(&self, call: &CallInput, block: BlockNumber) -> Result<Bytes> {
        self.record(Request::Call);
        self.calls.lock().unwrap().push((call.clone(), block));
        self.call_output.lock().unwrap().clone().map_err(|e| anyhow!(e))
    }
}

pub fn config() -> ChainConfig {
    ChainConfig::from_vars(&HashMap::new()).unwrap()
}

pub fn uints(values: &[u64]) -> Token {
    Token::Array(values.iter().map(|v| Token::Uint(U256::from(*v))).collect())
}
