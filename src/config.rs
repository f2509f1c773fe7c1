pub const RPC_URL_KEY: &'static str = "RPC_URL";
pub const CHAIN_ID_KEY: &'static str = "CHAIN_ID";

pub const OWNERSHIP_CONTRACT_ADDRESS_KEY: &'static str = "OWNERSHIP_CONTRACT_ADDRESS";
pub const ITEM_MANAGER_CONTRACT_ADDRESS_KEY: &'static str = "ITEM_MANAGER_CONTRACT_ADDRESS";
pub const OWNERSHIP_ABI_PATH_KEY: &'static str = "OWNERSHIP_ABI_PATH";
pub const ITEM_MANAGER_ABI_PATH_KEY: &'static str = "ITEM_MANAGER_ABI_PATH";

pub const GAS_PRICE_WEI_KEY: &'static str = "GAS_PRICE_WEI";
pub const RECEIPT_POLL_INTERVAL_MS_KEY: &'static str = "RECEIPT_POLL_INTERVAL_MS";
pub const RECEIPT_MAX_ATTEMPTS_KEY: &'static str = "RECEIPT_MAX_ATTEMPTS";

pub const DEFAULT_RPC_URL: &'static str = "https://rinkeby.infura.io";
pub const DEFAULT_CHAIN_ID: u64 = 4;
pub const DEFAULT_OWNERSHIP_CONTRACT_ADDRESS: &'static str =
    "0xf403ffc5bfa75f622a3a00ac9fc1480e723b259c";
pub const DEFAULT_ITEM_MANAGER_CONTRACT_ADDRESS: &'static str =
    "0x8fbb25f6272316651d14b521a8334b0be7d1ba51";
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_RECEIPT_MAX_ATTEMPTS: u32 = 300;

use crate::contracts::ContractDescriptor;
use anyhow::{Context, Result};
use dotenv::dotenv;
use ethers_core::types::{Address, U256};
use std::collections::HashMap;
use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

/// How the receipt of a broadcast transaction is waited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub interval: Duration,
    /// `None` polls until the workflow future is dropped.
    pub max_attempts: Option<NonZeroU32>,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_RECEIPT_POLL_INTERVAL_MS),
            max_attempts: NonZeroU32::new(DEFAULT_RECEIPT_MAX_ATTEMPTS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    pub gas_price: U256,
    pub ownership: ContractDescriptor,
    pub item_manager: ContractDescriptor,
    pub confirmation: ConfirmationPolicy,
}

impl ChainConfig {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_vars(&env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let rpc_url = get(RPC_URL_KEY).unwrap_or(DEFAULT_RPC_URL).to_string();
        let chain_id = match get(CHAIN_ID_KEY) {
            Some(v) => v.parse::<u64>().with_context(|| format!("{} = {}", CHAIN_ID_KEY, v))?,
            None => DEFAULT_CHAIN_ID,
        };
        let gas_price = match get(GAS_PRICE_WEI_KEY) {
            Some(v) => U256::from_dec_str(v).with_context(|| format!("{} = {}", GAS_PRICE_WEI_KEY, v))?,
            None => U256::zero(),
        };

        let ownership_address = parse_address(
            get(OWNERSHIP_CONTRACT_ADDRESS_KEY).unwrap_or(DEFAULT_OWNERSHIP_CONTRACT_ADDRESS),
            OWNERSHIP_CONTRACT_ADDRESS_KEY,
        )?;
        let item_manager_address = parse_address(
            get(ITEM_MANAGER_CONTRACT_ADDRESS_KEY).unwrap_or(DEFAULT_ITEM_MANAGER_CONTRACT_ADDRESS),
            ITEM_MANAGER_CONTRACT_ADDRESS_KEY,
        )?;
        let ownership = match get(OWNERSHIP_ABI_PATH_KEY) {
            Some(path) => ContractDescriptor::from_abi_file("Ownership", ownership_address, path)?,
            None => ContractDescriptor::ownership(ownership_address)?,
        };
        let item_manager = match get(ITEM_MANAGER_ABI_PATH_KEY) {
            Some(path) => {
                ContractDescriptor::from_abi_file("ItemManager", item_manager_address, path)?
            }
            None => ContractDescriptor::item_manager(item_manager_address)?,
        };

        let mut confirmation = ConfirmationPolicy::default();
        if let Some(v) = get(RECEIPT_POLL_INTERVAL_MS_KEY) {
            let ms = v
                .parse::<u64>()
                .with_context(|| format!("{} = {}", RECEIPT_POLL_INTERVAL_MS_KEY, v))?;
            confirmation.interval = Duration::from_millis(ms);
        }
        if let Some(v) = get(RECEIPT_MAX_ATTEMPTS_KEY) {
            let attempts = v
                .parse::<u32>()
                .with_context(|| format!("{} = {}", RECEIPT_MAX_ATTEMPTS_KEY, v))?;
            confirmation.max_attempts = NonZeroU32::new(attempts);
        }

        Ok(Self {
            rpc_url,
            chain_id,
            gas_price,
            ownership,
            item_manager,
            confirmation,
        })
    }
}

fn parse_address(value: &str, key: &str) -> Result<Address> {
    Address::from_str(value).with_context(|| format!("{} is not an address: {}", key, value))
}
