//! Contract descriptors and the call inputs built from them.

use anyhow::{anyhow, Context, Result};
use ethers_core::abi::token::{LenientTokenizer, Tokenizer};
use ethers_core::abi::{Abi, Function, ParamType, StateMutability, Token};
use ethers_core::types::transaction::eip2718::TypedTransaction;
use ethers_core::types::{Address, Bytes, TransactionRequest, U256};
use std::fs;

pub const SET_DNA: &'static str = "setDNA";
pub const GET_DNA: &'static str = "getDNA";
pub const ITEMS_OF: &'static str = "itemsOf";

const OWNERSHIP_ABI: &'static str = include_str!("../abi/ownership.json");
const ITEM_MANAGER_ABI: &'static str = include_str!("../abi/item_manager.json");

/// A deployed contract: its ABI and where it lives.
#[derive(Debug, Clone)]
pub struct ContractDescriptor {
    pub name: String,
    pub address: Address,
    pub abi: Abi,
}

impl ContractDescriptor {
    pub fn new(name: &str, address: Address, abi_json: &str) -> Result<Self> {
        let abi: Abi = serde_json::from_str(abi_json)
            .with_context(|| format!("invalid ABI for {} contract", name))?;
        Ok(Self {
            name: name.to_string(),
            address,
            abi,
        })
    }

    pub fn from_abi_file(name: &str, address: Address, abi_path: &str) -> Result<Self> {
        let abi_str = fs::read_to_string(abi_path)
            .with_context(|| format!("failed to read ABI file {}", abi_path))?;
        Self::new(name, address, &abi_str)
    }

    /// Ownership contract with the bundled ABI.
    pub fn ownership(address: Address) -> Result<Self> {
        Self::new("Ownership", address, OWNERSHIP_ABI)
    }

    /// Item Manager contract with the bundled ABI.
    pub fn item_manager(address: Address) -> Result<Self> {
        Self::new("ItemManager", address, ITEM_MANAGER_ABI)
    }

    pub fn function(&self, name: &str) -> Result<&Function> {
        self.abi
            .function(name)
            .with_context(|| format!("{} contract has no function {}", self.name, name))
    }

    /// Encodes a call to `function` from arguments as typed into a text field.
    ///
    /// Integers may be decimal or `0x` hex, addresses hex with or without `0x`.
    pub fn call_input(&self, function: &str, from: Option<Address>, args: &[&str]) -> Result<CallInput> {
        let function = self.function(function)?.clone();
        if function.inputs.len() != args.len() {
            return Err(anyhow!(
                "{} expects {} arguments, got {}",
                function.name,
                function.inputs.len(),
                args.len()
            ));
        }
        let tokens = function
            .inputs
            .iter()
            .zip(args)
            .map(|(param, arg)| {
                tokenize(&param.kind, arg.trim()).with_context(|| {
                    format!("{}: {:?} is not a valid {}", function.name, arg, param.kind)
                })
            })
            .collect::<Result<Vec<Token>>>()?;
        let data = function.encode_input(&tokens)?;
        Ok(CallInput {
            to: self.address,
            from,
            function,
            data: data.into(),
        })
    }

    /// One line per function, e.g. `setDNA(uint256,uint256) nonpayable`.
    pub fn describe(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .abi
            .functions()
            .map(|f| {
                let inputs = f.inputs.iter().map(|p| p.kind.to_string()).collect::<Vec<_>>();
                let outputs = f.outputs.iter().map(|p| p.kind.to_string()).collect::<Vec<_>>();
                let mutability = match f.state_mutability {
                    StateMutability::Pure => "pure",
                    StateMutability::View => "view",
                    StateMutability::NonPayable => "nonpayable",
                    StateMutability::Payable => "payable",
                };
                if outputs.is_empty() {
                    format!("{}({}) {}", f.name, inputs.join(","), mutability)
                } else {
                    format!(
                        "{}({}) {} returns ({})",
                        f.name,
                        inputs.join(","),
                        mutability,
                        outputs.join(",")
                    )
                }
            })
            .collect();
        lines.sort();
        lines
    }
}

fn strip_hex_prefix(value: &str) -> Option<&str> {
    value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"))
}

// Unsigned integers are decimal unless `0x`-prefixed; other types go through
// the lenient tokenizer.
fn tokenize(kind: &ParamType, value: &str) -> Result<Token> {
    match kind {
        ParamType::Uint(_) => {
            let uint = match strip_hex_prefix(value) {
                Some(hex) => U256::from_str_radix(hex, 16)?,
                None => U256::from_dec_str(value)?,
            };
            Ok(Token::Uint(uint))
        }
        ParamType::Address => {
            Ok(LenientTokenizer::tokenize(kind, strip_hex_prefix(value).unwrap_or(value))?)
        }
        _ => Ok(LenientTokenizer::tokenize(kind, value)?),
    }
}

/// A single encoded contract call, built fresh for each invocation.
#[derive(Debug, Clone)]
pub struct CallInput {
    pub to: Address,
    pub from: Option<Address>,
    pub function: Function,
    pub data: Bytes,
}

impl CallInput {
    pub fn to_typed_transaction(&self) -> TypedTransaction {
        let mut tx = TransactionRequest::new().to(self.to).data(self.data.clone());
        if let Some(from) = self.from {
            tx = tx.from(from);
        }
        tx.into()
    }

    pub fn decode_output(&self, raw: &[u8]) -> Result<Vec<Token>> {
        self.function
            .decode_output(raw)
            .with_context(|| format!("failed to decode {} output", self.function.name))
    }
}
