//! Text rendering of call results for the output fields.

use ethers_core::abi::Token;
use ethers_core::types::Bytes;
use std::fmt;

/// Result of a read-only call: the raw return data and its decoded values.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutcome {
    pub raw: Bytes,
    pub tokens: Vec<Token>,
}

impl ReadOutcome {
    pub fn raw_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.raw))
    }
}

/// A single value renders bare, several render as a tuple. Output that did
/// not decode renders as the raw hex the node returned.
impl fmt::Display for ReadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tokens.as_slice() {
            [] => f.write_str(&self.raw_hex()),
            [single] => f.write_str(&render_token(single)),
            many => f.write_str(&render_list(many, "(", ")")),
        }
    }
}

pub fn render_token(token: &Token) -> String {
    match token {
        Token::Uint(value) => value.to_string(),
        Token::Int(value) => {
            // two's complement, as the ABI encodes it
            if value.bit(255) {
                format!("-{}", (!*value).overflowing_add(1.into()).0)
            } else {
                value.to_string()
            }
        }
        Token::Address(address) => format!("{:?}", address),
        Token::Bool(value) => value.to_string(),
        Token::String(value) => value.clone(),
        Token::Bytes(bytes) | Token::FixedBytes(bytes) => format!("0x{}", hex::encode(bytes)),
        Token::Array(items) | Token::FixedArray(items) => render_list(items, "[", "]"),
        Token::Tuple(items) => render_list(items, "(", ")"),
    }
}

fn render_list(items: &[Token], open: &str, close: &str) -> String {
    let inner = items.iter().map(render_token).collect::<Vec<_>>().join(", ");
    format!("{}{}{}", open, inner, close)
}
