// Safe transaction record and its validation
//
// RawTransaction is what the Safe Transaction Service (or a local JSON file)
// hands us: every field optional, numbers as JSON strings or JSON numbers.
// TransactionRecord is the typed, range-checked form the encoder consumes.

use crate::constants::ZERO_ADDRESS;
use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Safe operation codes
pub const OPERATION_CALL: u8 = 0;
pub const OPERATION_DELEGATE_CALL: u8 = 1;

/// A numeric field as it appears upstream: `"1000"` or `1000`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Text(String),
    Number(serde_json::Number),
}

impl RawScalar {
    fn as_text(&self) -> String {
        match self {
            RawScalar::Text(s) => s.trim().to_string(),
            RawScalar::Number(n) => n.to_string(),
        }
    }
}

impl From<u64> for RawScalar {
    fn from(value: u64) -> Self {
        RawScalar::Number(value.into())
    }
}

impl From<&str> for RawScalar {
    fn from(value: &str) -> Self {
        RawScalar::Text(value.to_string())
    }
}

/// Human-readable decoding of the calldata; informational only, never hashed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedCall {
    pub method: String,
    #[serde(default)]
    pub parameters: Vec<DecodedParameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: serde_json::Value,
}

/// Unvalidated transaction as received upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub value: Option<RawScalar>,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub operation: Option<RawScalar>,
    #[serde(default)]
    pub safe_tx_gas: Option<RawScalar>,
    #[serde(default)]
    pub base_gas: Option<RawScalar>,
    #[serde(default)]
    pub gas_price: Option<RawScalar>,
    #[serde(default)]
    pub gas_token: Option<String>,
    #[serde(default)]
    pub refund_receiver: Option<String>,
    #[serde(default)]
    pub nonce: Option<RawScalar>,
    #[serde(default)]
    pub data_decoded: Option<DecodedCall>,
}

/// Validated Safe transaction, ready for encoding
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionRecord {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub operation: u8,
    pub safe_tx_gas: U256,
    pub base_gas: U256,
    pub gas_price: U256,
    pub gas_token: Address,
    pub refund_receiver: Address,
    pub nonce: U256,
    pub decoded: Option<DecodedCall>,
}

/// Suspicious but hashable transaction properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationWarning {
    /// Operation outside {0, 1}; not a valid Safe operation
    UnknownOperation { operation: u8 },
    /// The Safe will delegatecall into `to`, running its code with the Safe's storage
    DelegateCall { target: Address },
    /// Refunds are paid in a token instead of the native coin
    CustomGasToken { token: Address },
    /// Refunds go to someone other than tx.origin
    CustomRefundReceiver { receiver: Address },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::UnknownOperation { operation } => write!(
                f,
                "operation {operation} is neither call (0) nor delegatecall (1)"
            ),
            ValidationWarning::DelegateCall { target } => {
                write!(f, "transaction delegatecalls into {target}; make sure the target is trusted")
            }
            ValidationWarning::CustomGasToken { token } => {
                write!(f, "gas refund is paid in token {token}")
            }
            ValidationWarning::CustomRefundReceiver { receiver } => {
                write!(f, "gas refund is sent to {receiver}")
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    #[error("Missing field `{field}`")]
    MissingField { field: &'static str },

    #[error("Invalid address in field `{field}`: {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("Field `{field}` is not a non-negative integer: {value:?}")]
    InvalidInteger { field: &'static str, value: String },

    #[error("Field `{field}` does not fit in uint{bits}: {value}")]
    OutOfRange { field: &'static str, bits: usize, value: String },

    #[error("Field `data` is not valid hex: {reason}")]
    InvalidData { reason: String },
}

impl RawTransaction {
    /// Validate every field and convert to a typed record
    ///
    /// Absent addresses become the zero address, absent data becomes `0x`,
    /// absent gas fields become zero. `value`, `operation` and `nonce` are
    /// required. Semantic warnings are logged, never rejected.
    pub fn validate(&self) -> Result<TransactionRecord, TransactionError> {
        let record = TransactionRecord {
            to: parse_address("to", self.to.as_deref())?,
            value: parse_required_uint("value", self.value.as_ref(), 256)?,
            data: parse_data(self.data.as_deref())?,
            operation: parse_operation(self.operation.as_ref())?,
            safe_tx_gas: parse_optional_uint("safeTxGas", self.safe_tx_gas.as_ref())?,
            base_gas: parse_optional_uint("baseGas", self.base_gas.as_ref())?,
            gas_price: parse_optional_uint("gasPrice", self.gas_price.as_ref())?,
            gas_token: parse_address("gasToken", self.gas_token.as_deref())?,
            refund_receiver: parse_address("refundReceiver", self.refund_receiver.as_deref())?,
            nonce: parse_required_uint("nonce", self.nonce.as_ref(), 256)?,
            decoded: self.data_decoded.clone(),
        };

        for warning in record.warnings() {
            log::warn!("Transaction with nonce {}: {}", record.nonce, warning);
        }

        Ok(record)
    }
}

impl TransactionRecord {
    /// Semantic checks on a syntactically valid record
    pub fn warnings(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        match self.operation {
            OPERATION_CALL => {}
            OPERATION_DELEGATE_CALL => {
                warnings.push(ValidationWarning::DelegateCall { target: self.to });
            }
            operation => warnings.push(ValidationWarning::UnknownOperation { operation }),
        }

        if self.gas_token != ZERO_ADDRESS {
            warnings.push(ValidationWarning::CustomGasToken { token: self.gas_token });
        }

        if self.refund_receiver != ZERO_ADDRESS {
            warnings.push(ValidationWarning::CustomRefundReceiver {
                receiver: self.refund_receiver,
            });
        }

        warnings
    }

    /// Label for the operation code
    pub fn operation_label(&self) -> &'static str {
        match self.operation {
            OPERATION_CALL => "Call",
            OPERATION_DELEGATE_CALL => "DelegateCall",
            _ => "Unknown",
        }
    }

    /// Decoded method name, if the upstream provided one
    pub fn method(&self) -> Option<&str> {
        self.decoded.as_ref().map(|d| d.method.as_str())
    }
}

/// Parse a `0x`-prefixed 40 hex digit address; absent or empty means zero address
pub fn parse_address(field: &'static str, value: Option<&str>) -> Result<Address, TransactionError> {
    let raw = match value.map(str::trim) {
        None | Some("") => return Ok(ZERO_ADDRESS),
        Some(raw) => raw,
    };

    let invalid = || TransactionError::InvalidAddress {
        field,
        value: raw.to_string(),
    };

    let digits = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")).ok_or_else(invalid)?;
    if digits.len() != 40 {
        return Err(invalid());
    }

    let bytes = hex::decode(digits).map_err(|_| invalid())?;
    Ok(Address::from_slice(&bytes))
}

/// Parse a non-negative decimal (or `0x` hex) integer that fits in `bits`
fn parse_uint(field: &'static str, value: &RawScalar, bits: usize) -> Result<U256, TransactionError> {
    let text = value.as_text();
    let invalid = || TransactionError::InvalidInteger {
        field,
        value: text.clone(),
    };

    let (digits, radix) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => (digits, 16),
        None => (text.as_str(), 10),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }

    let out_of_range = || TransactionError::OutOfRange {
        field,
        bits,
        value: text.clone(),
    };

    // Only overflow is left once every digit is known to be valid
    let parsed = U256::from_str_radix(digits, u64::from(radix)).map_err(|_| out_of_range())?;
    if parsed.bit_len() > bits {
        return Err(out_of_range());
    }

    Ok(parsed)
}

fn parse_required_uint(
    field: &'static str,
    value: Option<&RawScalar>,
    bits: usize,
) -> Result<U256, TransactionError> {
    let value = value.ok_or(TransactionError::MissingField { field })?;
    parse_uint(field, value, bits)
}

fn parse_optional_uint(field: &'static str, value: Option<&RawScalar>) -> Result<U256, TransactionError> {
    match value {
        Some(value) => parse_uint(field, value, 256),
        None => Ok(U256::ZERO),
    }
}

fn parse_operation(value: Option<&RawScalar>) -> Result<u8, TransactionError> {
    let operation = parse_required_uint("operation", value, 8)?;
    u8::try_from(operation).map_err(|_| TransactionError::OutOfRange {
        field: "operation",
        bits: 8,
        value: operation.to_string(),
    })
}

/// Parse hex calldata; absent, empty or `0x` means no calldata
fn parse_data(value: Option<&str>) -> Result<Bytes, TransactionError> {
    let raw = value.map(str::trim).unwrap_or("");
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);

    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| TransactionError::InvalidData { reason: e.to_string() })
}
