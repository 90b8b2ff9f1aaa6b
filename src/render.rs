// Output renderers
//
// Two independent views over the same computed value: structured JSON and
// labelled terminal text. Neither one touches the hashing pipeline.
//
// In the text view the domain and message hashes use the display case
// (0x + uppercase body) while the safe transaction hash stays lowercase.

use crate::hashes::{SafeMessageHashes, SafeTxHashes};
use crate::transaction::DecodedParameter;
use crate::utils::format::{display_word, to_hex};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Structured output for one Safe transaction
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReport {
    pub transaction_data: TransactionData,
    pub hashes: HashesReport,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    pub multisig_address: String,
    pub chain_id: String,
    pub to: String,
    pub value: String,
    pub data: String,
    pub operation: String,
    pub safe_tx_gas: String,
    pub base_gas: String,
    pub gas_price: String,
    pub gas_token: String,
    pub refund_receiver: String,
    pub nonce: String,
    pub encoded_message: String,
    pub method: Option<String>,
    pub parameters: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashesReport {
    pub domain_hash: String,
    pub message_hash: String,
    pub safe_transaction_hash: String,
}

/// Structured output for one Safe off-chain message
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReport {
    pub multisig_address: String,
    pub chain_id: String,
    pub message: String,
    pub eip191_hash: String,
    pub hashes: HashesReport,
}

/// Compact JSON array of the decoded parameters, `None` when there are none
///
/// Built as a `Value` tree so rendering cannot fail.
fn parameters_json(parameters: &[DecodedParameter]) -> Option<String> {
    if parameters.is_empty() {
        return None;
    }
    let entries = parameters
        .iter()
        .map(|p| {
            serde_json::json!({
                "name": p.name,
                "type": p.kind,
                "value": p.value,
            })
        })
        .collect();
    Some(Value::Array(entries).to_string())
}

impl From<&SafeTxHashes> for TransactionReport {
    fn from(result: &SafeTxHashes) -> Self {
        let tx = &result.transaction;

        TransactionReport {
            transaction_data: TransactionData {
                multisig_address: result.safe_address.to_string(),
                chain_id: result.chain_id.to_string(),
                to: tx.to.to_string(),
                value: tx.value.to_string(),
                data: to_hex(&tx.data),
                operation: tx.operation.to_string(),
                safe_tx_gas: tx.safe_tx_gas.to_string(),
                base_gas: tx.base_gas.to_string(),
                gas_price: tx.gas_price.to_string(),
                gas_token: tx.gas_token.to_string(),
                refund_receiver: tx.refund_receiver.to_string(),
                nonce: tx.nonce.to_string(),
                encoded_message: to_hex(&result.encoded_message),
                method: tx.method().map(str::to_string),
                parameters: tx.decoded.as_ref().and_then(|d| parameters_json(&d.parameters)),
            },
            hashes: HashesReport {
                domain_hash: to_hex(result.hashes.domain_hash.as_slice()),
                message_hash: to_hex(result.hashes.message_hash.as_slice()),
                safe_transaction_hash: to_hex(result.hashes.safe_tx_hash.as_slice()),
            },
            warnings: result.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

impl From<&SafeMessageHashes> for MessageReport {
    fn from(result: &SafeMessageHashes) -> Self {
        MessageReport {
            multisig_address: result.safe_address.to_string(),
            chain_id: result.chain_id.to_string(),
            message: result.message.clone(),
            eip191_hash: to_hex(result.eip191_hash.as_slice()),
            hashes: HashesReport {
                domain_hash: to_hex(result.hashes.domain_hash.as_slice()),
                message_hash: to_hex(result.hashes.message_hash.as_slice()),
                safe_transaction_hash: to_hex(result.hashes.safe_tx_hash.as_slice()),
            },
        }
    }
}

/// Pretty-printed structured JSON for a transaction
pub fn to_json(result: &SafeTxHashes) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&TransactionReport::from(result))
}

/// Pretty-printed structured JSON for an off-chain message
pub fn message_to_json(result: &SafeMessageHashes) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&MessageReport::from(result))
}

/// Terminal view of a transaction
pub struct TextReport<'a>(pub &'a SafeTxHashes);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let tx = &result.transaction;

        writeln!(f, "Transaction Data")?;
        writeln!(f, "Multisig address: {}", result.safe_address)?;
        writeln!(f, "Chain ID: {}", result.chain_id)?;
        writeln!(f, "To: {}", tx.to)?;
        writeln!(f, "Value: {}", tx.value)?;
        writeln!(f, "Data: {}", to_hex(&tx.data))?;
        writeln!(f, "Operation: {} ({})", tx.operation_label(), tx.operation)?;
        writeln!(f, "Safe Transaction Gas: {}", tx.safe_tx_gas)?;
        writeln!(f, "Base Gas: {}", tx.base_gas)?;
        writeln!(f, "Gas Price: {}", tx.gas_price)?;
        writeln!(f, "Gas Token: {}", tx.gas_token)?;
        writeln!(f, "Refund Receiver: {}", tx.refund_receiver)?;
        writeln!(f, "Nonce: {}", tx.nonce)?;
        writeln!(f, "Encoded message: {}", to_hex(&result.encoded_message))?;
        writeln!(f, "Method: {}", tx.method().unwrap_or("0x"))?;
        match tx.decoded.as_ref().and_then(|d| parameters_json(&d.parameters)) {
            Some(parameters) => writeln!(f, "Parameters: {parameters}")?,
            None => writeln!(f, "Parameters: []")?,
        }
        writeln!(f)?;

        writeln!(f, "Hashes")?;
        writeln!(f, "Domain hash: {}", display_word(&result.hashes.domain_hash))?;
        writeln!(f, "Message hash: {}", display_word(&result.hashes.message_hash))?;
        write!(f, "Safe transaction hash: {}", to_hex(result.hashes.safe_tx_hash.as_slice()))?;

        if !result.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "Warnings")?;
            for warning in &result.warnings {
                write!(f, "\n- {warning}")?;
            }
        }

        Ok(())
    }
}

/// Terminal view of an off-chain message
pub struct MessageTextReport<'a>(pub &'a SafeMessageHashes);

impl fmt::Display for MessageTextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;

        writeln!(f, "Message Data")?;
        writeln!(f, "Multisig address: {}", result.safe_address)?;
        writeln!(f, "Chain ID: {}", result.chain_id)?;
        writeln!(f, "Message: {}", result.message)?;
        writeln!(f, "EIP-191 hash: {}", to_hex(result.eip191_hash.as_slice()))?;
        writeln!(f)?;

        writeln!(f, "Hashes")?;
        writeln!(f, "Domain hash: {}", display_word(&result.hashes.domain_hash))?;
        writeln!(f, "Message hash: {}", display_word(&result.hashes.message_hash))?;
        write!(f, "Safe message hash: {}", to_hex(result.hashes.safe_tx_hash.as_slice()))
    }
}

/// Labelled key/value text for a transaction
pub fn to_text(result: &SafeTxHashes) -> String {
    TextReport(result).to_string()
}

/// Labelled key/value text for an off-chain message
pub fn message_to_text(result: &SafeMessageHashes) -> String {
    MessageTextReport(result).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashes::compute_safe_tx_hashes;
    use crate::transaction::{DecodedCall, TransactionRecord};
    use alloy_primitives::{address, Address};

    const SAFE: Address = address!("1234567890123456789012345678901234567890");

    #[test]
    fn test_text_hash_casing() {
        let result = compute_safe_tx_hashes(1, SAFE, TransactionRecord::default());
        let text = to_text(&result);

        assert!(text.contains(
            "Domain hash: 0x3888D34B69042FC92D822804722836D705E22C56EFD96E8E04C0DE3EC131831B"
        ));
        assert!(text.contains(
            "Message hash: 0x0DBBB7B51E261FF463B48851DFE9C0350BBF798B406605D374EC8C22AB65AE43"
        ));
        assert!(text.contains(
            "Safe transaction hash: 0x4ab5d2bc0ea050d1a3180cd143211f578b13ac46e74ed9bcf9d8ee4ae29ca1b2"
        ));
    }

    #[test]
    fn test_text_sections_in_order() {
        let result = compute_safe_tx_hashes(1, SAFE, TransactionRecord::default());
        let text = to_text(&result);

        let data_at = text.find("Transaction Data").unwrap();
        let hashes_at = text.find("Hashes").unwrap();
        assert!(data_at < hashes_at);
        assert!(!text.contains("Warnings"));
    }

    #[test]
    fn test_text_lists_warnings() {
        let tx = TransactionRecord {
            operation: 2,
            ..Default::default()
        };
        let text = to_text(&compute_safe_tx_hashes(1, SAFE, tx));

        assert!(text.contains("Warnings"));
        assert!(text.contains("neither call (0) nor delegatecall (1)"));
    }

    #[test]
    fn test_decoded_parameters_rendered() {
        let tx = TransactionRecord {
            decoded: Some(DecodedCall {
                method: "transfer".to_string(),
                parameters: vec![
                    DecodedParameter {
                        name: "to".to_string(),
                        kind: "address".to_string(),
                        value: serde_json::json!("0xABcdEFABcdEFabcdEfAbCdefabcdeFABcDEFabCD"),
                    },
                    DecodedParameter {
                        name: "amounts".to_string(),
                        kind: "uint256[]".to_string(),
                        value: serde_json::json!(["1", "2"]),
                    },
                ],
            }),
            ..Default::default()
        };
        let text = to_text(&compute_safe_tx_hashes(1, SAFE, tx));

        assert!(text.contains("Method: transfer"));
        assert!(text.contains(r#""name":"to","type":"address""#));
        assert!(text.contains(r#""value":["1","2"]"#));
        assert!(!text.contains("Parameters: []"));
    }

    #[test]
    fn test_json_shape() {
        let result = compute_safe_tx_hashes(1, SAFE, TransactionRecord::default());
        let value: serde_json::Value = serde_json::from_str(&to_json(&result).unwrap()).unwrap();

        let data = &value["transactionData"];
        assert_eq!(data["multisigAddress"], "0x1234567890123456789012345678901234567890");
        assert_eq!(data["to"], "0x0000000000000000000000000000000000000000");
        assert_eq!(data["data"], "0x");
        assert_eq!(data["encodedMessage"].as_str().unwrap().len(), 2 + 2 * 352);
        assert!(data["method"].is_null());

        let hashes = &value["hashes"];
        assert_eq!(
            hashes["safeTransactionHash"],
            "0x4ab5d2bc0ea050d1a3180cd143211f578b13ac46e74ed9bcf9d8ee4ae29ca1b2"
        );
        assert!(value.get("warnings").is_none());
    }
}
