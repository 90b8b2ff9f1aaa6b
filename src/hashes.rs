// Safe EIP-712 hash composition
//
// 1. domainHash  = keccak256(abi.encode(DOMAIN_SEPARATOR_TYPEHASH, chainId, safe))
// 2. messageHash = keccak256(abi.encode(SAFE_TX_TYPEHASH, to, value, keccak256(data), ...))
// 3. safeTxHash  = keccak256(0x19 || 0x01 || domainHash || messageHash)
//
// Every function here is pure: no I/O, no shared state.

use crate::constants::{DOMAIN_SEPARATOR_TYPEHASH, SAFE_MSG_TYPEHASH, SAFE_TX_TYPEHASH};
use crate::transaction::{RawTransaction, TransactionError, TransactionRecord, ValidationWarning};
use crate::utils::abi::{
    encode_domain_separator, encode_safe_message, encode_safe_tx_message, encode_signing_preimage,
    SAFE_TX_MESSAGE_LEN,
};
use crate::utils::keccak::keccak256_word;
use alloy_primitives::{Address, B256, U256};

/// The three hashes a Safe signer is asked to approve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashTriple {
    pub domain_hash: B256,
    pub message_hash: B256,
    pub safe_tx_hash: B256,
}

/// Hashes of one Safe transaction together with everything that went into them
#[derive(Debug, Clone)]
pub struct SafeTxHashes {
    pub chain_id: u64,
    pub safe_address: Address,
    pub transaction: TransactionRecord,
    pub encoded_message: [u8; SAFE_TX_MESSAGE_LEN],
    pub hashes: HashTriple,
    pub warnings: Vec<ValidationWarning>,
}

/// Hashes of one Safe off-chain message
#[derive(Debug, Clone)]
pub struct SafeMessageHashes {
    pub chain_id: u64,
    pub safe_address: Address,
    pub message: String,
    /// EIP-191 personal_sign hash of the raw message
    pub eip191_hash: B256,
    pub hashes: HashTriple,
}

/// EIP-712 domain separator of a Safe on a given chain
pub fn domain_hash(chain_id: u64, safe_address: Address) -> B256 {
    let encoded = encode_domain_separator(DOMAIN_SEPARATOR_TYPEHASH, U256::from(chain_id), safe_address);
    keccak256_word(&encoded)
}

/// keccak256 of the raw calldata
pub fn data_hash(data: &[u8]) -> B256 {
    keccak256_word(data)
}

/// ABI-encoded SafeTx struct, as hashed into the message hash
pub fn encode_transaction(tx: &TransactionRecord) -> [u8; SAFE_TX_MESSAGE_LEN] {
    encode_safe_tx_message(
        SAFE_TX_TYPEHASH,
        tx.to,
        tx.value,
        data_hash(&tx.data),
        tx.operation,
        tx.safe_tx_gas,
        tx.base_gas,
        tx.gas_price,
        tx.gas_token,
        tx.refund_receiver,
        tx.nonce,
    )
}

/// EIP-712 struct hash of a SafeTx
pub fn message_hash(tx: &TransactionRecord) -> B256 {
    keccak256_word(&encode_transaction(tx))
}

/// Final EIP-712 signing hash
pub fn signing_hash(domain_hash: B256, message_hash: B256) -> B256 {
    keccak256_word(&encode_signing_preimage(domain_hash, message_hash))
}

/// Compute all hashes for a validated transaction
pub fn compute_safe_tx_hashes(
    chain_id: u64,
    safe_address: Address,
    transaction: TransactionRecord,
) -> SafeTxHashes {
    let domain = domain_hash(chain_id, safe_address);
    let encoded_message = encode_transaction(&transaction);
    let message = keccak256_word(&encoded_message);
    let safe_tx_hash = signing_hash(domain, message);

    log::debug!("chain {chain_id}, safe {safe_address}, nonce {}", transaction.nonce);
    log::debug!("data hash: {}", data_hash(&transaction.data));
    log::debug!("domain hash: {domain}");
    log::debug!("message hash: {message}");
    log::debug!("safe tx hash: {safe_tx_hash}");

    let warnings = transaction.warnings();

    SafeTxHashes {
        chain_id,
        safe_address,
        transaction,
        encoded_message,
        hashes: HashTriple {
            domain_hash: domain,
            message_hash: message,
            safe_tx_hash,
        },
        warnings,
    }
}

/// Validate an upstream record, then hash it
///
/// Fails before any hash is produced if a field is malformed.
pub fn hash_raw_transaction(
    chain_id: u64,
    safe_address: Address,
    raw: &RawTransaction,
) -> Result<SafeTxHashes, TransactionError> {
    let transaction = raw.validate()?;
    Ok(compute_safe_tx_hashes(chain_id, safe_address, transaction))
}

/// EIP-191 hash of a message: keccak256("\x19Ethereum Signed Message:\n" || len || message)
pub fn eip191_hash(message: &[u8]) -> B256 {
    let mut preimage = format!("\x19Ethereum Signed Message:\n{}", message.len()).into_bytes();
    preimage.extend_from_slice(message);
    keccak256_word(&preimage)
}

/// Drop a single trailing `\n` or `\r\n`, as left by most editors
///
/// Only one line ending is removed; intentional blank lines before it stay.
pub fn strip_trailing_newline(message: &str) -> &str {
    message
        .strip_suffix("\r\n")
        .or_else(|| message.strip_suffix('\n'))
        .unwrap_or(message)
}

/// Compute all hashes for a Safe off-chain message
///
/// The Safe signs `SafeMessage(bytes message)` where `message` is the EIP-191
/// hash of the text, so the struct hash contains keccak256 of that 32-byte hash.
pub fn compute_message_hashes(chain_id: u64, safe_address: Address, message: &str) -> SafeMessageHashes {
    let domain = domain_hash(chain_id, safe_address);
    let eip191 = eip191_hash(message.as_bytes());
    let struct_hash = keccak256_word(&encode_safe_message(SAFE_MSG_TYPEHASH, keccak256_word(eip191.as_slice())));
    let safe_message_hash = signing_hash(domain, struct_hash);

    log::debug!("eip191 hash: {eip191}");
    log::debug!("safe message hash: {safe_message_hash}");

    SafeMessageHashes {
        chain_id,
        safe_address,
        message: message.to_string(),
        eip191_hash: eip191,
        hashes: HashTriple {
            domain_hash: domain,
            message_hash: struct_hash,
            safe_tx_hash: safe_message_hash,
        },
    }
}
