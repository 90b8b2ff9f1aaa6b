// Static ABI encoding for the fixed Safe structures
//
// Every value occupies one 32-byte big-endian word: integers and addresses are
// left-padded with zeros, 32-byte hashes are copied as-is. Dynamic `bytes`
// fields never appear inline; EIP-712 replaces them with keccak256(bytes).
//
// The signing preimage is the exception: it is packed (0x19 0x01 || domain ||
// message) with no word alignment.

use alloy_primitives::{Address, B256, U256};

/// Size of one ABI word
pub const WORD_SIZE: usize = 32;

/// EIP712Domain(chainId, verifyingContract) with its type hash: 3 words
pub const DOMAIN_SEPARATOR_LEN: usize = 3 * WORD_SIZE;

/// SafeTx with its type hash: 11 words
pub const SAFE_TX_MESSAGE_LEN: usize = 11 * WORD_SIZE;

/// SafeMessage with its type hash: 2 words
pub const SAFE_MESSAGE_LEN: usize = 2 * WORD_SIZE;

/// 0x19 0x01 || domainHash || messageHash
pub const SIGNING_PREIMAGE_LEN: usize = 2 + 2 * WORD_SIZE;

/// EIP-191 version byte prefix for structured data
pub const EIP712_PREFIX: [u8; 2] = [0x19, 0x01];

/// Encode a uint256 as a big-endian word
pub fn uint_word(value: U256) -> [u8; WORD_SIZE] {
    value.to_be_bytes::<WORD_SIZE>()
}

/// Encode a uint8 as a word (value in the last byte)
pub fn uint8_word(value: u8) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - 1] = value;
    word
}

/// Encode a 20-byte address as a left-padded word
pub fn address_word(address: Address) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - 20..].copy_from_slice(address.as_slice());
    word
}

/// Concatenate words into a fixed-size buffer
///
/// `N` must equal `words.len() * WORD_SIZE`; all callers pass constant layouts.
fn concat_words<const N: usize>(words: &[[u8; WORD_SIZE]]) -> [u8; N] {
    debug_assert_eq!(words.len() * WORD_SIZE, N);

    let mut out = [0u8; N];
    for (slot, word) in out.chunks_exact_mut(WORD_SIZE).zip(words) {
        slot.copy_from_slice(word);
    }
    out
}

/// abi.encode(domainTypeHash, chainId, verifyingContract)
pub fn encode_domain_separator(
    domain_type_hash: B256,
    chain_id: U256,
    verifying_contract: Address,
) -> [u8; DOMAIN_SEPARATOR_LEN] {
    concat_words(&[
        domain_type_hash.0,
        uint_word(chain_id),
        address_word(verifying_contract),
    ])
}

/// abi.encode(SAFE_TX_TYPEHASH, to, value, keccak256(data), operation,
/// safeTxGas, baseGas, gasPrice, gasToken, refundReceiver, nonce)
///
/// `data_hash` must already be keccak256 of the raw calldata, so the encoding
/// is 352 bytes whatever the calldata length.
#[allow(clippy::too_many_arguments)]
pub fn encode_safe_tx_message(
    tx_type_hash: B256,
    to: Address,
    value: U256,
    data_hash: B256,
    operation: u8,
    safe_tx_gas: U256,
    base_gas: U256,
    gas_price: U256,
    gas_token: Address,
    refund_receiver: Address,
    nonce: U256,
) -> [u8; SAFE_TX_MESSAGE_LEN] {
    concat_words(&[
        tx_type_hash.0,
        address_word(to),
        uint_word(value),
        data_hash.0,
        uint8_word(operation),
        uint_word(safe_tx_gas),
        uint_word(base_gas),
        uint_word(gas_price),
        address_word(gas_token),
        address_word(refund_receiver),
        uint_word(nonce),
    ])
}

/// abi.encode(SAFE_MSG_TYPEHASH, keccak256(message))
pub fn encode_safe_message(msg_type_hash: B256, message_hash: B256) -> [u8; SAFE_MESSAGE_LEN] {
    concat_words(&[msg_type_hash.0, message_hash.0])
}

/// abi.encodePacked(0x19, 0x01, domainHash, messageHash)
pub fn encode_signing_preimage(domain_hash: B256, message_hash: B256) -> [u8; SIGNING_PREIMAGE_LEN] {
    let mut buffer = [0u8; SIGNING_PREIMAGE_LEN];
    buffer[0..2].copy_from_slice(&EIP712_PREFIX);
    buffer[2..34].copy_from_slice(domain_hash.as_slice());
    buffer[34..66].copy_from_slice(message_hash.as_slice());
    buffer
}
