// Keccak256 hash utilities
// Wrapper around sha3 crate for Ethereum-compatible Keccak256
//
// Ethereum uses the original Keccak padding (0x01), not the NIST SHA3-256
// padding (0x06). sha3::Keccak256 is the former; sha3::Sha3_256 is the latter.

use alloy_primitives::B256;
use sha3::{Digest, Keccak256};

/// Compute Keccak256 hash of input bytes
/// Returns 32-byte hash
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(input);
    hasher.finalize().into()
}

/// Same as [`keccak256`] but typed as a 32-byte word
pub fn keccak256_word(input: &[u8]) -> B256 {
    B256::from(keccak256(input))
}

/// Compute Keccak256 and return as `0x`-prefixed lowercase hex string
pub fn keccak256_hex(input: &[u8]) -> String {
    format!("0x{}", hex::encode(keccak256(input)))
}
