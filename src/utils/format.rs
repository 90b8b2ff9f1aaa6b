// Hex display helpers shared by the renderers

use alloy_primitives::B256;

/// Render bytes as `0x`-prefixed lowercase hex
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Display case used for domain and message hashes: lowercase `0x`, uppercase body
///
/// Accepts input with or without a `0x`/`0X` prefix. Applying it twice yields
/// the same string as applying it once.
pub fn format_display_hash(hash: &str) -> String {
    let body = hash
        .strip_prefix("0x")
        .or_else(|| hash.strip_prefix("0X"))
        .unwrap_or(hash);
    format!("0x{}", body.to_ascii_uppercase())
}

/// [`format_display_hash`] applied to a 32-byte word
pub fn display_word(hash: &B256) -> String {
    format!("0x{}", hex::encode_upper(hash.as_slice()))
}
