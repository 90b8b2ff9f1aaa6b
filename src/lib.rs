// Safe transaction hash verification
// Recomputes the EIP-712 domain, message and signing hashes of a Safe
// multisig transaction without trusting the service that proposed it.

pub mod api;
pub mod constants;
pub mod hashes;
pub mod networks;
pub mod render;
pub mod transaction;
pub mod utils;

// Re-export commonly used types
pub use constants::*;
pub use networks::Network;
pub use transaction::{RawTransaction, TransactionError, TransactionRecord, ValidationWarning};

// Re-export hashing functions
pub use hashes::{
    compute_message_hashes, compute_safe_tx_hashes, hash_raw_transaction,
    HashTriple, SafeMessageHashes, SafeTxHashes,
};
pub use utils::format::format_display_hash;
pub use utils::keccak::keccak256;
