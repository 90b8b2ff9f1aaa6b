// Constants for Safe transaction hashing
// Type hashes are keccak256 of the canonical EIP-712 struct signatures,
// fixed here so they are never recomputed at run time.

use alloy_primitives::{b256, Address, B256};

/// keccak256("EIP712Domain(uint256 chainId,address verifyingContract)")
pub const DOMAIN_SEPARATOR_TYPEHASH: B256 =
    b256!("47e79534a245952e8b16893a336b85a3d9ea9fa8c573f3d803afb92a79469218");

/// keccak256("SafeTx(address to,uint256 value,bytes data,uint8 operation,uint256 safeTxGas,uint256 baseGas,uint256 gasPrice,address gasToken,address refundReceiver,uint256 nonce)")
pub const SAFE_TX_TYPEHASH: B256 =
    b256!("bb8310d486368db6bd6f849402fdd73ad53d316b5a4b2644ad6efe0f941286d8");

/// keccak256("SafeMessage(bytes message)")
pub const SAFE_MSG_TYPEHASH: B256 =
    b256!("60b3cbf8b4a223d68d641b3b6ddf9a298e7f33710cf3d3a9d1146b5a6150fbca");

/// keccak256 of empty input, i.e. the data hash of a transaction with `0x` calldata
pub const EMPTY_DATA_HASH: B256 =
    b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");

/// Placeholder for absent address fields
pub const ZERO_ADDRESS: Address = Address::ZERO;

/// Canonical struct signatures the type hashes are derived from
pub mod type_strings {
    pub const DOMAIN_SEPARATOR: &str = "EIP712Domain(uint256 chainId,address verifyingContract)";

    pub const SAFE_TX: &str = "SafeTx(address to,uint256 value,bytes data,uint8 operation,uint256 safeTxGas,uint256 baseGas,uint256 gasPrice,address gasToken,address refundReceiver,uint256 nonce)";

    pub const SAFE_MSG: &str = "SafeMessage(bytes message)";
}
