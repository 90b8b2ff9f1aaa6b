// Utility modules for Safe transaction hashing

pub mod abi;
pub mod format;
pub mod keccak;
