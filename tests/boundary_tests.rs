// Boundary and Edge Case Tests
// Tests that verify behavior at boundaries and extreme values

use alloy_primitives::{address, b256, Address, Bytes, U256};
use safe_tx_hashes::constants::EMPTY_DATA_HASH;
use safe_tx_hashes::hashes::{compute_safe_tx_hashes, data_hash, encode_transaction};
use safe_tx_hashes::utils::abi::SAFE_TX_MESSAGE_LEN;
use safe_tx_hashes::{format_display_hash, RawTransaction, TransactionRecord, ValidationWarning};

const SAFE: Address = address!("1234567890123456789012345678901234567890");

#[cfg(test)]
mod data_length_tests {
    use super::*;

    #[test]
    fn test_empty_data_uses_empty_keccak() {
        let encoded = encode_transaction(&TransactionRecord::default());
        assert_eq!(&encoded[96..128], EMPTY_DATA_HASH.as_slice());
    }

    #[test]
    fn test_long_data_fixed_encoding_length() {
        let data: Vec<u8> = (0..512u32).map(|i| (i % 256) as u8).collect();
        let tx = TransactionRecord {
            data: Bytes::from(data),
            ..Default::default()
        };

        assert_eq!(
            data_hash(&tx.data),
            b256!("f55ba327291604f0e5be6651752398b7be2331aad65f5763ce067df95cc13be1")
        );

        let result = compute_safe_tx_hashes(1, SAFE, tx);
        assert_eq!(result.encoded_message.len(), SAFE_TX_MESSAGE_LEN);
        assert_eq!(
            result.hashes.message_hash,
            b256!("f88ddd3b881dda49fe99c996619a1b42cb0df2d3e2e4d0c41be55af159059a44")
        );
        assert_eq!(
            result.hashes.safe_tx_hash,
            b256!("7ba6157501e9cbdaa2f924838d9691d24edd01bed2a5fa83516bfb014b88d293")
        );
    }

    #[test]
    fn test_encoding_length_independent_of_data() {
        for len in [0usize, 1, 31, 32, 33, 136, 300, 4096] {
            let tx = TransactionRecord {
                data: Bytes::from(vec![0xAB; len]),
                ..Default::default()
            };
            assert_eq!(encode_transaction(&tx).len(), 352, "data length {len}");
        }
    }
}

#[cfg(test)]
mod value_range_tests {
    use super::*;

    #[test]
    fn test_all_fields_at_maximum() {
        let max_address = Address::repeat_byte(0xFF);
        let tx = TransactionRecord {
            to: max_address,
            value: U256::MAX,
            data: Bytes::new(),
            operation: u8::MAX,
            safe_tx_gas: U256::MAX,
            base_gas: U256::MAX,
            gas_price: U256::MAX,
            gas_token: max_address,
            refund_receiver: max_address,
            nonce: U256::MAX,
            decoded: None,
        };

        let result = compute_safe_tx_hashes(1, SAFE, tx);
        assert_eq!(
            result.hashes.message_hash,
            b256!("896650f80801fbe796523c456585362fab55f71cf3fa61bf3d417a3cfe70b8c2")
        );
        assert_eq!(
            result.hashes.safe_tx_hash,
            b256!("7d833407b43869e8a1bfde0f3b30a87711e015dc3edebec89ff3d78ab0c445cd")
        );
        assert!(result
            .warnings
            .contains(&ValidationWarning::UnknownOperation { operation: 255 }));
    }

    #[test]
    fn test_hashes_are_32_bytes() {
        let result = compute_safe_tx_hashes(u64::MAX, Address::repeat_byte(0xFF), TransactionRecord::default());

        assert_eq!(result.hashes.domain_hash.len(), 32);
        assert_eq!(result.hashes.message_hash.len(), 32);
        assert_eq!(result.hashes.safe_tx_hash.len(), 32);
    }

    #[test]
    fn test_operation_boundary_warnings() {
        for operation in 0..=u8::MAX {
            let tx = TransactionRecord {
                operation,
                ..Default::default()
            };
            let unknown = tx
                .warnings()
                .iter()
                .any(|w| matches!(w, ValidationWarning::UnknownOperation { .. }));

            assert_eq!(unknown, operation > 1, "operation {operation}");
        }
    }

    #[test]
    fn test_raw_operation_256_rejected() {
        let raw: RawTransaction =
            serde_json::from_str(r#"{"value": "0", "operation": 256, "nonce": 0}"#).unwrap();
        assert!(raw.validate().is_err());
    }

    #[test]
    fn test_raw_negative_nonce_rejected() {
        let raw: RawTransaction =
            serde_json::from_str(r#"{"value": "0", "operation": 0, "nonce": -1}"#).unwrap();
        let err = raw.validate().unwrap_err();
        assert!(err.to_string().contains("nonce"));
    }

    #[test]
    fn test_raw_fractional_value_rejected() {
        let raw: RawTransaction =
            serde_json::from_str(r#"{"value": 1.5, "operation": 0, "nonce": 0}"#).unwrap();
        let err = raw.validate().unwrap_err();
        assert!(err.to_string().contains("value"));
    }
}

#[cfg(test)]
mod display_format_tests {
    use super::*;

    #[test]
    fn test_display_case_idempotent() {
        let inputs = [
            "0x3888d34b69042fc92d822804722836d705e22c56efd96e8e04c0de3ec131831b",
            "0X3888D34B",
            "abcdef",
            "0x",
        ];

        for input in inputs {
            let once = format_display_hash(input);
            assert_eq!(format_display_hash(&once), once);
            assert!(once.starts_with("0x"));
            assert_eq!(once[2..], once[2..].to_ascii_uppercase());
        }
    }
}
