use ethnum::U256;
use merkle_hashers::MerkleHasher;
use serde_json::Value;
use thiserror::Error;
use tree::{Leaf, Node, LEAF_BYTES};

use crate::{Address, ADDRESS_BYTES};

const WORD_BYTES: usize = 32;

/// One allowlist line: who may mint, how many, and at what unit price (wei).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry {
    pub minter: Address,
    pub max_count: U256,
    pub price: U256,
}

impl Entry {
    pub fn new(minter: Address, max_count: impl Into<U256>, price: impl Into<U256>) -> Self {
        Self {
            minter,
            max_count: max_count.into(),
            price: price.into(),
        }
    }

    /// `abi.encode(address minter, uint256 maxCount, uint256 price)`.
    pub fn abi_encode(&self) -> [u8; LEAF_BYTES] {
        let mut data = [0u8; LEAF_BYTES];
        data[WORD_BYTES - ADDRESS_BYTES..WORD_BYTES].copy_from_slice(self.minter.as_bytes());
        data[WORD_BYTES..2 * WORD_BYTES].copy_from_slice(&self.max_count.to_be_bytes());
        data[2 * WORD_BYTES..].copy_from_slice(&self.price.to_be_bytes());
        data
    }

    #[inline]
    pub fn to_leaf(&self) -> Leaf {
        Leaf::new(self.abi_encode())
    }

    #[inline]
    pub fn leaf_hash<H: MerkleHasher>(&self, hasher: &H) -> Node {
        self.to_leaf().leaf_hash(hasher)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("negative values are not allowed")]
    Negative,

    #[error("value does not fit in 256 bits")]
    Overflow,

    #[error("number is not an integer")]
    NotAnInteger,

    #[error("JSON number does not fit in 64 bits; pass it as a decimal string")]
    NumberTooLarge,

    #[error("malformed integer {0:?}")]
    Malformed(String),

    #[error("expected an integer or a numeric string, got {0}")]
    WrongType(&'static str),
}

/// Parses a uint256 from a decimal string or a `0x` hex string.
pub fn parse_quantity_str(text: &str) -> Result<U256, QuantityError> {
    let text = text.trim();
    if text.starts_with('-') {
        return Err(QuantityError::Negative);
    }

    let (digits, radix) = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex_digits) => (hex_digits, 16),
        None => (text, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(QuantityError::Malformed(text.to_string()));
    }

    U256::from_str_radix(digits, radix).map_err(|_| QuantityError::Overflow)
}

/// Parses a uint256 from a JSON number or string.
pub fn parse_quantity(value: &Value) -> Result<U256, QuantityError> {
    match value {
        Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                Ok(U256::from(n))
            } else if number.is_i64() || number.as_f64().is_some_and(|f| f < 0.0) {
                Err(QuantityError::Negative)
            } else if number.as_f64().is_some_and(|f| f >= u64::MAX as f64) {
                // integers past u64 reach us as lossy floats
                Err(QuantityError::NumberTooLarge)
            } else {
                Err(QuantityError::NotAnInteger)
            }
        }
        Value::String(text) => parse_quantity_str(text),
        Value::Null => Err(QuantityError::WrongType("null")),
        Value::Bool(_) => Err(QuantityError::WrongType("a boolean")),
        Value::Array(_) => Err(QuantityError::WrongType("an array")),
        Value::Object(_) => Err(QuantityError::WrongType("an object")),
    }
}

#[cfg(test)]
mod tests {
    use merkle_hashers::Keccak256hasher;
    use serde_json::json;

    use super::*;

    fn minter() -> Address {
        let mut bytes = [0xaa; ADDRESS_BYTES];
        bytes[ADDRESS_BYTES - 1] = 0xa1;
        Address::new(bytes)
    }

    #[test]
    fn test_abi_layout() {
        let entry = Entry::new(minter(), 5u64, 0x0102u64);
        let data = entry.abi_encode();

        assert_eq!(data[..12], [0u8; 12]);
        assert_eq!(&data[12..32], minter().as_bytes());
        assert_eq!(data[32..63], [0u8; 31]);
        assert_eq!(data[63], 5);
        assert_eq!(data[64..94], [0u8; 30]);
        assert_eq!(data[94..], [0x01u8, 0x02]);
    }

    #[test]
    fn test_leaf_golden_vector() {
        let entry = Entry::new(minter(), 5u64, 10_000_000_000_000_000u64);
        assert_eq!(
            entry.leaf_hash(&Keccak256hasher::new()).to_string(),
            "0xefbd3c20f27b69bd5c25d7b5e912fbf902fd0e8926fc3e1b75f5aa5cc41b80d5"
        );
    }

    #[test]
    fn test_every_field_changes_the_leaf() {
        let hasher = Keccak256hasher::new();
        let entry = Entry::new(minter(), 5u64, 100u64);
        let leaf = entry.leaf_hash(&hasher);

        let mut other = entry;
        other.minter = Address::new([0xbb; ADDRESS_BYTES]);
        assert_ne!(other.leaf_hash(&hasher), leaf);

        let mut other = entry;
        other.max_count = U256::from(6u64);
        assert_ne!(other.leaf_hash(&hasher), leaf);

        let mut other = entry;
        other.price = U256::from(101u64);
        assert_ne!(other.leaf_hash(&hasher), leaf);

        // swapping count and price is not the same entry either
        let swapped = Entry::new(minter(), 100u64, 5u64);
        assert_ne!(swapped.leaf_hash(&hasher), leaf);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(&json!(5)), Ok(U256::from(5u64)));
        assert_eq!(
            parse_quantity(&json!("80000000000000000")),
            Ok(U256::from(80_000_000_000_000_000u64))
        );
        assert_eq!(parse_quantity(&json!("0x10")), Ok(U256::from(16u64)));
        assert_eq!(
            parse_quantity(&json!(
                "115792089237316195423570985008687907853269984665640564039457584007913129639935"
            )),
            Ok(U256::MAX)
        );
    }

    #[test]
    fn test_parse_quantity_rejects() {
        assert_eq!(parse_quantity(&json!(-1)), Err(QuantityError::Negative));
        assert_eq!(parse_quantity(&json!("-1")), Err(QuantityError::Negative));
        assert_eq!(parse_quantity(&json!(1.5)), Err(QuantityError::NotAnInteger));
        assert_eq!(
            parse_quantity(&json!(
                "115792089237316195423570985008687907853269984665640564039457584007913129639936"
            )),
            Err(QuantityError::Overflow)
        );
        assert!(matches!(
            parse_quantity(&json!("1e18")),
            Err(QuantityError::Malformed(_))
        ));
        assert!(matches!(parse_quantity(&json!("")), Err(QuantityError::Malformed(_))));
        assert_eq!(parse_quantity(&json!(null)), Err(QuantityError::WrongType("null")));
    }

    #[test]
    fn test_large_json_number_asks_for_a_string() {
        let just_above_u64: Value = serde_json::from_str("18446744073709551616").unwrap();
        assert_eq!(parse_quantity(&just_above_u64), Err(QuantityError::NumberTooLarge));
        assert_eq!(
            parse_quantity(&json!(u64::MAX)),
            Ok(U256::from(u64::MAX))
        );
        assert_eq!(
            parse_quantity(&json!("18446744073709551616")),
            Ok(U256::from(u64::MAX) + U256::ONE)
        );
    }
}
