use std::fmt;
use std::str::FromStr;

use merkle_hashers::{Keccak256hasher, MerkleHasher};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub const ADDRESS_BYTES: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("expected 40 hex characters, got {0}")]
    InvalidLength(usize),

    #[error("address is not valid hex")]
    InvalidHex,

    #[error("mixed-case address fails its EIP-55 checksum, expected {0}")]
    BadChecksum(String),

    #[error("address is not EIP-55 checksummed, expected {0}")]
    MissingChecksum(String),
}

/// A 20 byte account address.
///
/// Equality and hashing only ever look at the raw bytes; the textual case of
/// the input is validated during parsing and then forgotten.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_BYTES]);

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_BYTES]);

    pub const fn new(bytes: [u8; ADDRESS_BYTES]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_BYTES] {
        &self.0
    }

    /// Parses `0x` + 40 hex characters (the prefix is optional).
    ///
    /// All-lowercase and all-uppercase input carries no checksum and is
    /// accepted unless `require_checksum` is set. Mixed-case input must match
    /// its EIP-55 checksum.
    pub fn parse(s: &str, require_checksum: bool) -> Result<Self, AddressError> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() != 2 * ADDRESS_BYTES {
            return Err(AddressError::InvalidLength(digits.len()));
        }

        let mut bytes = [0u8; ADDRESS_BYTES];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| AddressError::InvalidHex)?;
        let address = Address(bytes);

        let has_lower = digits.bytes().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.bytes().any(|c| c.is_ascii_uppercase());
        if (has_lower && has_upper) || require_checksum {
            let expected = address.to_checksum();
            if expected[2..] != *digits {
                return Err(if has_lower && has_upper {
                    AddressError::BadChecksum(expected)
                } else {
                    AddressError::MissingChecksum(expected)
                });
            }
        }

        Ok(address)
    }

    /// EIP-55 mixed-case rendering, `0x` prefixed.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let digest = Keccak256hasher::new().digest(lower.as_bytes());

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (digest[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
            if nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl From<[u8; ADDRESS_BYTES]> for Address {
    fn from(bytes: [u8; ADDRESS_BYTES]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s, false)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // from the EIP-55 reference
    const CHECKSUMMED: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn test_checksum_vectors() {
        for text in CHECKSUMMED {
            let address: Address = text.parse().unwrap();
            assert_eq!(address.to_checksum(), text);
            assert_eq!(Address::parse(text, true).unwrap(), address);
        }
    }

    #[test]
    fn test_case_does_not_change_identity() {
        let checksummed: Address = "0xC44622EFe9F7b4c880e563548148810b9CE0cdb4".parse().unwrap();
        let lower: Address = "0xc44622efe9f7b4c880e563548148810b9ce0cdb4".parse().unwrap();
        let upper: Address = "0xC44622EFE9F7B4C880E563548148810B9CE0CDB4".parse().unwrap();
        let bare: Address = "c44622efe9f7b4c880e563548148810b9ce0cdb4".parse().unwrap();

        assert_eq!(checksummed, lower);
        assert_eq!(checksummed, upper);
        assert_eq!(checksummed, bare);
        assert_eq!(lower.to_string(), "0xC44622EFe9F7b4c880e563548148810b9CE0cdb4");
    }

    #[test]
    fn test_bad_checksum() {
        // one letter flipped to lowercase
        let result = "0x5aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse::<Address>();
        assert!(matches!(result, Err(AddressError::BadChecksum(_))));
    }

    #[test]
    fn test_strict_mode_requires_checksum() {
        let result = Address::parse("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed", true);
        assert_eq!(
            result,
            Err(AddressError::MissingChecksum(CHECKSUMMED[0].to_string()))
        );
    }

    #[test]
    fn test_malformed_addresses() {
        assert_eq!("0x1234".parse::<Address>(), Err(AddressError::InvalidLength(4)));
        assert_eq!(
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAedff".parse::<Address>(),
            Err(AddressError::InvalidLength(42))
        );
        assert_eq!(
            "0xzzaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse::<Address>(),
            Err(AddressError::InvalidHex)
        );
    }

    #[test]
    fn test_serde_uses_checksum() {
        let address: Address = CHECKSUMMED[1].to_lowercase().parse().unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", CHECKSUMMED[1]));
        assert_eq!(serde_json::from_str::<Address>(&json).unwrap(), address);
    }
}
