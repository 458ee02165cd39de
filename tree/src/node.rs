use std::fmt;
use std::fmt::{Debug, Display};
use std::str::FromStr;

use merkle_hashers::MerkleHasher;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::TreeError;

pub const LEAF_HASH_BYTES: usize = 32;

/// A node is a blob of 32 bytes of data
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Node {
    pub(crate) data: [u8; LEAF_HASH_BYTES],
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.data))
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Node({self})")
    }
}

impl Node {
    pub fn new(data: [u8; LEAF_HASH_BYTES]) -> Self {
        Self { data }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; LEAF_HASH_BYTES] {
        &self.data
    }

    /// Hash two children in ascending byte order, so the parent does not
    /// depend on which side either child sits.
    #[inline]
    pub fn node_hash<H: MerkleHasher>(hasher: &H, left: &Node, right: &Node) -> Node {
        let (low, high) = if left <= right {
            (left, right)
        } else {
            (right, left)
        };

        let mut buffer = [0u8; 2 * LEAF_HASH_BYTES];
        buffer[..LEAF_HASH_BYTES].copy_from_slice(&low.data);
        buffer[LEAF_HASH_BYTES..].copy_from_slice(&high.data);
        Node {
            data: hasher.digest(&buffer),
        }
    }
}

impl From<[u8; LEAF_HASH_BYTES]> for Node {
    fn from(data: [u8; LEAF_HASH_BYTES]) -> Self {
        Self { data }
    }
}

impl FromStr for Node {
    type Err = TreeError;

    /// Accepts 64 hex characters with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let mut data = [0u8; LEAF_HASH_BYTES];
        hex::decode_to_slice(digits, &mut data).map_err(|_| TreeError::InvalidHash(s.to_string()))?;
        Ok(Self { data })
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
