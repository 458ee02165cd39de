use std::fmt;
use std::fmt::Display;

use merkle_hashers::MerkleHasher;

use crate::Node;

/// Three ABI words: a left-padded address and two big-endian uint256 values.
pub const LEAF_BYTES: usize = 96;

/// Represents a leaf in the Merkle tree, containing the 96 byte ABI encoding
/// of one allowlist entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub data: [u8; LEAF_BYTES],
}

impl Default for Leaf {
    fn default() -> Self {
        Self {
            data: [0u8; LEAF_BYTES],
        }
    }
}

impl Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Display the first and last byte of the leaf data for brevity
        write!(
            f,
            "leaf: 0x{:02x?}...{:02x?}",
            self.data[0],
            self.data[LEAF_BYTES - 1]
        )
    }
}

impl Leaf {
    /// Creates a new Leaf with the given data.
    pub fn new(data: [u8; LEAF_BYTES]) -> Self {
        Self { data }
    }

    /// Hashes the raw encoding once; the digest is the level 0 node.
    #[inline]
    pub fn leaf_hash<H: MerkleHasher>(&self, hasher: &H) -> Node {
        Node {
            data: hasher.digest(&self.data),
        }
    }
}

impl From<[u8; LEAF_BYTES]> for Leaf {
    fn from(data: [u8; LEAF_BYTES]) -> Self {
        Self { data }
    }
}
