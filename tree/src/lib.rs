//! Sorted-pair Merkle tree over 32 byte digests.
//!
//! Level 0 holds the leaf hashes sorted by raw bytes, every inner node hashes
//! the smaller child before the larger one, and an unpaired last node is
//! promoted to the next level unchanged. Proofs are therefore plain sibling
//! lists without left/right markers.

mod error;
pub use error::*;

mod tree;
pub use tree::*;

mod node;
pub use node::*;

mod leaf;
pub use leaf::*;

mod path;
pub use path::*;

mod serde;
