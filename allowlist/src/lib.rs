//! Merkle allowlist generator.
//!
//! Each `(minter, maxCount, price)` entry is ABI encoded as
//! `(address, uint256, uint256)` and hashed into a leaf; the leaves form a
//! sorted-pair Merkle tree whose root is published on chain while every
//! minter receives the sibling path proving its own terms.

mod address;
pub use address::*;

mod bundle;
pub use bundle::*;

mod config;
pub use config::*;

mod entry;
pub use entry::*;

mod error;
pub use error::*;

mod generator;
pub use generator::*;

pub use ethnum::U256;
pub use merkle_hashers::{Keccak256hasher, MerkleHasher, SHA256hasher};
pub use tree::{verify_proof, Leaf, Node, Path, Tree, TreeError};

/// Keccak-256 leaf of one entry, as recomputed by the on-chain verifier.
pub fn encode_leaf(entry: &Entry) -> Node {
    entry.leaf_hash(&Keccak256hasher::new())
}

/// Sibling hashes proving `leaf` is part of `tree`, leaf level first.
pub fn proof_for(tree: &Tree, leaf: &Node) -> AllowlistResult<Vec<Node>> {
    Ok(tree.gen_proof(leaf)?.into_path_nodes())
}

/// Keccak-256 sorted-pair verification of `proof` for `leaf` against `root`.
pub fn verify(leaf: &Node, proof: &[Node], root: &Node) -> bool {
    verify_proof(&Keccak256hasher::new(), leaf, proof, root)
}
