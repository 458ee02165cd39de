use std::fmt;
use std::fmt::Display;

use merkle_hashers::MerkleHasher;

use crate::Node;

/// Represents a path in the Merkle tree, used for proving membership.
///
/// `path_nodes` lists the siblings from the leaf level upwards. There are no
/// direction bits: every step hashes the sorted pair.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Path {
    pub leaf: Node,
    pub(crate) path_nodes: Vec<Node>,
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "leaf: {}", self.leaf)?;
        for (i, node) in self.path_nodes.iter().enumerate() {
            writeln!(f, "{i}-th sibling: {node}")?;
        }
        Ok(())
    }
}

impl Path {
    pub fn new(leaf: Node, path_nodes: Vec<Node>) -> Self {
        Self { leaf, path_nodes }
    }

    #[inline]
    pub fn path_nodes(&self) -> &[Node] {
        &self.path_nodes
    }

    #[inline]
    pub fn into_path_nodes(self) -> Vec<Node> {
        self.path_nodes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.path_nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path_nodes.is_empty()
    }

    /// Folds the siblings into the leaf and returns the implied root.
    #[inline]
    pub fn root<H: MerkleHasher>(&self, hasher: &H) -> Node {
        fold_path(hasher, &self.leaf, &self.path_nodes)
    }

    /// Verifies the path against a given root.
    #[inline]
    pub fn verify<H: MerkleHasher>(&self, hasher: &H, root: &Node) -> bool {
        verify_proof(hasher, &self.leaf, &self.path_nodes, root)
    }
}

/// Recomputes the root from `leaf` and `proof` and compares it with `root`.
///
/// This is the exact computation an on-chain verifier performs, so it must
/// stay in lockstep with [`Node::node_hash`].
#[inline]
pub fn verify_proof<H: MerkleHasher>(hasher: &H, leaf: &Node, proof: &[Node], root: &Node) -> bool {
    fold_path(hasher, leaf, proof) == *root
}

#[inline]
fn fold_path<H: MerkleHasher>(hasher: &H, leaf: &Node, proof: &[Node]) -> Node {
    proof
        .iter()
        .fold(*leaf, |current, sibling| Node::node_hash(hasher, &current, sibling))
}
