use std::fmt::{self, Display};

use log::{debug, trace};
use merkle_hashers::MerkleHasher;
use rayon::prelude::*;
use utils::timer::Timer;

use crate::{Leaf, Node, Path, TreeError, TreeResult};

/// A fully built tree, one flat vector per level.
///
/// `levels[0]` holds the leaf hashes in ascending byte order and the last
/// level holds exactly one node, the root. A tree is never updated in place;
/// changing the leaf set means building a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    pub(crate) levels: Vec<Vec<Node>>,
}

impl Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (depth, level) in self.levels.iter().enumerate() {
            writeln!(f, "level {depth}:")?;
            for (i, e) in level.iter().enumerate() {
                writeln!(f, "{}: {}", i, e)?;
            }
        }
        Ok(())
    }
}

impl Tree {
    /// build a tree with leaves
    #[inline]
    pub fn new_with_leaves<H: MerkleHasher>(hasher: &H, leaves: &[Leaf]) -> TreeResult<Self> {
        let leaf_nodes = leaves
            .par_iter()
            .map(|leaf| leaf.leaf_hash(hasher))
            .collect::<Vec<Node>>();
        Self::new_with_leaf_nodes(hasher, leaf_nodes)
    }

    /// build a tree with leaves
    /// assume the leaves are already hashed via leaf hash
    /// the input order does not matter, leaf nodes are sorted first
    pub fn new_with_leaf_nodes<H: MerkleHasher>(
        hasher: &H,
        mut leaf_nodes: Vec<Node>,
    ) -> TreeResult<Self> {
        if leaf_nodes.is_empty() {
            return Err(TreeError::EmptyTree);
        }

        let timer = Timer::new(
            &format!("generate new tree with {} leaves", leaf_nodes.len()),
            true,
        );
        leaf_nodes.par_sort_unstable();

        let mut levels = vec![leaf_nodes];
        loop {
            let current = &levels[levels.len() - 1];
            if current.len() == 1 {
                break;
            }
            let next = next_level(hasher, current);
            trace!(
                "level {} hashed: {} -> {} nodes",
                levels.len(),
                current.len(),
                next.len()
            );
            levels.push(next);
        }
        timer.stop();

        let tree = Self { levels };
        debug!(
            "built {} tree of height {} with root {}",
            H::NAME,
            tree.height(),
            tree.root()
        );
        Ok(tree)
    }

    #[inline]
    pub fn root(&self) -> Node {
        self.levels[self.levels.len() - 1][0]
    }

    /// Number of levels including the leaf level and the root.
    #[inline]
    pub fn height(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Leaf hashes in tree order, i.e. sorted ascending.
    #[inline]
    pub fn leaf_nodes(&self) -> &[Node] {
        &self.levels[0]
    }

    #[inline]
    pub fn levels(&self) -> &[Vec<Node>] {
        &self.levels
    }

    /// Position of the first leaf equal to `leaf`.
    #[inline]
    pub fn index_of(&self, leaf: &Node) -> Option<usize> {
        let leaves = self.leaf_nodes();
        let index = leaves.partition_point(|node| node < leaf);
        (leaves.get(index) == Some(leaf)).then_some(index)
    }

    /// generate a membership proof for the given leaf hash
    #[inline]
    pub fn gen_proof(&self, leaf: &Node) -> TreeResult<Path> {
        let index = self
            .index_of(leaf)
            .ok_or(TreeError::LeafNotFound(*leaf))?;
        self.gen_proof_at(index)
    }

    /// generate a membership proof for the leaf at `index` in tree order
    pub fn gen_proof_at(&self, index: usize) -> TreeResult<Path> {
        if index >= self.leaf_count() {
            return Err(TreeError::IndexOutOfBounds {
                index,
                leaves: self.leaf_count(),
            });
        }

        let mut path_nodes = Vec::with_capacity(self.height() - 1);
        let mut current = index;
        for level in &self.levels[..self.height() - 1] {
            // a promoted node has no sibling at this level
            if let Some(sibling) = level.get(sibling_index(current)) {
                path_nodes.push(*sibling);
            }
            current = parent_index(current);
        }

        Ok(Path {
            leaf: self.levels[0][index],
            path_nodes,
        })
    }

    /// Recompute every inner level from the leaves and compare.
    pub fn check<H: MerkleHasher>(&self, hasher: &H) -> bool {
        let Some(leaves) = self.levels.first() else {
            return false;
        };
        if leaves.is_empty() || !leaves.windows(2).all(|w| w[0] <= w[1]) {
            return false;
        }

        let mut expected = leaves.clone();
        for level in &self.levels[1..] {
            expected = next_level(hasher, &expected);
            if *level != expected {
                return false;
            }
        }
        expected.len() == 1
    }
}

fn next_level<H: MerkleHasher>(hasher: &H, level: &[Node]) -> Vec<Node> {
    level
        .par_chunks(2)
        .map(|pair| match pair {
            [left, right] => Node::node_hash(hasher, left, right),
            _ => pair[0],
        })
        .collect()
}

/// Returns the index of the sibling, given an index.
#[inline]
fn sibling_index(index: usize) -> usize {
    index ^ 1
}

/// Returns the index of the parent, given an index.
#[inline]
fn parent_index(index: usize) -> usize {
    index >> 1
}
