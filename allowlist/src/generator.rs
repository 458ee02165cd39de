use std::collections::HashMap;

use log::{info, warn};
use merkle_hashers::{Keccak256hasher, MerkleHasher};
use rayon::prelude::*;
use tree::{Node, Path, Tree};
use utils::timer::Timer;

use crate::{
    Address, AllowlistConfig, AllowlistError, AllowlistResult, Bundle, BundleEntry,
    DuplicatePolicy, Entry,
};

/// A finalized allowlist: the entries in input order, their leaves, and the
/// tree built over them.
#[derive(Debug, Clone)]
pub struct Allowlist<H: MerkleHasher = Keccak256hasher> {
    hasher: H,
    name: Option<String>,
    entries: Vec<Entry>,
    leaves: Vec<Node>,
    tree: Tree,
}

/// Builds the Keccak-256 allowlist tree with the default configuration.
pub fn build_tree(entries: Vec<Entry>) -> AllowlistResult<Allowlist> {
    Allowlist::build(Keccak256hasher::new(), entries, &AllowlistConfig::default())
}

impl<H: MerkleHasher> Allowlist<H> {
    pub fn build(hasher: H, entries: Vec<Entry>, config: &AllowlistConfig) -> AllowlistResult<Self> {
        if entries.is_empty() {
            return Err(AllowlistError::EmptyAllowlist);
        }

        let timer = Timer::new(&format!("build allowlist of {} entries", entries.len()), true);
        let leaves = entries
            .par_iter()
            .map(|entry| entry.leaf_hash(&hasher))
            .collect::<Vec<Node>>();

        let duplicates = find_duplicates(&leaves);
        match (config.duplicates, duplicates.first()) {
            (DuplicatePolicy::Reject, Some(&(first, second))) => {
                return Err(AllowlistError::DuplicateEntry { first, second });
            }
            _ => {
                for (first, second) in &duplicates {
                    warn!(
                        "entry {second} ({}) duplicates entry {first}",
                        entries[*second].minter
                    );
                }
            }
        }

        let tree = Tree::new_with_leaf_nodes(&hasher, leaves.clone())?;
        timer.stop();
        info!(
            "allowlist of {} entries built with {}, root {}",
            entries.len(),
            H::NAME,
            tree.root()
        );

        Ok(Self {
            hasher,
            name: None,
            entries,
            leaves,
            tree,
        })
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    #[inline]
    pub fn root(&self) -> Node {
        self.tree.root()
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Leaf hashes in input order.
    #[inline]
    pub fn leaves(&self) -> &[Node] {
        &self.leaves
    }

    #[inline]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn proof_for(&self, leaf: &Node) -> AllowlistResult<Path> {
        Ok(self.tree.gen_proof(leaf)?)
    }

    pub fn proof_for_entry(&self, entry: &Entry) -> AllowlistResult<Path> {
        self.proof_for(&entry.leaf_hash(&self.hasher))
    }

    /// One proof per entry, in input order.
    pub fn proofs(&self) -> AllowlistResult<Vec<Path>> {
        let timer = Timer::new("generate allowlist proofs", true);
        let proofs = self
            .leaves
            .par_iter()
            .map(|leaf| self.proof_for(leaf))
            .collect::<AllowlistResult<Vec<Path>>>();
        timer.stop();
        proofs
    }

    /// Entries granted to `minter`, with their input positions.
    pub fn entries_for(&self, minter: &Address) -> Vec<(usize, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.minter == *minter)
            .collect()
    }

    /// `(first, later)` input positions of entries with identical leaves.
    pub fn duplicates(&self) -> Vec<(usize, usize)> {
        find_duplicates(&self.leaves)
    }

    pub fn to_bundle(&self) -> AllowlistResult<Bundle> {
        let entries = self
            .entries
            .iter()
            .zip(&self.leaves)
            .zip(self.proofs()?)
            .map(|((entry, leaf), proof)| BundleEntry {
                minter: entry.minter,
                max_count: entry.max_count,
                price: entry.price,
                hash: *leaf,
                proof: proof.into_path_nodes(),
            })
            .collect();

        Ok(Bundle {
            name: self.name.clone(),
            root: self.root(),
            entries,
        })
    }
}

fn find_duplicates(leaves: &[Node]) -> Vec<(usize, usize)> {
    let mut first_seen: HashMap<Node, usize> = HashMap::with_capacity(leaves.len());
    let mut duplicates = Vec::new();
    for (index, leaf) in leaves.iter().enumerate() {
        if let Some(&first) = first_seen.get(leaf) {
            duplicates.push((first, index));
        } else {
            first_seen.insert(*leaf, index);
        }
    }
    duplicates
}
