use std::fmt;
use std::path::PathBuf;

use serdes::SerdeError;
use thiserror::Error;
use tree::{Node, TreeError};

use crate::Address;

/// The entry field an input error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Minter,
    MaxCount,
    Price,
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntryField::Minter => "minter",
            EntryField::MaxCount => "maxCount",
            EntryField::Price => "price",
        })
    }
}

#[derive(Error, Debug)]
pub enum AllowlistError {
    #[error("empty allowlist: a tree needs at least one entry")]
    EmptyAllowlist,

    #[error("invalid entry {index}: field `{field}`: {reason}")]
    InvalidEntry {
        index: usize,
        field: EntryField,
        reason: String,
    },

    #[error("invalid allowlist input: {0}")]
    InvalidInput(String),

    #[error("entry {second} duplicates entry {first}")]
    DuplicateEntry { first: usize, second: usize },

    #[error("leaf not found: {0}")]
    LeafNotFound(Node),

    #[error("{0} is not on the allowlist")]
    MinterNotFound(Address),

    #[error("proof for leaf {leaf} does not verify against root {root}")]
    ProofRejected { leaf: Node, root: Node },

    #[error("entry {index}: recorded hash {recorded} does not match its fields ({computed})")]
    HashMismatch {
        index: usize,
        recorded: Node,
        computed: Node,
    },

    #[error("entry {index}: proof does not verify against root {root}")]
    InvalidProof { index: usize, root: Node },

    #[error("tree error: {0}")]
    Tree(TreeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("{}: {source}", path.display())]
    FileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serde(#[from] SerdeError),
}

impl From<TreeError> for AllowlistError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::EmptyTree => AllowlistError::EmptyAllowlist,
            TreeError::LeafNotFound(leaf) => AllowlistError::LeafNotFound(leaf),
            other => AllowlistError::Tree(other),
        }
    }
}

pub type AllowlistResult<T> = std::result::Result<T, AllowlistError>;
