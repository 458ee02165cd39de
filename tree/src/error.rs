use thiserror::Error;

use crate::Node;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("cannot build a merkle tree without leaves")]
    EmptyTree,

    #[error("leaf {0} not found in tree")]
    LeafNotFound(Node),

    #[error("leaf index {index} is out of bounds for tree with {leaves} leaves")]
    IndexOutOfBounds { index: usize, leaves: usize },

    #[error("invalid hash {0:?}: expected 64 hex characters")]
    InvalidHash(String),
}

pub type TreeResult<T> = std::result::Result<T, TreeError>;
