use std::io::Cursor;
use std::path::Path;

use allowlist::{AllowlistError, AllowlistResult, HashScheme};
use log::info;
use merkle_hashers::{Keccak256hasher, MerkleHasher, SHA256hasher};
use serdes::ExpSerde;
use tree::Tree;

use crate::io::read;

/// A tree dump: the hash scheme name followed by every level of the tree.
pub fn encode_tree(scheme: HashScheme, tree: &Tree) -> AllowlistResult<Vec<u8>> {
    let mut bytes = Vec::new();
    scheme.to_string().serialize_into(&mut bytes)?;
    tree.serialize_into(&mut bytes)?;
    Ok(bytes)
}

/// Decodes a tree dump and recomputes it with the hasher named in its header.
pub fn decode_tree(bytes: &[u8]) -> AllowlistResult<(HashScheme, Tree)> {
    let mut reader = Cursor::new(bytes);
    let scheme: HashScheme = String::deserialize_from(&mut reader)?
        .parse()
        .map_err(AllowlistError::InvalidInput)?;
    let tree = Tree::deserialize_from(&mut reader)?;
    if reader.position() != bytes.len() as u64 {
        return Err(AllowlistError::InvalidInput(
            "trailing bytes after the tree".to_string(),
        ));
    }

    let consistent = match scheme {
        HashScheme::Keccak256 => tree.check(&Keccak256hasher::new()),
        HashScheme::Sha256 => tree.check(&SHA256hasher::new()),
    };
    if !consistent {
        return Err(AllowlistError::InvalidInput(format!(
            "{scheme} tree does not hash to its own root"
        )));
    }
    Ok((scheme, tree))
}

pub fn load_tree(path: &Path) -> AllowlistResult<Tree> {
    let (scheme, tree) = decode_tree(&read(path)?).map_err(|err| match err {
        AllowlistError::InvalidInput(reason) => {
            AllowlistError::InvalidInput(format!("{}: {reason}", path.display()))
        }
        other => other,
    })?;
    info!("Loaded {scheme} tree with {} leaves", tree.leaf_count());
    Ok(tree)
}
