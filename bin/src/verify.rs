use std::path::PathBuf;

use allowlist::{AllowlistError, AllowlistResult, HashScheme, Node};
use clap::Args;
use merkle_hashers::{Keccak256hasher, MerkleHasher, SHA256hasher};
use tree::verify_proof;

use crate::io::load_bundle;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// JSON bundle to check entry by entry
    #[arg(short, long, conflicts_with_all = ["root", "leaf", "proof"])]
    bundle: Option<PathBuf>,

    /// Published root
    #[arg(long, requires = "leaf")]
    root: Option<Node>,

    /// Leaf hash of the claimed entry
    #[arg(long, requires = "root")]
    leaf: Option<Node>,

    /// Sibling hashes, comma separated, leaf level first
    #[arg(long, value_delimiter = ',')]
    proof: Vec<Node>,

    /// Hash scheme: keccak, sha256
    #[arg(long, default_value_t = HashScheme::Keccak256)]
    hasher: HashScheme,
}

pub fn run(args: &VerifyArgs) -> AllowlistResult<()> {
    match args.hasher {
        HashScheme::Keccak256 => verify::<Keccak256hasher>(args),
        HashScheme::Sha256 => verify::<SHA256hasher>(args),
    }
}

fn verify<H: MerkleHasher>(args: &VerifyArgs) -> AllowlistResult<()> {
    let hasher = H::new();

    match (&args.bundle, &args.root, &args.leaf) {
        (Some(bundle_path), _, _) => {
            let bundle = load_bundle(bundle_path)?;
            bundle.verify(&hasher)?;
            println!(
                "{} entries verify against {}",
                bundle.entries.len(),
                bundle.root
            );
        }
        (None, Some(root), Some(leaf)) => {
            if !verify_proof(&hasher, leaf, &args.proof, root) {
                return Err(AllowlistError::ProofRejected {
                    leaf: *leaf,
                    root: *root,
                });
            }
            println!("proof verifies against {root}");
        }
        _ => {
            return Err(AllowlistError::InvalidInput(
                "either --bundle or --root with --leaf is required".to_string(),
            ))
        }
    }
    Ok(())
}
