use std::path::{Path, PathBuf};

use allowlist::{Address, AllowlistError, AllowlistResult, Bundle, Node};
use clap::Args;
use log::info;
use serde_json::json;

use crate::io::load_bundle;
use crate::tree_file::load_tree;

#[derive(Args, Debug)]
pub struct ProveArgs {
    /// JSON bundle written by `build`
    #[arg(short, long, conflicts_with = "tree", requires = "minter")]
    bundle: Option<PathBuf>,

    /// Minter whose entries to print
    #[arg(short, long)]
    minter: Option<Address>,

    /// Binary tree written by `build --tree-out`
    #[arg(short, long, requires = "leaf")]
    tree: Option<PathBuf>,

    /// Leaf hash to prove
    #[arg(short, long)]
    leaf: Option<Node>,
}

pub fn run(args: &ProveArgs) -> AllowlistResult<()> {
    let output = match (&args.bundle, &args.minter, &args.tree, &args.leaf) {
        (Some(bundle_path), Some(minter), _, _) => prove_from_bundle(bundle_path, minter)?,
        (_, _, Some(tree_path), Some(leaf)) => prove_from_tree(tree_path, leaf)?,
        _ => {
            return Err(AllowlistError::InvalidInput(
                "either --bundle with --minter or --tree with --leaf is required".to_string(),
            ))
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn prove_from_bundle(path: &Path, minter: &Address) -> AllowlistResult<serde_json::Value> {
    let bundle = load_bundle(path)?;
    let entries = bundle.entries_for(minter);
    if entries.is_empty() {
        return Err(AllowlistError::MinterNotFound(*minter));
    }
    info!("{} entries found for {}", entries.len(), minter);

    let claim = Bundle {
        name: bundle.name.clone(),
        root: bundle.root,
        entries: entries.into_iter().cloned().collect(),
    };
    Ok(serde_json::to_value(claim)?)
}

fn prove_from_tree(path: &Path, leaf: &Node) -> AllowlistResult<serde_json::Value> {
    let tree = load_tree(path)?;
    let proof = tree.gen_proof(leaf)?;
    Ok(json!({
        "root": tree.root(),
        "leaf": proof.leaf,
        "proof": proof.path_nodes(),
    }))
}
