use std::path::{Path, PathBuf};

use allowlist::{
    Allowlist, AllowlistConfig, AllowlistInput, AllowlistResult, DuplicatePolicy, HashScheme,
};
use clap::Args;
use log::info;
use merkle_hashers::{Keccak256hasher, MerkleHasher, SHA256hasher};

use crate::io::{read_to_string, write_files_atomic};
use crate::tree_file::encode_tree;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// JSON file with the entries, either an array or `{ "name", "entries" }`
    #[arg(short, long)]
    input: PathBuf,

    /// Output JSON bundle with the root and every entry's proof
    #[arg(short, long)]
    output: PathBuf,

    /// Optional binary dump of the whole tree, for `prove --tree`
    #[arg(short, long)]
    tree_out: Option<PathBuf>,

    /// Hash scheme: keccak, sha256
    #[arg(long, default_value_t = HashScheme::Keccak256)]
    hasher: HashScheme,

    /// Fail instead of warning when two entries are identical
    #[arg(long)]
    reject_duplicates: bool,

    /// Only accept EIP-55 checksummed minter addresses
    #[arg(long)]
    require_checksum: bool,

    /// Name recorded in the bundle, overriding the input's name
    #[arg(long)]
    name: Option<String>,
}

impl BuildArgs {
    fn config(&self) -> AllowlistConfig {
        AllowlistConfig {
            duplicates: if self.reject_duplicates {
                DuplicatePolicy::Reject
            } else {
                DuplicatePolicy::Allow
            },
            require_checksum: self.require_checksum,
        }
    }
}

pub fn run(args: &BuildArgs) -> AllowlistResult<()> {
    match args.hasher {
        HashScheme::Keccak256 => build::<Keccak256hasher>(args),
        HashScheme::Sha256 => build::<SHA256hasher>(args),
    }
}

fn build<H: MerkleHasher>(args: &BuildArgs) -> AllowlistResult<()> {
    let config = args.config();

    info!("Reading entries from {:?}", args.input);
    let input = AllowlistInput::from_json(&read_to_string(&args.input)?)?;
    let name = args.name.clone().or_else(|| input.name.clone());
    let entries = input.into_entries(&config)?;

    let allowlist = Allowlist::build(H::new(), entries, &config)?.with_name(name);
    let bundle_json = serde_json::to_string_pretty(&allowlist.to_bundle()?)?;
    let tree_dump = match &args.tree_out {
        Some(_) => Some(encode_tree(args.hasher, allowlist.tree())?),
        None => None,
    };

    let mut outputs: Vec<(&Path, &[u8])> = vec![(args.output.as_path(), bundle_json.as_bytes())];
    if let (Some(tree_path), Some(bytes)) = (&args.tree_out, &tree_dump) {
        outputs.push((tree_path.as_path(), bytes.as_slice()));
    }
    info!(
        "Writing {}",
        outputs
            .iter()
            .map(|(path, _)| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    write_files_atomic(&outputs)?;

    println!("{}", allowlist.root());
    Ok(())
}
