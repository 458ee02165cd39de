#![forbid(unsafe_code)]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;

mod build;
mod io;
mod prove;
mod serve;
mod tree_file;
mod verify;

// examples:
// allowlist-gen build --input entries.json --output bundle.json --tree-out tree.bin
// allowlist-gen prove --bundle bundle.json --minter <address>
// allowlist-gen prove --tree tree.bin --leaf <hash>
// allowlist-gen verify --bundle bundle.json
// allowlist-gen verify --root <hash> --leaf <hash> --proof <hash>,<hash>
// allowlist-gen serve --bundle bundle.json --host 127.0.0.1 --port 3030
#[derive(Parser, Debug)]
#[command(name = "allowlist-gen")]
#[command(author, version, about = "Merkle allowlist generator and prover", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the tree and write the root plus one proof per entry
    Build(build::BuildArgs),
    /// Print the proofs for one minter or one leaf
    Prove(prove::ProveArgs),
    /// Check a whole bundle or a single proof
    Verify(verify::VerifyArgs),
    /// Serve the proofs of a bundle over HTTP
    Serve(serve::ServeArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build(args) => build::run(&args),
        Commands::Prove(args) => prove::run(&args),
        Commands::Verify(args) => verify::run(&args),
        Commands::Serve(args) => serve::run(&args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
