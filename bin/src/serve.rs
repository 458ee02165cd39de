use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use allowlist::{Address, AllowlistResult, Bundle, HashScheme};
use clap::Args;
use log::info;
use merkle_hashers::{Keccak256hasher, MerkleHasher, SHA256hasher};
use serde_json::json;
use warp::{http::StatusCode, reply, Filter, Rejection, Reply};

use crate::io::load_bundle;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// JSON bundle written by `build`
    #[arg(short, long)]
    bundle: PathBuf,

    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    #[arg(short, long, default_value_t = 3030)]
    port: u16,

    /// Hash scheme the bundle was built with: keccak, sha256
    #[arg(long, default_value_t = HashScheme::Keccak256)]
    hasher: HashScheme,
}

pub async fn run(args: &ServeArgs) -> AllowlistResult<()> {
    let bundle = load_bundle(&args.bundle)?;
    // never hand out proofs that would be rejected on chain
    match args.hasher {
        HashScheme::Keccak256 => bundle.verify(&Keccak256hasher::new())?,
        HashScheme::Sha256 => bundle.verify(&SHA256hasher::new())?,
    }
    info!(
        "Serving {} entries with root {} on {}:{}",
        bundle.entries.len(),
        bundle.root,
        args.host,
        args.port
    );
    warp::serve(routes(Arc::new(bundle)))
        .run((args.host, args.port))
        .await;
    Ok(())
}

pub fn routes(
    bundle: Arc<Bundle>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let ready = warp::path("ready").and(warp::path::end()).map(|| {
        info!("Received ready request.");
        "ready"
    });
    let root = {
        let bundle = bundle.clone();
        warp::path("root")
            .and(warp::path::end())
            .map(move || reply::json(&json!({ "root": bundle.root })))
    };
    let proof = warp::path!("proof" / String).map(move |minter: String| {
        info!("Received proof request for {minter}.");
        proof_reply(&bundle, &minter)
    });

    warp::get().and(ready.or(root).or(proof))
}

fn proof_reply(bundle: &Bundle, minter: &str) -> reply::WithStatus<reply::Json> {
    let address = match minter.parse::<Address>() {
        Ok(address) => address,
        Err(err) => {
            return reply::with_status(
                reply::json(&json!({ "error": err.to_string() })),
                StatusCode::BAD_REQUEST,
            )
        }
    };

    let entries = bundle.entries_for(&address);
    if entries.is_empty() {
        return reply::with_status(
            reply::json(&json!({ "error": format!("{address} is not on the allowlist") })),
            StatusCode::NOT_FOUND,
        );
    }
    reply::with_status(
        reply::json(&json!({ "root": bundle.root, "entries": entries })),
        StatusCode::OK,
    )
}

#[cfg(test)]
mod tests {
    use allowlist::{build_tree, BundleEntry, Entry};
    use serde_json::Value;

    use super::*;

    const MEMBER: &str = "0x1010101010101010101010101010101010101010";

    fn sample_bundle() -> Arc<Bundle> {
        let member: Address = MEMBER.parse().unwrap();
        let entries = vec![
            Entry::new(member, 5u64, 10_000_000_000_000_000u64),
            Entry::new(member, 2u64, 50_000_000_000_000_000u64),
            Entry::new(Address::new([0x20; 20]), 3u64, 10_000_000_000_000_000u64),
        ];
        Arc::new(build_tree(entries).unwrap().to_bundle().unwrap())
    }

    #[test]
    fn test_proof_reply_status() {
        let bundle = sample_bundle();
        let status = |minter: &str| proof_reply(&bundle, minter).into_response().status();

        assert_eq!(status(MEMBER), StatusCode::OK);
        assert_eq!(status(&MEMBER.to_uppercase()), StatusCode::OK);
        assert_eq!(
            status("0x3030303030303030303030303030303030303030"),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status("0x1234"), StatusCode::BAD_REQUEST);
        assert_eq!(
            status("0x1010101010101010101010101010101010101010ff"),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_routes() {
        let bundle = sample_bundle();
        let api = routes(bundle.clone());

        let res = warp::test::request().path("/ready").reply(&api).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(&res.body()[..], b"ready");

        let res = warp::test::request().path("/root").reply(&api).await;
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body["root"], json!(bundle.root.to_string()));

        let res = warp::test::request()
            .path(&format!("/proof/{MEMBER}"))
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        let claims: Vec<BundleEntry> = serde_json::from_value(body["entries"].clone()).unwrap();
        assert_eq!(claims.len(), 2);
        let claimed = Bundle {
            name: None,
            root: bundle.root,
            entries: claims,
        };
        claimed.verify(&Keccak256hasher::new()).unwrap();

        let res = warp::test::request()
            .path("/proof/0x3030303030303030303030303030303030303030")
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = warp::test::request().path("/proof/nonsense").reply(&api).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
