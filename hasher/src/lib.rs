// traits definitions
mod traits;
pub use traits::MerkleHasher;

// byte hashers

pub mod sha2_256;
pub use sha2_256::SHA256hasher;

pub mod keccak_256;
pub use keccak_256::Keccak256hasher;
