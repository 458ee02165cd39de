use std::fmt;
use std::str::FromStr;

/// Hash function used for both leaves and inner nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashScheme {
    /// EVM `keccak256`; what on-chain verifiers recompute.
    #[default]
    Keccak256,
    Sha256,
}

impl fmt::Display for HashScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HashScheme::Keccak256 => "keccak",
            HashScheme::Sha256 => "sha256",
        })
    }
}

impl FromStr for HashScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keccak" | "keccak256" => Ok(HashScheme::Keccak256),
            "sha256" | "sha2" => Ok(HashScheme::Sha256),
            other => Err(format!("unknown hash scheme {other:?}, expected keccak or sha256")),
        }
    }
}

/// What to do when two entries encode to the same leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Build anyway and log every duplicate.
    #[default]
    Allow,
    /// Fail with [`crate::AllowlistError::DuplicateEntry`].
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowlistConfig {
    pub duplicates: DuplicatePolicy,
    /// Only accept EIP-55 checksummed minter addresses.
    pub require_checksum: bool,
}
