use sha2::{digest::Output, Digest, Sha256};

use super::MerkleHasher;

#[derive(Debug, Clone, Default)]
pub struct SHA256hasher;

impl MerkleHasher for SHA256hasher {
    const NAME: &'static str = "SHA256 Hasher";

    const DIGEST_SIZE: usize = 32;

    #[inline]
    fn new() -> SHA256hasher {
        SHA256hasher
    }

    #[inline]
    fn hash(&self, output: &mut [u8], input: &[u8]) {
        let mut hasher = Sha256::new();

        hasher.update(input);
        hasher.finalize_into_reset(Output::<Sha256>::from_mut_slice(output));
    }

    #[inline]
    fn hash_inplace(&self, buffer: &mut [u8]) {
        let mut hasher = Sha256::new();
        hasher.update(&*buffer);
        hasher.finalize_into_reset(Output::<Sha256>::from_mut_slice(
            &mut buffer[..Self::DIGEST_SIZE],
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_vector() {
        let hasher = SHA256hasher::new();
        assert_eq!(
            hex::encode(hasher.digest(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
