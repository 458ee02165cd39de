use std::fmt::Debug;

/// A 256-bit byte hasher shared by leaf encoding and inner node hashing.
///
/// Generators and verifiers must agree on the implementation; a root built
/// with one hasher never verifies proofs produced with another.
pub trait MerkleHasher: Clone + Debug + Default + Send + Sync {
    /// Name for the hasher
    const NAME: &'static str;

    /// The size of the hash output in bytes.
    const DIGEST_SIZE: usize;

    /// Create a new hash instance.
    fn new() -> Self;

    /// Hash the input into the output.
    fn hash(&self, output: &mut [u8], input: &[u8]);

    /// Hash the input in place.
    fn hash_inplace(&self, buffer: &mut [u8]);

    /// Hash the input into a fresh 32 byte digest.
    #[inline]
    fn digest(&self, input: &[u8]) -> [u8; 32] {
        let mut output = [0u8; 32];
        self.hash(&mut output, input);
        output
    }
}
