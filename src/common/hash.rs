use blake2::{Blake2b, Digest, digest::consts::U32};

pub fn blake2b256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b::<U32>::new();
    hasher.update(input);
    hasher.finalize().into()
}
