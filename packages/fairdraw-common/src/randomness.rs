use cosmwasm_std::Uint256;
use sha2::{Digest, Sha256};

/// Derive the random words for a request, one 256-bit word per index.
///
/// Each word is sha256(consumer ‖ request_id ‖ word_index) interpreted as a
/// big-endian integer. The derivation is shared between the coordinator and
/// tests so that outcomes can be predicted off-chain.
pub fn derive_random_words(consumer: &str, request_id: u64, num_words: u32) -> Vec<Uint256> {
    (0..num_words)
        .map(|i| {
            let mut hasher = Sha256::new();
            hasher.update(consumer.as_bytes());
            hasher.update(request_id.to_be_bytes());
            hasher.update(i.to_be_bytes());
            let digest: [u8; 32] = hasher.finalize().into();
            Uint256::from_be_bytes(digest)
        })
        .collect()
}
