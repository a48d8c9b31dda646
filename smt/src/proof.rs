//! Inclusion proofs and their compressed wire format.
//!
//! Compressed layout: a big-endian bitmap of `ceil(D / 8)` bytes in which bit
//! `l` is set when the sibling at level `l` differs from the default hash,
//! followed by those non-default siblings in level order, 32 bytes each.

use plasma_crypto::hash_pair;
use plasma_types::{BlockRoot, CoinSlot, TxHash};

use crate::{check_depth, DefaultHashes, SmtError, MAX_DEPTH};

/// Sibling hashes from leaf level up to just below the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleProof {
    siblings: Vec<[u8; 32]>,
}

fn bitmap_len(depth: usize) -> usize {
    depth.div_ceil(8)
}

impl MerkleProof {
    pub fn new(siblings: Vec<[u8; 32]>) -> Self {
        Self { siblings }
    }

    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    pub fn siblings(&self) -> &[[u8; 32]] {
        &self.siblings
    }

    /// Mutable access, for building tampered proofs in tests and tools.
    pub fn siblings_mut(&mut self) -> &mut [[u8; 32]] {
        &mut self.siblings
    }

    /// Encode into the compressed wire format.
    pub fn to_compressed(&self) -> Result<Vec<u8>, SmtError> {
        let depth = self.depth();
        let defaults = DefaultHashes::new(depth)?;
        let map_len = bitmap_len(depth);
        let mut bitmap = vec![0u8; map_len];
        let mut body = Vec::new();
        for (level, sibling) in self.siblings.iter().enumerate() {
            if sibling != defaults.at(level) {
                bitmap[map_len - 1 - level / 8] |= 1 << (level % 8);
                body.extend_from_slice(sibling);
            }
        }
        bitmap.extend_from_slice(&body);
        Ok(bitmap)
    }

    /// Decode the compressed wire format for a tree of `depth` levels.
    pub fn from_compressed(bytes: &[u8], depth: usize) -> Result<Self, SmtError> {
        check_depth(depth)?;
        let map_len = bitmap_len(depth);
        if bytes.len() < map_len {
            return Err(SmtError::MalformedProof(format!(
                "need a {map_len}-byte bitmap, got {} bytes",
                bytes.len()
            )));
        }
        let (bitmap, body) = bytes.split_at(map_len);
        let is_set = |level: usize| (bitmap[map_len - 1 - level / 8] >> (level % 8)) & 1 == 1;

        for level in depth..map_len * 8 {
            if is_set(level) {
                return Err(SmtError::MalformedProof(format!(
                    "bitmap marks level {level} in a depth-{depth} tree"
                )));
            }
        }

        let present = (0..depth).filter(|&l| is_set(l)).count();
        if body.len() != present * 32 {
            return Err(SmtError::MalformedProof(format!(
                "bitmap marks {present} siblings but body holds {} bytes",
                body.len()
            )));
        }

        let defaults = DefaultHashes::new(depth)?;
        let mut chunks = body.chunks_exact(32);
        let mut siblings = Vec::with_capacity(depth);
        for level in 0..depth {
            if is_set(level) {
                let mut sibling = [0u8; 32];
                if let Some(chunk) = chunks.next() {
                    sibling.copy_from_slice(chunk);
                }
                siblings.push(sibling);
            } else {
                siblings.push(*defaults.at(level));
            }
        }
        Ok(Self { siblings })
    }

    /// Recompute the root for `leaf` at `slot` and compare with `root`.
    pub fn verify(&self, root: &BlockRoot, slot: &CoinSlot, leaf: &TxHash) -> bool {
        verify(root, slot, leaf, self)
    }
}

/// Check that `proof` connects `leaf` at `slot` to `root`.
///
/// At level `i` the running hash is the left child when bit `i` of the slot
/// is zero. A wrong proof is reported as `false`, never as an error; proofs
/// of depth zero or above 256 are always `false`.
pub fn verify(root: &BlockRoot, slot: &CoinSlot, leaf: &TxHash, proof: &MerkleProof) -> bool {
    let depth = proof.depth();
    if depth == 0 || depth > MAX_DEPTH {
        return false;
    }
    let mut current = *leaf.as_bytes();
    for (level, sibling) in proof.siblings.iter().enumerate() {
        current = if slot.bit(level) {
            hash_pair(sibling, &current)
        } else {
            hash_pair(&current, sibling)
        };
    }
    &current == root.as_bytes()
}
