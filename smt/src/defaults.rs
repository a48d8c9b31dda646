use plasma_crypto::hash_pair;

use crate::{check_depth, SmtError, DEFAULT_LEAF};

/// Per-level hashes of empty subtrees.
///
/// `at(0)` is the empty leaf; `at(l)` is the root of an empty subtree of
/// height `l`; `at(depth)` is the root of an empty tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultHashes {
    levels: Vec<[u8; 32]>,
}

impl DefaultHashes {
    pub fn new(depth: usize) -> Result<Self, SmtError> {
        check_depth(depth)?;
        let mut levels = Vec::with_capacity(depth + 1);
        let mut current = *DEFAULT_LEAF.as_bytes();
        levels.push(current);
        for _ in 0..depth {
            current = hash_pair(&current, &current);
            levels.push(current);
        }
        Ok(Self { levels })
    }

    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// Default hash at `level`; levels above the depth saturate to the empty root.
    pub fn at(&self, level: usize) -> &[u8; 32] {
        let idx = level.min(self.levels.len() - 1);
        &self.levels[idx]
    }

    pub fn empty_root(&self) -> &[u8; 32] {
        self.at(self.depth())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plasma_crypto::sha256;

    #[test]
    fn level_one_is_hash_of_two_zero_leaves() {
        let d = DefaultHashes::new(4).unwrap();
        assert_eq!(d.at(0), &[0u8; 32]);
        assert_eq!(d.at(1), &sha256(&[0u8; 64]));
        assert_eq!(d.depth(), 4);
        assert_eq!(d.empty_root(), d.at(4));
    }

    #[test]
    fn rejects_bad_depth() {
        assert_eq!(DefaultHashes::new(0).unwrap_err(), SmtError::InvalidDepth(0));
        assert_eq!(DefaultHashes::new(257).unwrap_err(), SmtError::InvalidDepth(257));
        assert!(DefaultHashes::new(256).is_ok());
    }
}
