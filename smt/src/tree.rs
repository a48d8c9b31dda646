use std::collections::{HashMap, HashSet};

use plasma_crypto::hash_pair;
use plasma_types::{BlockRoot, CoinSlot, TxHash};

use crate::{check_depth, DefaultHashes, MerkleProof, SmtError};

/// A sparse Merkle tree of fixed depth.
///
/// `levels[l]` holds the non-default nodes at height `l`, keyed by node
/// index (the masked slot shifted right by `l`). Level 0 holds leaves and
/// `levels[depth]` holds at most the root at index zero.
#[derive(Clone, Debug)]
pub struct SparseMerkleTree {
    depth: usize,
    defaults: DefaultHashes,
    levels: Vec<HashMap<CoinSlot, [u8; 32]>>,
}

impl SparseMerkleTree {
    pub fn empty(depth: usize) -> Result<Self, SmtError> {
        let defaults = DefaultHashes::new(depth)?;
        Ok(Self {
            depth,
            defaults,
            levels: vec![HashMap::new(); depth + 1],
        })
    }

    /// Build a tree from `(slot, leaf)` pairs.
    ///
    /// Slots are reduced to their low `depth` bits; two slots that collide
    /// after reduction are rejected. Leaves equal to the default leaf are
    /// treated as absent.
    pub fn build(
        depth: usize,
        leaves: impl IntoIterator<Item = (CoinSlot, TxHash)>,
    ) -> Result<Self, SmtError> {
        check_depth(depth)?;
        let mut tree = Self::empty(depth)?;

        let mut positions = HashSet::new();
        for (slot, leaf) in leaves {
            let index = slot.masked(depth);
            if !positions.insert(index) {
                return Err(SmtError::DuplicateLeaf(index));
            }
            if !leaf.is_zero() {
                tree.levels[0].insert(index, *leaf.as_bytes());
            }
        }

        for level in 0..depth {
            let mut parents = HashMap::with_capacity(tree.levels[level].len());
            for index in tree.levels[level].keys() {
                let parent = index.parent();
                if parents.contains_key(&parent) {
                    continue;
                }
                let hash = tree.hash_children(level, index);
                parents.insert(parent, hash);
            }
            tree.levels[level + 1] = parents;
        }

        Ok(tree)
    }

    /// A tree holding one leaf, as used for deposit blocks.
    pub fn single_leaf(depth: usize, slot: CoinSlot, leaf: TxHash) -> Result<Self, SmtError> {
        Self::build(depth, [(slot, leaf)])
    }

    fn node(&self, level: usize, index: &CoinSlot) -> &[u8; 32] {
        self.levels[level]
            .get(index)
            .unwrap_or_else(|| self.defaults.at(level))
    }

    fn hash_children(&self, level: usize, index: &CoinSlot) -> [u8; 32] {
        let (left, right) = if index.bit(0) {
            (index.sibling(), *index)
        } else {
            (*index, index.sibling())
        };
        hash_pair(self.node(level, &left), self.node(level, &right))
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of non-default leaves.
    pub fn len(&self) -> usize {
        self.levels[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels[0].is_empty()
    }

    pub fn root(&self) -> BlockRoot {
        BlockRoot::new(*self.node(self.depth, &CoinSlot::ZERO))
    }

    /// Leaf stored for `slot`, or the default leaf.
    pub fn get(&self, slot: &CoinSlot) -> TxHash {
        TxHash::new(*self.node(0, &slot.masked(self.depth)))
    }

    /// The `depth` sibling hashes from the leaf of `slot` up to the root.
    pub fn proof(&self, slot: &CoinSlot) -> MerkleProof {
        let mut index = slot.masked(self.depth);
        let mut siblings = Vec::with_capacity(self.depth);
        for level in 0..self.depth {
            siblings.push(*self.node(level, &index.sibling()));
            index = index.parent();
        }
        MerkleProof::new(siblings)
    }

    /// Set the leaf for `slot` and rehash its path. A default leaf clears it.
    pub fn update(&mut self, slot: &CoinSlot, leaf: TxHash) {
        let mut index = slot.masked(self.depth);
        if leaf.is_zero() {
            self.levels[0].remove(&index);
        } else {
            self.levels[0].insert(index, *leaf.as_bytes());
        }
        for level in 0..self.depth {
            let hash = self.hash_children(level, &index);
            index = index.parent();
            if &hash == self.defaults.at(level + 1) {
                self.levels[level + 1].remove(&index);
            } else {
                self.levels[level + 1].insert(index, hash);
            }
        }
    }
}
