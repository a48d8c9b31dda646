//! Nullable store, in-memory root-chain state for testing.

use plasma_store::record::{from_bytes, to_bytes};
use plasma_store::{
    BalanceStore, ChildBlock, ChildBlockStore, Coin, CoinStore, ExitRecord, ExitStore, RootChain,
    StoreError,
};
use plasma_types::{AccountId, CoinSlot};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// An in-memory implementation of every root-chain store.
///
/// Coins are kept as encoded bytes, the way a persistent backend would hold
/// them. Writes can be switched to fail with [`StoreError::Backend`] to
/// exercise error paths.
pub struct NullStore {
    coins: Mutex<HashMap<CoinSlot, Vec<u8>>>,
    blocks: Mutex<BTreeMap<u64, ChildBlock>>,
    exits: Mutex<HashMap<CoinSlot, ExitRecord>>,
    balances: Mutex<HashMap<AccountId, u64>>,
    fail_writes: AtomicBool,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            coins: Mutex::new(HashMap::new()),
            blocks: Mutex::new(BTreeMap::new()),
            exits: Mutex::new(HashMap::new()),
            balances: Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Seed a root-chain balance.
    pub fn with_balance(self, account: &AccountId, amount: u64) -> Self {
        self.balances
            .lock()
            .unwrap()
            .insert(account.clone(), amount);
        self
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("writes disabled".into()));
        }
        Ok(())
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinStore for NullStore {
    fn get_coin(&self, slot: &CoinSlot) -> Result<Coin, StoreError> {
        let coins = self.coins.lock().unwrap();
        let bytes = coins
            .get(slot)
            .ok_or_else(|| StoreError::NotFound(format!("coin {slot}")))?;
        from_bytes(bytes)
    }

    fn put_coin(&self, coin: &Coin) -> Result<(), StoreError> {
        self.check_writable()?;
        let bytes = to_bytes(coin)?;
        self.coins.lock().unwrap().insert(coin.slot, bytes);
        Ok(())
    }

    fn delete_coin(&self, slot: &CoinSlot) -> Result<(), StoreError> {
        self.check_writable()?;
        self.coins
            .lock()
            .unwrap()
            .remove(slot)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("coin {slot}")))
    }

    fn coin_exists(&self, slot: &CoinSlot) -> Result<bool, StoreError> {
        Ok(self.coins.lock().unwrap().contains_key(slot))
    }

    fn coin_count(&self) -> Result<u64, StoreError> {
        Ok(self.coins.lock().unwrap().len() as u64)
    }

    fn coins_of(&self, owner: &AccountId) -> Result<Vec<Coin>, StoreError> {
        let coins = self.coins.lock().unwrap();
        let mut owned = Vec::new();
        for bytes in coins.values() {
            let coin: Coin = from_bytes(bytes)?;
            if &coin.owner == owner {
                owned.push(coin);
            }
        }
        owned.sort_by_key(|c| c.created_at);
        Ok(owned)
    }
}

impl ChildBlockStore for NullStore {
    fn put_block(&self, block: &ChildBlock) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut blocks = self.blocks.lock().unwrap();
        if blocks.contains_key(&block.height) {
            return Err(StoreError::Duplicate(format!("block {}", block.height)));
        }
        blocks.insert(block.height, block.clone());
        Ok(())
    }

    fn get_block(&self, height: u64) -> Result<ChildBlock, StoreError> {
        self.blocks
            .lock()
            .unwrap()
            .get(&height)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("block {height}")))
    }

    fn block_exists(&self, height: u64) -> Result<bool, StoreError> {
        Ok(self.blocks.lock().unwrap().contains_key(&height))
    }

    fn latest_height(&self) -> Result<u64, StoreError> {
        Ok(self
            .blocks
            .lock()
            .unwrap()
            .keys()
            .next_back()
            .copied()
            .unwrap_or(0))
    }

    fn block_count(&self) -> Result<u64, StoreError> {
        Ok(self.blocks.lock().unwrap().len() as u64)
    }
}

impl ExitStore for NullStore {
    fn get_exit(&self, slot: &CoinSlot) -> Result<ExitRecord, StoreError> {
        self.exits
            .lock()
            .unwrap()
            .get(slot)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("exit {slot}")))
    }

    fn put_exit(&self, record: &ExitRecord) -> Result<(), StoreError> {
        self.check_writable()?;
        self.exits
            .lock()
            .unwrap()
            .insert(record.slot, record.clone());
        Ok(())
    }

    fn delete_exit(&self, slot: &CoinSlot) -> Result<(), StoreError> {
        self.check_writable()?;
        self.exits.lock().unwrap().remove(slot);
        Ok(())
    }

    fn exit_count(&self) -> Result<u64, StoreError> {
        Ok(self.exits.lock().unwrap().len() as u64)
    }

    fn iter_exits(&self) -> Result<Vec<ExitRecord>, StoreError> {
        Ok(self.exits.lock().unwrap().values().cloned().collect())
    }
}

impl BalanceStore for NullStore {
    fn balance(&self, account: &AccountId) -> Result<u64, StoreError> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(account)
            .copied()
            .unwrap_or(0))
    }

    fn set_balance(&self, account: &AccountId, amount: u64) -> Result<(), StoreError> {
        self.check_writable()?;
        self.balances
            .lock()
            .unwrap()
            .insert(account.clone(), amount);
        Ok(())
    }

    fn total_balance(&self) -> Result<u128, StoreError> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .values()
            .map(|&b| b as u128)
            .sum())
    }
}

impl RootChain for NullStore {
    type Coins = Self;
    type Blocks = Self;
    type Exits = Self;
    type Balances = Self;

    fn coin_store(&self) -> &Self {
        self
    }

    fn block_store(&self) -> &Self {
        self
    }

    fn exit_store(&self) -> &Self {
        self
    }

    fn balance_store(&self) -> &Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plasma_types::{BlockKind, BlockRoot, ExitState, Timestamp};

    fn alice() -> AccountId {
        AccountId::new("alice").unwrap()
    }

    fn coin(n: u64) -> Coin {
        Coin {
            slot: CoinSlot::from_u64(n),
            denomination: 10,
            balance: 10,
            owner: alice(),
            owner_pub_key: Some(plasma_crypto::keypair_from_seed(&[1; 32]).public),
            created_at: Timestamp::new(n),
        }
    }

    #[test]
    fn coins_roundtrip_through_bytes() {
        let store = NullStore::new();
        store.put_coin(&coin(1)).unwrap();
        store.put_coin(&coin(2)).unwrap();
        assert_eq!(store.get_coin(&CoinSlot::from_u64(1)).unwrap(), coin(1));
        assert_eq!(store.coins_of(&alice()).unwrap(), vec![coin(1), coin(2)]);
        store.delete_coin(&CoinSlot::from_u64(1)).unwrap();
        assert!(!store.coin_exists(&CoinSlot::from_u64(1)).unwrap());
        assert!(store.get_coin(&CoinSlot::from_u64(1)).unwrap_err().is_not_found());
    }

    #[test]
    fn block_heights_are_write_once() {
        let store = NullStore::new();
        assert_eq!(store.latest_height().unwrap(), 0);
        let block = ChildBlock {
            height: 1000,
            root: BlockRoot::new([1; 32]),
            kind: BlockKind::Submitted,
            created_at: Timestamp::new(0),
        };
        store.put_block(&block).unwrap();
        assert!(matches!(store.put_block(&block), Err(StoreError::Duplicate(_))));
        assert_eq!(store.latest_height().unwrap(), 1000);
    }

    #[test]
    fn root_chain_queries_report_absence_as_none() {
        let store = NullStore::new();
        let slot = CoinSlot::from_u64(3);
        assert_eq!(store.query_coin(&slot).unwrap(), None);
        assert_eq!(store.query_exit(&slot).unwrap(), None);
        assert_eq!(store.query_block_root(1000).unwrap(), None);

        store
            .submit_block_root(1000, BlockRoot::new([9; 32]), Timestamp::new(1))
            .unwrap();
        assert_eq!(
            store.query_block_root(1000).unwrap(),
            Some(BlockRoot::new([9; 32]))
        );
        let summary = store.summary().unwrap();
        assert_eq!(summary.blocks, 1);
        assert_eq!(summary.latest_height, 1000);
    }

    #[test]
    fn exits_by_state() {
        let store = NullStore::new();
        let key = plasma_crypto::keypair_from_seed(&[1; 32]).public;
        for (n, state) in [(1, ExitState::Exiting), (2, ExitState::Challenged), (3, ExitState::Exiting)] {
            store
                .put_exit(&ExitRecord {
                    slot: CoinSlot::from_u64(n),
                    exitor: alice(),
                    owner_pub_key: key,
                    amount: 1,
                    parent_block: None,
                    exiting_block: 1,
                    created_at: Timestamp::new(0),
                    state,
                })
                .unwrap();
        }
        assert_eq!(store.exits_in_state(ExitState::Exiting).unwrap(), 2);
        assert_eq!(store.exit_count().unwrap(), 3);
    }

    #[test]
    fn failing_writes_leave_state_alone() {
        let store = NullStore::new().with_balance(&alice(), 5);
        store.set_fail_writes(true);
        assert!(matches!(
            store.set_balance(&alice(), 0),
            Err(StoreError::Backend(_))
        ));
        assert!(store.put_coin(&coin(1)).is_err());
        assert_eq!(store.balance(&alice()).unwrap(), 5);
        assert_eq!(store.total_balance().unwrap(), 5);
        store.set_fail_writes(false);
        store.put_coin(&coin(1)).unwrap();
    }
}
