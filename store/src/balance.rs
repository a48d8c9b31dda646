//! Root-chain account balance trait.

use crate::StoreError;
use plasma_types::AccountId;

pub trait BalanceStore {
    /// Balance of `account`; unknown accounts hold 0.
    fn balance(&self, account: &AccountId) -> Result<u64, StoreError>;

    fn set_balance(&self, account: &AccountId, amount: u64) -> Result<(), StoreError>;

    fn total_balance(&self) -> Result<u128, StoreError>;
}
