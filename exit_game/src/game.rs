//! The exit game state machine.
//!
//! Every operation reads what it needs and runs all of its checks before the
//! first write to the root chain, so a rejected operation leaves coins,
//! exits, blocks and balances untouched. Atomicity across several writes is
//! up to the store.

use plasma_crypto::{from_on_chain_hex, recover_public_key, sha256_multi};
use plasma_smt::{MerkleProof, SparseMerkleTree};
use plasma_store::{
    BalanceStore, ChildBlock, ChildBlockStore, Coin, CoinStore, ExitRecord, ExitStore, RootChain,
};
use plasma_transactions::{deposit_hash, ChildChainTx, DepositTx, HashedTx};
use plasma_types::{
    AccountId, BlockKind, BlockRoot, CoinSlot, ExitState, ProtocolParams, PublicKey,
    RecoverableSignature, Timestamp, TxHash,
};
use plasma_utils::{format_duration, StatsCounter};
use tracing::{debug, info, warn};

use crate::claim::{ExitClaim, TxInclusion};
use crate::config::{ConfigError, ExitGameConfig};
use crate::error::ExitError;
use crate::events::ExitEvent;

const SLOT_DOMAIN: &[u8] = b"plasma-coin";

const STATS: &[&str] = &[
    "deposits",
    "empty_coins",
    "blocks_submitted",
    "exits_started",
    "exits_challenged",
    "challenges_rejected",
    "exits_finalized",
    "withdrawals",
];

/// Exit game over a root chain `R`.
pub struct ExitGame<R: RootChain> {
    root_chain: R,
    params: ProtocolParams,
    operator: AccountId,
    slot_nonce: u64,
    stats: StatsCounter,
    pending_events: Vec<ExitEvent>,
}

impl<R: RootChain> ExitGame<R> {
    pub fn new(root_chain: R, params: ProtocolParams, operator: AccountId) -> Result<Self, ConfigError> {
        params
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(Self {
            root_chain,
            params,
            operator,
            slot_nonce: 0,
            stats: StatsCounter::new(STATS),
            pending_events: Vec::new(),
        })
    }

    pub fn from_config(config: &ExitGameConfig, root_chain: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(root_chain, config.params.clone(), config.operator_account()?)
    }

    pub fn root_chain(&self) -> &R {
        &self.root_chain
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    pub fn operator(&self) -> &AccountId {
        &self.operator
    }

    pub fn stats(&self) -> &StatsCounter {
        &self.stats
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<ExitEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ── Root-chain bookkeeping ──────────────────────────────────────────

    /// Lock `amount` of `owner`'s root-chain balance into a new coin.
    ///
    /// The coin's deposit block is committed at the next free height; its
    /// root covers the single leaf `deposit_hash(slot)`.
    pub fn deposit(
        &mut self,
        owner: &AccountId,
        owner_pub_key: PublicKey,
        amount: u64,
        now: Timestamp,
    ) -> Result<CoinSlot, ExitError> {
        if amount == 0 {
            return Err(ExitError::InvalidAmount(amount));
        }
        let available = self.root_chain.balance_store().balance(owner)?;
        if available < amount {
            return Err(ExitError::InsufficientBalance {
                account: owner.clone(),
                needed: amount,
                available,
            });
        }
        let height = self.next_deposit_height()?;
        let slot = self.next_slot(owner)?;
        let root = SparseMerkleTree::single_leaf(self.params.smt_depth, slot, deposit_hash(&slot))?
            .root();

        self.root_chain
            .balance_store()
            .set_balance(owner, available - amount)?;
        self.root_chain.coin_store().put_coin(&Coin {
            slot,
            denomination: amount,
            balance: amount,
            owner: owner.clone(),
            owner_pub_key: Some(owner_pub_key),
            created_at: now,
        })?;
        self.root_chain.block_store().put_block(&ChildBlock {
            height,
            root,
            kind: BlockKind::Deposit,
            created_at: now,
        })?;
        self.slot_nonce += 1;

        info!(%slot, owner = %owner, amount, block = height, "coin deposited");
        self.stats.increment("deposits");
        self.pending_events.push(ExitEvent::CoinDeposited {
            slot,
            owner: owner.clone(),
            amount,
            block: height,
        });
        Ok(slot)
    }

    /// Register a coin with no value; liquidity can be added once later.
    pub fn create_empty_coin(
        &mut self,
        owner: &AccountId,
        now: Timestamp,
    ) -> Result<CoinSlot, ExitError> {
        let slot = self.next_slot(owner)?;
        self.root_chain.coin_store().put_coin(&Coin {
            slot,
            denomination: 0,
            balance: 0,
            owner: owner.clone(),
            owner_pub_key: None,
            created_at: now,
        })?;
        self.slot_nonce += 1;

        info!(%slot, owner = %owner, "empty coin created");
        self.stats.increment("empty_coins");
        self.pending_events.push(ExitEvent::EmptyCoinCreated {
            slot,
            owner: owner.clone(),
        });
        Ok(slot)
    }

    /// Set the denomination of an empty coin. Allowed once.
    pub fn provide_liquidity(&mut self, slot: &CoinSlot, amount: u64) -> Result<(), ExitError> {
        if amount == 0 {
            return Err(ExitError::InvalidAmount(amount));
        }
        let mut coin = self
            .root_chain
            .query_coin(slot)?
            .ok_or(ExitError::CoinNotFound(*slot))?;
        if coin.denomination != 0 {
            return Err(ExitError::LiquidityAlreadyProvided(*slot));
        }
        coin.denomination = amount;
        self.root_chain.coin_store().put_coin(&coin)?;

        info!(%slot, amount, "liquidity provided");
        self.pending_events
            .push(ExitEvent::LiquidityProvided { slot: *slot, amount });
        Ok(())
    }

    /// Commit an operator block root at the next interval boundary.
    pub fn submit_block(
        &mut self,
        caller: &AccountId,
        root: BlockRoot,
        now: Timestamp,
    ) -> Result<u64, ExitError> {
        if caller != &self.operator {
            return Err(ExitError::NotOperator(caller.clone()));
        }
        let interval = self.params.child_block_interval;
        let current = self.current_block()?;
        let height = (current / interval)
            .checked_add(1)
            .and_then(|n| n.checked_mul(interval))
            .ok_or_else(|| ExitError::InvalidClaim("child block height overflow".into()))?;
        self.root_chain.submit_block_root(height, root, now)?;

        info!(height, %root, "child block submitted");
        self.stats.increment("blocks_submitted");
        self.pending_events
            .push(ExitEvent::BlockSubmitted { height, root });
        Ok(height)
    }

    /// Check a compressed proof of `tx_hash` at `slot` against `root`.
    pub fn check_membership(
        &self,
        tx_hash: &TxHash,
        root: &BlockRoot,
        slot: &CoinSlot,
        proof_bytes: &[u8],
    ) -> Result<bool, ExitError> {
        let proof = MerkleProof::from_compressed(proof_bytes, self.params.smt_depth)?;
        Ok(proof.verify(root, slot, tx_hash))
    }

    // ── Exit lifecycle ──────────────────────────────────────────────────

    /// Open an exit for `claim.slot` on behalf of `caller`.
    pub fn start_exit(
        &mut self,
        caller: &AccountId,
        claim: &ExitClaim,
        now: Timestamp,
    ) -> Result<(), ExitError> {
        let slot = claim.slot;
        if let Some(existing) = self.root_chain.query_exit(&slot)? {
            if existing.state.is_live() {
                return Err(ExitError::ExitAlreadyActive(slot));
            }
        }
        let coin = self
            .root_chain
            .query_coin(&slot)?
            .ok_or(ExitError::CoinNotFound(slot))?;

        let exiting = HashedTx::decode(&claim.exiting.tx_bytes)?;
        if exiting.tx().slot() != &slot {
            return Err(ExitError::InvalidClaim(format!(
                "exiting transaction spends slot {}, not {slot}",
                exiting.tx().slot()
            )));
        }
        if exiting.tx().owner() != caller {
            return Err(ExitError::NotEntitled {
                slot,
                caller: caller.clone(),
            });
        }
        self.verify_inclusion(&slot, &exiting.hash(), &claim.exiting)?;

        let signature = from_on_chain_hex(&claim.signature)?;
        let (signer, parent_block) = match (&claim.parent, exiting.tx()) {
            (None, ChildChainTx::Deposit(deposit)) => {
                check_deposit_matches_coin(deposit, &coin)?;
                (deposit.owner_pub_key, None)
            }
            (None, ChildChainTx::Transfer(_)) => {
                return Err(ExitError::InvalidClaim(
                    "a transfer exit must include its parent transaction".into(),
                ));
            }
            (Some(_), ChildChainTx::Deposit(_)) => {
                return Err(ExitError::InvalidClaim(
                    "a deposit exit takes no parent transaction".into(),
                ));
            }
            (Some(parent_inclusion), ChildChainTx::Transfer(_)) => {
                let parent = HashedTx::decode(&parent_inclusion.tx_bytes)?;
                if parent.tx().slot() != &slot {
                    return Err(ExitError::InvalidClaim(format!(
                        "parent transaction spends slot {}, not {slot}",
                        parent.tx().slot()
                    )));
                }
                if parent_inclusion.block >= claim.exiting.block {
                    return Err(ExitError::InvalidClaim(format!(
                        "parent block {} is not before exiting block {}",
                        parent_inclusion.block, claim.exiting.block
                    )));
                }
                self.verify_inclusion(&slot, &parent.hash(), parent_inclusion)?;
                if let ChildChainTx::Deposit(deposit) = parent.tx() {
                    check_deposit_matches_coin(deposit, &coin)?;
                }
                (*parent.tx().owner_pub_key(), Some(parent_inclusion.block))
            }
        };
        check_signer(&exiting, &signature, &signer)?;

        let amount = exiting.tx().balance();
        if amount > coin.denomination {
            return Err(ExitError::InvalidClaim(format!(
                "exit amount {amount} exceeds denomination {}",
                coin.denomination
            )));
        }

        let record = ExitRecord {
            slot,
            exitor: caller.clone(),
            owner_pub_key: *exiting.tx().owner_pub_key(),
            amount,
            parent_block,
            exiting_block: claim.exiting.block,
            created_at: now,
            state: ExitState::Exiting,
        };
        self.root_chain.exit_store().put_exit(&record)?;

        info!(
            %slot,
            exitor = %caller,
            amount,
            exiting_block = claim.exiting.block,
            window = %format_duration(self.params.challenge_window_secs),
            "exit started"
        );
        self.stats.increment("exits_started");
        self.pending_events.push(ExitEvent::ExitStarted {
            slot,
            exitor: caller.clone(),
            amount,
            exiting_block: claim.exiting.block,
        });
        Ok(())
    }

    /// Cancel an exit by proving the coin was spent after the exiting block.
    ///
    /// The spend must be a transfer of the same slot, committed at
    /// `later_block`, and signed by the key the exit was opened with. Only
    /// accepted while the exit's challenge window is still open at `now`.
    #[allow(clippy::too_many_arguments)]
    pub fn challenge_after(
        &mut self,
        challenger: &AccountId,
        slot: &CoinSlot,
        later_block: u64,
        tx_bytes: &[u8],
        proof: &[u8],
        signature: &str,
        now: Timestamp,
    ) -> Result<(), ExitError> {
        let result = self.check_challenge(slot, later_block, tx_bytes, proof, signature, now);
        let mut record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(%slot, challenger = %challenger, later_block, error = %e, "challenge rejected");
                self.stats.increment("challenges_rejected");
                return Err(e);
            }
        };
        record.state = ExitState::Challenged;
        self.root_chain.exit_store().put_exit(&record)?;

        info!(%slot, challenger = %challenger, block = later_block, "exit challenged");
        self.stats.increment("exits_challenged");
        self.pending_events.push(ExitEvent::ExitChallenged {
            slot: *slot,
            challenger: challenger.clone(),
            block: later_block,
        });
        Ok(())
    }

    fn check_challenge(
        &self,
        slot: &CoinSlot,
        later_block: u64,
        tx_bytes: &[u8],
        proof: &[u8],
        signature: &str,
        now: Timestamp,
    ) -> Result<ExitRecord, ExitError> {
        let record = self.exit_in_state(slot, ExitState::Exiting)?;
        let window = self.params.challenge_window_secs;
        if record.created_at.has_expired(window, now) {
            return Err(ExitError::ChallengeWindowClosed {
                slot: *slot,
                closed_secs: record.created_at.elapsed_since(now).saturating_sub(window),
            });
        }
        let spend = HashedTx::decode(tx_bytes)?;
        if spend.tx().is_deposit() {
            return Err(ExitError::InvalidClaim(
                "only a transfer can challenge an exit".into(),
            ));
        }
        if spend.tx().slot() != slot {
            return Err(ExitError::InvalidClaim(format!(
                "challenging transaction spends slot {}, not {slot}",
                spend.tx().slot()
            )));
        }
        if later_block <= record.exiting_block {
            return Err(ExitError::InvalidClaim(format!(
                "block {later_block} is not after exiting block {}",
                record.exiting_block
            )));
        }
        let inclusion = TxInclusion::new(tx_bytes.to_vec(), proof.to_vec(), later_block);
        self.verify_inclusion(slot, &spend.hash(), &inclusion)?;
        let signature = from_on_chain_hex(signature)?;
        check_signer(&spend, &signature, &record.owner_pub_key)?;
        Ok(record)
    }

    /// Close the challenge window on an unchallenged exit.
    pub fn finalize_exit(&mut self, slot: &CoinSlot, now: Timestamp) -> Result<(), ExitError> {
        let mut record = self.exit_in_state(slot, ExitState::Exiting)?;
        let window = self.params.challenge_window_secs;
        if !record.created_at.has_expired(window, now) {
            let remaining_secs = record.created_at.remaining(window, now);
            debug!(%slot, remaining = %format_duration(remaining_secs), "finalize too early");
            return Err(ExitError::ChallengeWindowOpen {
                slot: *slot,
                remaining_secs,
            });
        }
        let mut coin = self
            .root_chain
            .query_coin(slot)?
            .ok_or(ExitError::CoinNotFound(*slot))?;

        coin.owner = record.exitor.clone();
        coin.owner_pub_key = Some(record.owner_pub_key);
        coin.balance = record.amount;
        record.state = ExitState::Finalized;
        self.root_chain.coin_store().put_coin(&coin)?;
        self.root_chain.exit_store().put_exit(&record)?;

        info!(%slot, exitor = %record.exitor, amount = record.amount, "exit finalized");
        self.stats.increment("exits_finalized");
        self.pending_events.push(ExitEvent::ExitFinalized {
            slot: *slot,
            exitor: record.exitor,
            amount: record.amount,
        });
        Ok(())
    }

    /// Pay a finalized exit to its exitor and retire the coin.
    pub fn withdraw(&mut self, caller: &AccountId, slot: &CoinSlot) -> Result<u64, ExitError> {
        let record = self.exit_in_state(slot, ExitState::Finalized)?;
        if caller != &record.exitor {
            return Err(ExitError::NotEntitled {
                slot: *slot,
                caller: caller.clone(),
            });
        }
        let balance = self.root_chain.balance_store().balance(caller)?;
        let credited = balance
            .checked_add(record.amount)
            .ok_or_else(|| ExitError::BalanceOverflow(caller.clone()))?;

        self.root_chain.balance_store().set_balance(caller, credited)?;
        self.root_chain.exit_store().delete_exit(slot)?;
        self.root_chain.coin_store().delete_coin(slot)?;

        info!(%slot, exitor = %caller, amount = record.amount, "exit withdrawn");
        self.stats.increment("withdrawals");
        self.pending_events.push(ExitEvent::Withdrawn {
            slot: *slot,
            exitor: caller.clone(),
            amount: record.amount,
        });
        Ok(record.amount)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn query_exit(&self, slot: &CoinSlot) -> Result<Option<ExitRecord>, ExitError> {
        Ok(self.root_chain.query_exit(slot)?)
    }

    pub fn query_block_root(&self, height: u64) -> Result<Option<BlockRoot>, ExitError> {
        Ok(self.root_chain.query_block_root(height)?)
    }

    pub fn query_coin(&self, slot: &CoinSlot) -> Result<Option<Coin>, ExitError> {
        Ok(self.root_chain.query_coin(slot)?)
    }

    /// State of the exit on `slot`; [`ExitState::None`] when there is none.
    pub fn exit_state(&self, slot: &CoinSlot) -> Result<ExitState, ExitError> {
        Ok(self
            .root_chain
            .query_exit(slot)?
            .map(|r| r.state)
            .unwrap_or_default())
    }

    pub fn balance_of(&self, account: &AccountId) -> Result<u64, ExitError> {
        Ok(self.root_chain.balance_store().balance(account)?)
    }

    /// Height of the most recent child block, deposit or submitted.
    pub fn current_block(&self) -> Result<u64, ExitError> {
        Ok(self.root_chain.block_store().latest_height()?)
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    fn next_deposit_height(&self) -> Result<u64, ExitError> {
        let height = self.current_block()? + 1;
        if height % self.params.child_block_interval == 0 {
            return Err(ExitError::DepositRangeExhausted(height));
        }
        Ok(height)
    }

    fn next_slot(&self, owner: &AccountId) -> Result<CoinSlot, ExitError> {
        let mut nonce = self.slot_nonce;
        loop {
            let slot = CoinSlot::new(sha256_multi(&[
                SLOT_DOMAIN,
                owner.as_str().as_bytes(),
                &nonce.to_be_bytes(),
            ]));
            if !self.root_chain.coin_store().coin_exists(&slot)? {
                return Ok(slot);
            }
            nonce += 1;
        }
    }

    fn exit_in_state(&self, slot: &CoinSlot, expected: ExitState) -> Result<ExitRecord, ExitError> {
        let record = self
            .root_chain
            .query_exit(slot)?
            .ok_or(ExitError::NoExit(*slot))?;
        if record.state != expected {
            return Err(ExitError::WrongExitState {
                slot: *slot,
                actual: record.state,
                expected,
            });
        }
        Ok(record)
    }

    fn verify_inclusion(
        &self,
        slot: &CoinSlot,
        leaf: &TxHash,
        inclusion: &TxInclusion,
    ) -> Result<(), ExitError> {
        let root = self
            .root_chain
            .query_block_root(inclusion.block)?
            .ok_or(ExitError::UnknownBlock(inclusion.block))?;
        if !self.check_membership(leaf, &root, slot, &inclusion.proof)? {
            return Err(ExitError::ProofRejected {
                slot: *slot,
                block: inclusion.block,
            });
        }
        debug!(%slot, block = inclusion.block, "inclusion verified");
        Ok(())
    }
}

fn check_deposit_matches_coin(deposit: &DepositTx, coin: &Coin) -> Result<(), ExitError> {
    if deposit.owner != coin.owner {
        return Err(ExitError::InvalidClaim(format!(
            "deposit owner {} does not match coin owner {}",
            deposit.owner, coin.owner
        )));
    }
    if coin.owner_pub_key != Some(deposit.owner_pub_key) {
        return Err(ExitError::InvalidClaim(
            "deposit key does not match the key registered with the coin".into(),
        ));
    }
    if deposit.balance != coin.denomination {
        return Err(ExitError::InvalidClaim(format!(
            "deposit balance {} does not match denomination {}",
            deposit.balance, coin.denomination
        )));
    }
    Ok(())
}

fn check_signer(
    tx: &HashedTx,
    signature: &RecoverableSignature,
    expected: &PublicKey,
) -> Result<(), ExitError> {
    let recovered = recover_public_key(tx.hash().as_bytes(), signature)?;
    if &recovered != expected {
        return Err(ExitError::WrongSigner {
            expected: *expected,
            recovered,
        });
    }
    Ok(())
}
