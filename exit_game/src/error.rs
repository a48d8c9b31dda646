use plasma_codec::CodecError;
use plasma_crypto::{CryptoError, SignatureFormatError};
use plasma_smt::SmtError;
use plasma_store::StoreError;
use plasma_transactions::TransactionError;
use plasma_types::{AccountId, CoinSlot, ExitState, PublicKey};
use plasma_utils::format_duration;
use thiserror::Error;

/// Error classes reported to callers of the exit game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value could not be encoded.
    Encoding,
    /// Transaction, proof or signature bytes are malformed.
    Decoding,
    /// An inclusion proof does not verify against the committed root.
    ProofVerificationFailure,
    /// A signature is malformed or was produced by the wrong key.
    SignatureInvalid,
    /// The operation is not allowed in the current state.
    StateConflict,
    /// The root-chain store failed.
    Store,
}

/// What a caller can usefully do after an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Fix the submitted data and try again.
    CorrectAndRetry,
    /// Retry the same request later.
    Wait,
    /// The request can never succeed.
    Abandon,
}

#[derive(Debug, Error)]
pub enum ExitError {
    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("merkle proof error: {0}")]
    Proof(#[from] SmtError),

    #[error("signature format error: {0}")]
    SignatureFormat(#[from] SignatureFormatError),

    #[error("signature recovery failed: {0}")]
    SignatureRecovery(#[from] CryptoError),

    #[error("signature recovers to {recovered}, expected {expected}")]
    WrongSigner {
        expected: PublicKey,
        recovered: PublicKey,
    },

    #[error("no child block committed at height {0}")]
    UnknownBlock(u64),

    #[error("inclusion proof for slot {slot} does not verify against block {block}")]
    ProofRejected { slot: CoinSlot, block: u64 },

    #[error("coin {0} does not exist")]
    CoinNotFound(CoinSlot),

    #[error("slot {0} already has an active exit")]
    ExitAlreadyActive(CoinSlot),

    #[error("slot {0} has no exit")]
    NoExit(CoinSlot),

    #[error("exit for slot {slot} is {actual:?}, expected {expected:?}")]
    WrongExitState {
        slot: CoinSlot,
        actual: ExitState,
        expected: ExitState,
    },

    #[error("challenge window for slot {slot} still open for {}", format_duration(*.remaining_secs))]
    ChallengeWindowOpen { slot: CoinSlot, remaining_secs: u64 },

    #[error("challenge window for slot {slot} closed {} ago", format_duration(*.closed_secs))]
    ChallengeWindowClosed { slot: CoinSlot, closed_secs: u64 },

    #[error("{caller} is not entitled to act on slot {slot}")]
    NotEntitled { slot: CoinSlot, caller: AccountId },

    #[error("invalid exit claim: {0}")]
    InvalidClaim(String),

    #[error("{0} is not the operator")]
    NotOperator(AccountId),

    #[error("invalid amount: {0}")]
    InvalidAmount(u64),

    #[error("{account} holds {available}, needs {needed}")]
    InsufficientBalance {
        account: AccountId,
        needed: u64,
        available: u64,
    },

    #[error("balance of {0} would overflow")]
    BalanceOverflow(AccountId),

    #[error("coin {0} already has liquidity")]
    LiquidityAlreadyProvided(CoinSlot),

    #[error("no deposit heights left before block {0}; a block must be submitted first")]
    DepositRangeExhausted(u64),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ExitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transaction(TransactionError::Codec(CodecError::Encoding(_))) => {
                ErrorKind::Encoding
            }
            Self::Transaction(TransactionError::Signing(_)) => ErrorKind::SignatureInvalid,
            Self::Transaction(_) => ErrorKind::Decoding,
            Self::Proof(SmtError::MalformedProof(_)) => ErrorKind::Decoding,
            Self::Proof(_) => ErrorKind::Encoding,
            Self::SignatureFormat(_) | Self::SignatureRecovery(_) | Self::WrongSigner { .. } => {
                ErrorKind::SignatureInvalid
            }
            Self::UnknownBlock(_) | Self::ProofRejected { .. } => {
                ErrorKind::ProofVerificationFailure
            }
            Self::CoinNotFound(_)
            | Self::ExitAlreadyActive(_)
            | Self::NoExit(_)
            | Self::WrongExitState { .. }
            | Self::ChallengeWindowOpen { .. }
            | Self::ChallengeWindowClosed { .. }
            | Self::NotEntitled { .. }
            | Self::InvalidClaim(_)
            | Self::NotOperator(_)
            | Self::InvalidAmount(_)
            | Self::InsufficientBalance { .. }
            | Self::BalanceOverflow(_)
            | Self::LiquidityAlreadyProvided(_)
            | Self::DepositRangeExhausted(_) => ErrorKind::StateConflict,
            Self::Store(_) => ErrorKind::Store,
        }
    }

    pub fn disposition(&self) -> Disposition {
        match self {
            Self::ChallengeWindowOpen { .. } | Self::DepositRangeExhausted(_) => Disposition::Wait,
            Self::Store(StoreError::Backend(_)) => Disposition::Wait,
            Self::Store(_)
            | Self::CoinNotFound(_)
            | Self::ExitAlreadyActive(_)
            | Self::NoExit(_)
            | Self::WrongExitState { .. }
            | Self::ChallengeWindowClosed { .. }
            | Self::NotEntitled { .. }
            | Self::NotOperator(_)
            | Self::BalanceOverflow(_)
            | Self::LiquidityAlreadyProvided(_) => Disposition::Abandon,
            _ => Disposition::CorrectAndRetry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plasma_codec::{DecodingError, EncodingError};

    #[test]
    fn codec_errors_split_by_direction() {
        let enc = ExitError::from(TransactionError::Codec(CodecError::Encoding(
            EncodingError::TooDeep(33),
        )));
        let dec = ExitError::from(TransactionError::Codec(CodecError::Decoding(
            DecodingError::UnexpectedEof(0),
        )));
        assert_eq!(enc.kind(), ErrorKind::Encoding);
        assert_eq!(dec.kind(), ErrorKind::Decoding);
        assert_eq!(dec.disposition(), Disposition::CorrectAndRetry);
    }

    #[test]
    fn window_open_is_a_wait_class_conflict() {
        let err = ExitError::ChallengeWindowOpen {
            slot: CoinSlot::from_u64(1),
            remaining_secs: 125,
        };
        assert_eq!(err.kind(), ErrorKind::StateConflict);
        assert_eq!(err.disposition(), Disposition::Wait);
        assert!(err.to_string().ends_with("2m 5s"));
    }

    #[test]
    fn late_challenge_is_abandoned() {
        let err = ExitError::ChallengeWindowClosed {
            slot: CoinSlot::from_u64(1),
            closed_secs: 60,
        };
        assert_eq!(err.kind(), ErrorKind::StateConflict);
        assert_eq!(err.disposition(), Disposition::Abandon);
        assert!(err.to_string().contains("closed 1m"));
    }

    #[test]
    fn proof_failures() {
        let rejected = ExitError::ProofRejected {
            slot: CoinSlot::from_u64(1),
            block: 1000,
        };
        assert_eq!(rejected.kind(), ErrorKind::ProofVerificationFailure);
        let malformed = ExitError::from(SmtError::MalformedProof("short".into()));
        assert_eq!(malformed.kind(), ErrorKind::Decoding);
    }

    #[test]
    fn store_failures() {
        let backend = ExitError::from(StoreError::Backend("down".into()));
        assert_eq!(backend.kind(), ErrorKind::Store);
        assert_eq!(backend.disposition(), Disposition::Wait);
        let corrupt = ExitError::from(StoreError::Corruption("bad".into()));
        assert_eq!(corrupt.disposition(), Disposition::Abandon);
    }

    #[test]
    fn double_exit_is_abandoned() {
        let err = ExitError::ExitAlreadyActive(CoinSlot::from_u64(1));
        assert_eq!(err.kind(), ErrorKind::StateConflict);
        assert_eq!(err.disposition(), Disposition::Abandon);
    }
}
