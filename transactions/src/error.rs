use plasma_codec::CodecError;
use plasma_crypto::CryptoError;
use plasma_types::TxHash;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("transaction record is a {0}, not a map")]
    NotAMap(&'static str),

    #[error("missing field {0:?}")]
    MissingField(&'static str),

    #[error("unexpected field {0:?}")]
    UnexpectedField(String),

    #[error("invalid field {field:?}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("embedded hash {found} does not match computed hash {expected}")]
    HashMismatch { expected: TxHash, found: TxHash },

    #[error("hash and sigHash fields differ")]
    SigHashMismatch,

    #[error("bytes are not the canonical encoding of the transaction")]
    NonCanonical,

    #[error("signing failed: {0}")]
    Signing(#[from] CryptoError),
}
