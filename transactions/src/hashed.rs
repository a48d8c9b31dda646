//! The with-hash form of a transaction, as submitted and signed.

use plasma_codec::Value;
use plasma_crypto::{recover_public_key, sign_recoverable, verify_recoverable, CryptoError};
use plasma_types::{PrivateKey, PublicKey, RecoverableSignature, TxHash};

use crate::fields::{self, Record};
use crate::{ChildChainTx, TransactionError};

/// A transaction together with its hash.
///
/// Only constructed through [`HashedTx::new`] or [`HashedTx::decode`], so
/// the stored hash always matches the record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashedTx {
    tx: ChildChainTx,
    hash: TxHash,
}

impl HashedTx {
    pub fn new(tx: ChildChainTx) -> Result<Self, TransactionError> {
        let hash = tx.hash()?;
        Ok(Self { tx, hash })
    }

    pub fn tx(&self) -> &ChildChainTx {
        &self.tx
    }

    pub fn into_tx(self) -> ChildChainTx {
        self.tx
    }

    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// The digest that owners sign; always equal to [`HashedTx::hash`].
    pub fn sig_hash(&self) -> TxHash {
        self.hash
    }

    /// Canonical encoding with `hash` and `sigHash` as 32-byte byte strings.
    pub fn encode(&self) -> Result<Vec<u8>, TransactionError> {
        let mut entries = self.tx.entries();
        entries.push((fields::HASH.into(), Value::bytes(self.hash.as_bytes().to_vec())));
        entries.push((fields::SIG_HASH.into(), Value::bytes(self.hash.as_bytes().to_vec())));
        Ok(plasma_codec::encode_canonical(&Value::Map(entries))?)
    }

    /// Decode with-hash bytes.
    ///
    /// Rejects unknown or missing fields, differing `hash`/`sigHash`, an
    /// embedded hash that does not match the record, and any byte form
    /// other than the canonical one.
    pub fn decode(bytes: &[u8]) -> Result<Self, TransactionError> {
        let value = plasma_codec::decode(bytes)?;
        let record = Record::new(&value)?;
        let hash = record.hash(fields::HASH)?;
        let sig_hash = record.hash(fields::SIG_HASH)?;
        if hash != sig_hash {
            return Err(TransactionError::SigHashMismatch);
        }
        let tx = ChildChainTx::from_record(&record)?;
        let expected = tx.hash()?;
        if expected != hash {
            return Err(TransactionError::HashMismatch {
                expected,
                found: hash,
            });
        }
        let hashed = Self { tx, hash };
        if hashed.encode()? != bytes {
            return Err(TransactionError::NonCanonical);
        }
        Ok(hashed)
    }

    /// Sign the hash with the owner's key.
    pub fn sign(&self, private_key: &PrivateKey) -> Result<RecoverableSignature, TransactionError> {
        Ok(sign_recoverable(self.hash.as_bytes(), private_key)?)
    }

    pub fn recover_signer(&self, signature: &RecoverableSignature) -> Result<PublicKey, CryptoError> {
        recover_public_key(self.hash.as_bytes(), signature)
    }

    pub fn is_signed_by(&self, signature: &RecoverableSignature, key: &PublicKey) -> bool {
        verify_recoverable(self.hash.as_bytes(), signature, key)
    }
}
