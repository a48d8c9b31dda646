use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("public key recovery failed: {0}")]
    RecoveryFailed(String),
}
