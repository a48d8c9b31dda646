//! Cryptographic primitives for the plasma commit chain.
//!
//! - **SHA-256** for transaction hashes and sparse Merkle tree nodes
//! - **secp256k1** recoverable ECDSA for transaction signatures
//! - Conversion between the compact `r || s || v` signature layout and the
//!   header-first layout verified on the root chain

pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;
pub mod signature;

pub use error::CryptoError;
pub use hash::{hash_pair, sha256, sha256_multi};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{recover_public_key, sign_recoverable, verify_recoverable};
pub use signature::{
    adapt, from_compact, from_on_chain, from_on_chain_hex, parse_compact_hex, to_compact,
    to_on_chain, SignatureFormatError,
};
