//! Signature format adapter.
//!
//! Signing tools emit the compact layout `r || s || v`: 65 bytes with the
//! recovery id at offset 64, often rendered as `0x`-prefixed hex. The root
//! chain verifies the header-first layout `(27 + 4 + v) || r || s`, where the
//! `+ 4` marks a compressed public key, rendered as bare lowercase hex.

use plasma_types::RecoverableSignature;
use thiserror::Error;

/// Length of both the compact and the on-chain layouts.
pub const SIGNATURE_LEN: usize = 65;

/// Header base for a compressed-key recoverable signature on the root chain.
pub const ON_CHAIN_HEADER_BASE: u8 = 27 + 4;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureFormatError {
    #[error("invalid signature length: expected {expected} bytes, got {got}")]
    InvalidSignatureLength { expected: usize, got: usize },

    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("invalid on-chain signature header: {0}")]
    InvalidHeader(u8),

    #[error("invalid signature hex: {0}")]
    InvalidHex(String),
}

fn check_len(bytes: &[u8]) -> Result<(), SignatureFormatError> {
    if bytes.len() != SIGNATURE_LEN {
        return Err(SignatureFormatError::InvalidSignatureLength {
            expected: SIGNATURE_LEN,
            got: bytes.len(),
        });
    }
    Ok(())
}

fn split_rs(bytes: &[u8]) -> ([u8; 32], [u8; 32]) {
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..64]);
    (r, s)
}

/// Pack a signature as `r || s || v`.
pub fn to_compact(sig: &RecoverableSignature) -> [u8; SIGNATURE_LEN] {
    let mut out = [0u8; SIGNATURE_LEN];
    out[..32].copy_from_slice(&sig.r);
    out[32..64].copy_from_slice(&sig.s);
    out[64] = sig.recovery_id;
    out
}

/// Unpack `r || s || v`.
pub fn from_compact(bytes: &[u8]) -> Result<RecoverableSignature, SignatureFormatError> {
    check_len(bytes)?;
    let v = bytes[64];
    if v > 3 {
        return Err(SignatureFormatError::InvalidRecoveryId(v));
    }
    let (r, s) = split_rs(bytes);
    Ok(RecoverableSignature::new(r, s, v))
}

/// Pack a signature in the root chain's header-first layout.
pub fn to_on_chain(sig: &RecoverableSignature) -> [u8; SIGNATURE_LEN] {
    let mut out = [0u8; SIGNATURE_LEN];
    out[0] = ON_CHAIN_HEADER_BASE + sig.recovery_id;
    out[1..33].copy_from_slice(&sig.r);
    out[33..].copy_from_slice(&sig.s);
    out
}

/// Convert compact `r || s || v` bytes to the on-chain hex string.
pub fn adapt(compact: &[u8]) -> Result<String, SignatureFormatError> {
    let sig = from_compact(compact)?;
    Ok(hex::encode(to_on_chain(&sig)))
}

/// Unpack the on-chain layout.
///
/// Headers `27..=30` (uncompressed key) and `31..=34` (compressed key) are
/// both accepted; the recovery id is the low two bits of `header - 27`.
pub fn from_on_chain(bytes: &[u8]) -> Result<RecoverableSignature, SignatureFormatError> {
    check_len(bytes)?;
    let header = bytes[0];
    if !(27..=34).contains(&header) {
        return Err(SignatureFormatError::InvalidHeader(header));
    }
    let (r, s) = split_rs(&bytes[1..]);
    Ok(RecoverableSignature::new(r, s, (header - 27) & 3))
}

pub fn from_on_chain_hex(s: &str) -> Result<RecoverableSignature, SignatureFormatError> {
    let bytes = hex::decode(s).map_err(|e| SignatureFormatError::InvalidHex(e.to_string()))?;
    from_on_chain(&bytes)
}

/// Decode compact-signature hex as emitted by signing tools, with or
/// without a leading `0x`.
pub fn parse_compact_hex(s: &str) -> Result<[u8; SIGNATURE_LEN], SignatureFormatError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let bytes = hex::decode(digits).map_err(|e| SignatureFormatError::InvalidHex(e.to_string()))?;
    check_len(&bytes)?;
    let mut out = [0u8; SIGNATURE_LEN];
    out.copy_from_slice(&bytes);
    Ok(out)
}
