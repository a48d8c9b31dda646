//! Canonical encoder: a deterministic CBOR subset for hashing and signing.
//!
//! Only unsigned/negative integers, text strings, byte strings, arrays and
//! text-keyed maps are representable. Every value has exactly one accepted
//! byte form: heads are minimal, lengths are definite, and map entries are
//! written in the order the caller gives them. [`encode_canonical`] sorts
//! map keys first for callers that want order-independent bytes.

pub mod codec;
pub mod error;
pub mod json;
pub mod value;

pub use codec::{decode, encode, encode_canonical, encode_text, MAX_DEPTH};
pub use error::{CodecError, DecodingError, EncodingError};
pub use value::Value;
