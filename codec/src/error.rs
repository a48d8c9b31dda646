use thiserror::Error;

/// A value that cannot be represented in the encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("integer {0} outside the encodable range [-2^64, 2^64 - 1]")]
    IntegerOutOfRange(i128),

    #[error("unsupported value type: {0}")]
    UnsupportedType(&'static str),

    #[error("duplicate map key: {0:?}")]
    DuplicateKey(String),

    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
}

/// Bytes that are not the canonical encoding of any value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodingError {
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEof(usize),

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    #[error("unsupported item at offset {offset}: {what}")]
    Unsupported { offset: usize, what: &'static str },

    #[error("non-minimal length encoding at offset {0}")]
    NonCanonical(usize),

    #[error("map key at offset {0} is not a text string")]
    NonTextKey(usize),

    #[error("duplicate map key: {0:?}")]
    DuplicateKey(String),

    #[error("invalid UTF-8 in text string at offset {0}")]
    InvalidUtf8(usize),

    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("decoding error: {0}")]
    Decoding(#[from] DecodingError),
}
