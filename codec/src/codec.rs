//! Encoding and strict decoding.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::{CodecError, DecodingError, EncodingError, Value};

/// Maximum number of nested arrays/maps.
pub const MAX_DEPTH: usize = 32;

const MAJOR_UINT: u8 = 0;
const MAJOR_NEGINT: u8 = 1;
const MAJOR_BYTES: u8 = 2;
const MAJOR_TEXT: u8 = 3;
const MAJOR_ARRAY: u8 = 4;
const MAJOR_MAP: u8 = 5;
const MAJOR_TAG: u8 = 6;
const MAJOR_SIMPLE: u8 = 7;

/// Encode `value`, writing map entries in the order given.
pub fn encode(value: &Value) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    encode_into(value, &mut out, 0)?;
    Ok(out)
}

/// Encode `value` after sorting every map into canonical key order:
/// shorter keys first, equal lengths compared bytewise.
pub fn encode_canonical(value: &Value) -> Result<Vec<u8>, CodecError> {
    encode(&canonicalize(value))
}

/// Encode a lone text string. Text always fits the encoding, so this cannot fail.
pub fn encode_text(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len() + 9);
    write_head(&mut out, MAJOR_TEXT, s.len() as u64);
    out.extend_from_slice(s.as_bytes());
    out
}

fn key_order(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.as_bytes().cmp(b.as_bytes()))
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Map(entries) => {
            let mut sorted: Vec<(String, Value)> = entries
                .iter()
                .map(|(k, v)| (k.clone(), canonicalize(v)))
                .collect();
            sorted.sort_by(|(a, _), (b, _)| key_order(a, b));
            Value::Map(sorted)
        }
        other => other.clone(),
    }
}

fn write_head(out: &mut Vec<u8>, major: u8, arg: u64) {
    let m = major << 5;
    if arg < 24 {
        out.push(m | arg as u8);
    } else if arg <= 0xFF {
        out.push(m | 24);
        out.push(arg as u8);
    } else if arg <= 0xFFFF {
        out.push(m | 25);
        out.extend_from_slice(&(arg as u16).to_be_bytes());
    } else if arg <= 0xFFFF_FFFF {
        out.push(m | 26);
        out.extend_from_slice(&(arg as u32).to_be_bytes());
    } else {
        out.push(m | 27);
        out.extend_from_slice(&arg.to_be_bytes());
    }
}

fn encode_into(value: &Value, out: &mut Vec<u8>, depth: usize) -> Result<(), EncodingError> {
    match value {
        Value::Integer(i) => {
            if *i >= 0 {
                let arg = u64::try_from(*i).map_err(|_| EncodingError::IntegerOutOfRange(*i))?;
                write_head(out, MAJOR_UINT, arg);
            } else {
                let arg =
                    u64::try_from(-1 - *i).map_err(|_| EncodingError::IntegerOutOfRange(*i))?;
                write_head(out, MAJOR_NEGINT, arg);
            }
        }
        Value::Text(s) => {
            write_head(out, MAJOR_TEXT, s.len() as u64);
            out.extend_from_slice(s.as_bytes());
        }
        Value::Bytes(b) => {
            write_head(out, MAJOR_BYTES, b.len() as u64);
            out.extend_from_slice(b);
        }
        Value::Array(items) => {
            if depth >= MAX_DEPTH {
                return Err(EncodingError::TooDeep(MAX_DEPTH));
            }
            write_head(out, MAJOR_ARRAY, items.len() as u64);
            for item in items {
                encode_into(item, out, depth + 1)?;
            }
        }
        Value::Map(entries) => {
            if depth >= MAX_DEPTH {
                return Err(EncodingError::TooDeep(MAX_DEPTH));
            }
            let mut seen = HashSet::with_capacity(entries.len());
            for (k, _) in entries {
                if !seen.insert(k.as_str()) {
                    return Err(EncodingError::DuplicateKey(k.clone()));
                }
            }
            write_head(out, MAJOR_MAP, entries.len() as u64);
            for (k, v) in entries {
                write_head(out, MAJOR_TEXT, k.len() as u64);
                out.extend_from_slice(k.as_bytes());
                encode_into(v, out, depth + 1)?;
            }
        }
    }
    Ok(())
}

/// Decode exactly one value occupying all of `data`.
pub fn decode(data: &[u8]) -> Result<Value, CodecError> {
    let mut decoder = Decoder { data, pos: 0 };
    let value = decoder.value(0)?;
    if decoder.pos != data.len() {
        return Err(DecodingError::TrailingBytes(data.len() - decoder.pos).into());
    }
    Ok(value)
}

struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn byte(&mut self) -> Result<u8, DecodingError> {
        let b = *self
            .data
            .get(self.pos)
            .ok_or(DecodingError::UnexpectedEof(self.pos))?;
        self.pos += 1;
        Ok(b)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodingError> {
        if n > self.remaining() {
            return Err(DecodingError::UnexpectedEof(self.data.len()));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], DecodingError> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take(N)?);
        Ok(arr)
    }

    /// Read an item head, returning `(major, argument, offset)`.
    fn head(&mut self) -> Result<(u8, u64, usize), DecodingError> {
        let start = self.pos;
        let initial = self.byte()?;
        let major = initial >> 5;
        let info = initial & 0x1F;

        match major {
            MAJOR_TAG => {
                return Err(DecodingError::Unsupported {
                    offset: start,
                    what: "tag",
                })
            }
            MAJOR_SIMPLE => {
                return Err(DecodingError::Unsupported {
                    offset: start,
                    what: "float or simple value",
                })
            }
            _ => {}
        }

        let arg = match info {
            0..=23 => info as u64,
            24 => {
                let v = self.byte()? as u64;
                if v < 24 {
                    return Err(DecodingError::NonCanonical(start));
                }
                v
            }
            25 => {
                let v = u16::from_be_bytes(self.take_array()?) as u64;
                if v <= 0xFF {
                    return Err(DecodingError::NonCanonical(start));
                }
                v
            }
            26 => {
                let v = u32::from_be_bytes(self.take_array()?) as u64;
                if v <= 0xFFFF {
                    return Err(DecodingError::NonCanonical(start));
                }
                v
            }
            27 => {
                let v = u64::from_be_bytes(self.take_array()?);
                if v <= 0xFFFF_FFFF {
                    return Err(DecodingError::NonCanonical(start));
                }
                v
            }
            31 => {
                return Err(DecodingError::Unsupported {
                    offset: start,
                    what: "indefinite length",
                })
            }
            _ => {
                return Err(DecodingError::Unsupported {
                    offset: start,
                    what: "reserved additional information",
                })
            }
        };
        Ok((major, arg, start))
    }

    fn length(&self, arg: u64) -> Result<usize, DecodingError> {
        usize::try_from(arg)
            .ok()
            .filter(|&n| n <= self.remaining())
            .ok_or(DecodingError::UnexpectedEof(self.data.len()))
    }

    fn value(&mut self, depth: usize) -> Result<Value, DecodingError> {
        let (major, arg, start) = self.head()?;
        match major {
            MAJOR_UINT => Ok(Value::Integer(arg as i128)),
            MAJOR_NEGINT => Ok(Value::Integer(-1 - arg as i128)),
            MAJOR_BYTES => {
                let n = self.length(arg)?;
                Ok(Value::Bytes(self.take(n)?.to_vec()))
            }
            MAJOR_TEXT => {
                let n = self.length(arg)?;
                let raw = self.take(n)?;
                let s = std::str::from_utf8(raw).map_err(|_| DecodingError::InvalidUtf8(start))?;
                Ok(Value::Text(s.to_string()))
            }
            MAJOR_ARRAY => {
                if depth >= MAX_DEPTH {
                    return Err(DecodingError::TooDeep(MAX_DEPTH));
                }
                // every item takes at least one byte
                let n = self.length(arg)?;
                let mut items = Vec::with_capacity(n);
                for _ in 0..n {
                    items.push(self.value(depth + 1)?);
                }
                Ok(Value::Array(items))
            }
            MAJOR_MAP => {
                if depth >= MAX_DEPTH {
                    return Err(DecodingError::TooDeep(MAX_DEPTH));
                }
                let n = self.length(arg.saturating_mul(2))? / 2;
                let mut entries: Vec<(String, Value)> = Vec::with_capacity(n);
                let mut seen = HashSet::with_capacity(n);
                for _ in 0..n {
                    let key_offset = self.pos;
                    let key = match self.value(depth + 1)? {
                        Value::Text(k) => k,
                        _ => return Err(DecodingError::NonTextKey(key_offset)),
                    };
                    if !seen.insert(key.clone()) {
                        return Err(DecodingError::DuplicateKey(key));
                    }
                    let value = self.value(depth + 1)?;
                    entries.push((key, value));
                }
                Ok(Value::Map(entries))
            }
            _ => Err(DecodingError::Unsupported {
                offset: start,
                what: "major type",
            }),
        }
    }
}
