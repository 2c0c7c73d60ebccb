//! # Bencode encoder and decoder
//!
//! Streaming [`Encoder`] and [`Decoder`] types, plus functions for working with
//! in-memory buffers.
//!
//! # Example
//!
//! ```
//! use bencode::prelude::*;
//! use std::collections::BTreeMap;
//!
//! // some data to store
//! let mut info = BTreeMap::new();
//! info.insert("name", Value::from("ubuntu.iso"));
//! info.insert("length", Value::from(1024));
//!
//! // and we've encoded it
//! let enc_full = encode_full(&info.to_value().unwrap());
//!
//! // let's encode it a different way too
//!
//! // create a buffer
//! let mut out = Vec::new();
//!
//! // and we've encoded it a different way
//! encode(&info, &mut out).unwrap();
//!
//! // but they are equivalent
//! assert_eq!(out, enc_full);
//!
//! // Note: decoding returns a `Result`
//! let dec = decode_full(&enc_full).unwrap();
//!
//! // success!
//! assert_eq!(dec.get(b"length"), Some(&Value::from(1024)));
//! ```

use crate::{
    errors::*,
    rep::ToValue,
    util::*,
    vecmap::VecMap,
    Value,
};
use bytes::{Buf, Bytes, IntoBuf};
use std::io::{Read, Write};

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
mod constants;
use constants::*;
pub use constants::DEFAULT_MAX_DEPTH;

/// Encodes a native value, writing the output to `out`.
///
/// # Arguments
///
/// * `t: T` - The value to be encoded.
/// * `out: W` - Where the encoder output will be written.
///
/// # Example
///
/// ```
/// use bencode::prelude::*;
///
/// // output buffer
/// let mut out = Vec::new();
///
/// // encode value
/// encode(&vec![1, 2], &mut out).unwrap();
///
/// assert_eq!(out.as_slice(), b"li1ei2ee");
/// ```
pub fn encode<T: ToValue, W: Write>(t: T, out: W) -> Result<(), EncodingError> {
    Encoder::new(out).write(&t)
}

/// Reads a single value from a stream, returning `Ok(None)` if the stream is exhausted.
///
/// # Arguments
///
/// * `data` - A stream containing bencode.
///
/// # Example
///
/// ```
/// use bencode::prelude::*;
///
/// let dec = decode(&b"i42e"[..]).unwrap();
///
/// assert_eq!(dec, Some(Value::from(42)));
/// ```
pub fn decode<R: Read>(data: R) -> Result<Option<Value>, DecodingError> { Decoder::new(data).read() }

/// Encodes a [`Value`] into a vector of bytes.
///
/// # Arguments
///
/// * `v` - A reference to the [`Value`] to be encoded.
///
/// # Example
///
/// ```
/// use bencode::prelude::*;
///
/// // encoded value
/// let enc: Vec<u8> = encode_full(&Value::from(0));
///
/// assert_eq!(enc, b"i0e");
/// ```
pub fn encode_full(v: &Value) -> Vec<u8> {
    let mut out: Vec<u8> = Vec::new();
    match out.put_value(v) {
        Ok(()) => out,
        Err(never) => match never {},
    }
}

/// Decodes a buffer holding exactly one value.
///
/// # Arguments
///
/// * `bs` - A buffer containing the bytestring to be decoded.
///
/// # Errors
///
/// Fails with [`DecodingError::InvalidFormat`] if the buffer is empty, holds a malformed
/// value, or has bytes left over after the value.
///
/// # Example
///
/// ```
/// use bencode::prelude::*;
///
/// assert_eq!(decode_full(&b"4:spam"[..]).unwrap(), Value::from("spam"));
///
/// assert!(decode_full(&b"4:spami1e"[..]).is_err());
/// assert!(decode_full(&b""[..]).is_err());
/// ```
pub fn decode_full<B: IntoBuf>(bs: B) -> Result<Value, DecodingError> {
    let buf = bs.into_buf();
    let len = buf.remaining() as u64;
    let mut dec = Decoder::new(buf.reader());
    match dec.read()? {
        Some(v) if dec.position() == len => Ok(v),
        Some(_) => Err(DecodingError::new(&format!(
            "{} trailing bytes after the value",
            len - dec.position()
        ))),
        None => Err(DecodingError::new("expected a value, found none")),
    }
}

/// Decodes every top-level value in a buffer.
///
/// A collection terminator outside any list or dictionary is a format error.
///
/// # Arguments
///
/// * `bs` - A buffer containing zero or more encoded values back to back.
///
/// # Example
///
/// ```
/// use bencode::prelude::*;
///
/// let all = decode_all(&b"i1e1:ale"[..]).unwrap();
///
/// assert_eq!(all, vec![Value::from(1), Value::from("a"), Value::from(Vec::new())]);
/// ```
pub fn decode_all<B: IntoBuf>(bs: B) -> Result<Vec<Value>, DecodingError> {
    Decoder::new(bs.into_buf().reader()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_composite() {
        let m = VecMap::from(vec![
            (Bytes::from("list"), Value::from(vec![Value::from(1), Value::from("x")])),
            (Bytes::from(""), Value::from(VecMap::new())),
            (Bytes::from("n"), Value::from(-3)),
        ]);
        let v = Value::from(vec![Value::from(m), Value::from_static(&[0, 255])]);

        let enc = encode_full(&v);
        assert_eq!(decode_full(&enc).unwrap(), v);
    }

    #[test]
    fn decode_full_rejects_leftovers() {
        let e = decode_full(&b"i1ei2e"[..]).unwrap_err();
        assert_eq!(e.to_string(), "invalid format: 3 trailing bytes after the value");

        // a stray terminator is not a value
        assert!(decode_full(&b"e"[..]).is_err());
    }

    #[test]
    fn decode_all_stops_at_error() {
        assert!(decode_all(&b"i1ei2"[..]).is_err());
        assert_eq!(decode_all(&b""[..]).unwrap(), Vec::<Value>::new());
    }

    #[test]
    fn decode_all_rejects_stray_terminator() {
        let e = decode_all(&b"i1eei2e4:spam"[..]).unwrap_err();
        assert_eq!(
            e.to_string(),
            "invalid format: unexpected collection terminator at byte 3"
        );
        assert!(decode_all(&b"e"[..]).is_err());
    }

    #[test]
    fn encode_into_writer() {
        let mut out = Vec::new();
        encode(Value::from("hi"), &mut out).unwrap();
        encode(7, &mut out).unwrap();
        assert_eq!(out, b"2:hii7e");

        assert!(encode(None::<i64>, &mut out).is_err());
        assert_eq!(out, b"2:hii7e");
    }
}
