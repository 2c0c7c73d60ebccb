//! The encoder and the byte sinks it writes to.

use super::*;
use std::{convert::Infallible, io};
use tracing::trace;

/// A sink for encoded bytes.
pub trait Serializer {
    /// The error produced when the sink fails.
    type Error;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8) -> Result<(), Self::Error>;
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]) -> Result<(), Self::Error>;
}

/// Convenience methods for [`Serializer`].
pub trait SerializerExt: Serializer {
    /// Add an integer, e.g. `i-10e`.
    ///
    /// # Arguments
    ///
    /// * `i: i64`  - The value to be added.
    fn put_int(&mut self, i: i64) -> Result<(), Self::Error>;

    /// Add a bytestring, e.g. `4:spam`.
    ///
    /// # Arguments
    ///
    /// * `b: &[u8]` - The value to be added.
    fn put_bytes(&mut self, b: &[u8]) -> Result<(), Self::Error>;

    /// Add a list, writing the elements in their existing order.
    ///
    /// # Arguments
    ///
    /// * `v: &[Value]` - The value to be added.
    fn put_list(&mut self, v: &[Value]) -> Result<(), Self::Error>;

    /// Add a dictionary, writing the entries in canonical key order.
    ///
    /// # Arguments
    ///
    /// * `m: &VecMap<Bytes, Value>` - The value to be added.
    fn put_dict(&mut self, m: &VecMap<Bytes, Value>) -> Result<(), Self::Error>;

    /// Add any [`Value`].
    fn put_value(&mut self, v: &Value) -> Result<(), Self::Error>;
}

impl Serializer for Vec<u8> {
    type Error = Infallible;

    fn put_u8(&mut self, u: u8) -> Result<(), Infallible> {
        self.push(u);
        Ok(())
    }

    fn put_slice(&mut self, slice: &[u8]) -> Result<(), Infallible> {
        self.extend_from_slice(slice);
        Ok(())
    }
}

impl<S: Serializer> SerializerExt for S {
    #[inline]
    fn put_int(&mut self, i: i64) -> Result<(), S::Error> {
        self.put_u8(INT_START)?;
        let magnitude = if i < 0 {
            self.put_u8(MINUS)?;
            // wraps correctly for `i64::MIN`
            (i as u64).wrapping_neg()
        } else {
            i as u64
        };
        self.put_slice(&u64_to_decimal(magnitude))?;
        self.put_u8(END)
    }

    #[inline]
    fn put_bytes(&mut self, b: &[u8]) -> Result<(), S::Error> {
        self.put_slice(&u64_to_decimal(b.len() as u64))?;
        self.put_u8(LEN_SEP)?;
        self.put_slice(b)
    }

    fn put_list(&mut self, v: &[Value]) -> Result<(), S::Error> {
        trace!(len = v.len(), "writing list");
        self.put_u8(LIST_START)?;
        for x in v {
            self.put_value(x)?;
        }
        self.put_u8(END)
    }

    fn put_dict(&mut self, m: &VecMap<Bytes, Value>) -> Result<(), S::Error> {
        trace!(len = m.len(), "writing dictionary");
        self.put_u8(DICT_START)?;
        for (k, v) in m.sorted() {
            self.put_bytes(k)?;
            self.put_value(v)?;
        }
        self.put_u8(END)
    }

    fn put_value(&mut self, v: &Value) -> Result<(), S::Error> {
        match v {
            Value::Int(i) => self.put_int(*i),
            Value::Byt(b) => self.put_bytes(b),
            Value::List(l) => self.put_list(l),
            Value::Dict(m) => self.put_dict(m),
        }
    }
}

/// Writes [`Value`]s to a byte stream, one per call.
///
/// The encoder writes straight through to the stream; wrap unbuffered sinks in a
/// [`std::io::BufWriter`]. If a write fails partway through a value, the bytes already
/// written stay written.
///
/// # Example
///
/// ```
/// use bencode::prelude::*;
///
/// let mut enc = Encoder::new(Vec::new());
///
/// enc.write(&10).unwrap();
/// enc.write(&0).unwrap();
/// enc.write(&-10i64).unwrap();
///
/// assert_eq!(enc.into_inner(), b"i10ei0ei-10e".to_vec());
/// ```
#[derive(Debug)]
pub struct Encoder<W> {
    writer: W,
}

impl<W: Write> Serializer for Encoder<W> {
    type Error = io::Error;

    fn put_u8(&mut self, u: u8) -> io::Result<()> { self.writer.write_all(&[u]) }

    fn put_slice(&mut self, slice: &[u8]) -> io::Result<()> { self.writer.write_all(slice) }
}

impl<W: Write> Encoder<W> {
    /// Binds an encoder to `writer`.
    pub fn new(writer: W) -> Self { Encoder { writer } }

    /// Writes a native value.
    ///
    /// The value is converted with [`ToValue`] before anything is written, so a value
    /// containing an unsupported kind anywhere inside it leaves the stream untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::UnsupportedType`] if the value, or anything nested in it,
    /// has no bencode representation, and [`EncodingError::Io`] if the stream fails.
    ///
    /// # Example
    ///
    /// ```
    /// use bencode::prelude::*;
    ///
    /// let mut enc = Encoder::new(Vec::new());
    ///
    /// let err = enc.write(&vec![Some(1), None]).unwrap_err();
    ///
    /// assert_eq!(err.to_string(), "null value not supported");
    /// assert!(enc.into_inner().is_empty());
    /// ```
    pub fn write<T: ToValue + ?Sized>(&mut self, value: &T) -> Result<(), EncodingError> {
        let v = value.to_value()?;
        self.write_value(&v)
    }

    /// Writes a [`Value`].
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::Io`] if the stream fails.
    pub fn write_value(&mut self, v: &Value) -> Result<(), EncodingError> {
        self.put_value(v)?;
        Ok(())
    }

    /// Flushes the underlying stream.
    pub fn flush(&mut self) -> Result<(), EncodingError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Returns a reference to the underlying stream.
    pub fn get_ref(&self) -> &W { &self.writer }

    /// Returns a mutable reference to the underlying stream.
    pub fn get_mut(&mut self) -> &mut W { &mut self.writer }

    /// Consumes the encoder, returning the underlying stream.
    pub fn into_inner(self) -> W { self.writer }
}
