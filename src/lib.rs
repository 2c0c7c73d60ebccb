//! # bencode
//!
//! A streaming codec for bencode, the minimal self-delimiting encoding used by
//! BitTorrent metainfo files and many content-addressed systems.
//!
//! # Usage
//!
//! Values are written to any [`std::io::Write`] with an [`Encoder`] and read back from
//! any [`std::io::Read`] with a [`Decoder`], one value per call.
//!
//! ```
//! use bencode::prelude::*;
//!
//! let mut enc = Encoder::new(Vec::new());
//! enc.write(&vec![1, 2]).unwrap();
//! enc.write("abc").unwrap();
//!
//! let out = enc.into_inner();
//! assert_eq!(out.as_slice(), b"li1ei2ee3:abc");
//!
//! let mut dec = Decoder::new(out.as_slice());
//!
//! assert_eq!(dec.read().unwrap(), Some(Value::from(vec![Value::from(1), Value::from(2)])));
//! assert_eq!(dec.read().unwrap(), Some(Value::from("abc")));
//!
//! // the stream is exhausted
//! assert_eq!(dec.read().unwrap(), None);
//! ```
//!
//! # An overview of bencode types
//!
//! ## Integers
//!
//! Signed 64-bit integers ([`Value::Int`]). Any primitive integer that fits converts
//! into a [`Value`].
//!
//! ```
//! use bencode::prelude::*;
//!
//! let small = Value::from(23u8);
//! let negative = Value::from(-7i64);
//! ```
//!
//! ## Bytestrings
//!
//! Arbitrary bytes ([`Value::Byt`]), not necessarily valid UTF-8.
//!
//! ```
//! use bencode::prelude::*;
//!
//! let a_str = Value::from("hello world");
//!
//! let literal = Value::from_static(b"\x00\xff raw bytes");
//! ```
//!
//! A `Vec<u8>` or `[u8]` passed through [`ToValue`](rep::ToValue) is a *list* of small
//! integers, like any other vector. Wrap raw bytes in [`Bytes`] to get a bytestring.
//!
//! ```
//! use bencode::prelude::*;
//!
//! let raw = vec![0x61u8, 0x62];
//!
//! assert_eq!(encode_full(&raw.to_value().unwrap()), b"li97ei98ee".to_vec());
//! assert_eq!(encode_full(&Bytes::from(raw).to_value().unwrap()), b"2:ab".to_vec());
//! ```
//!
//! ## Lists
//!
//! Ordered sequences of values ([`Value::List`]).
//!
//! ```
//! use bencode::prelude::*;
//!
//! let some_numbers = vec![1, 2, 3].to_value().unwrap();
//! ```
//!
//! ## Dictionaries
//!
//! Mappings from bytestring keys to values ([`Value::Dict`]), stored in a [`VecMap`].
//! Keys are always written in ascending order of their raw bytes, whatever order the map
//! was built in.
//!
//! ```
//! use bencode::prelude::*;
//! use std::collections::HashMap;
//!
//! let mut a_map = HashMap::new();
//! a_map.insert("def", 1);
//! a_map.insert("abc", 2);
//!
//! let enc = encode_full(&a_map.to_value().unwrap());
//!
//! assert_eq!(enc, b"d3:abci2e3:defi1ee".to_vec());
//! ```
//!
//! # Specification
//!
//! Every value starts with a prefix that identifies its type.
//!
//! | Type       | Encoding           | Example            |
//! | ---        | ---                | ---                |
//! | Integer    | `i<decimal>e`      | `i-10e`            |
//! | Bytestring | `<length>:<bytes>` | `4:spam`           |
//! | List       | `l<values>e`       | `li1ei2ee`         |
//! | Dictionary | `d<pairs>e`        | `d2:abi77ee`       |
//!
//! Integers are written without leading zeros or a `+` sign. The length of a bytestring
//! counts bytes, not characters. Dictionary keys are bytestrings, each followed by its
//! value, sorted by comparing their bytes as unsigned numbers, with a prefix sorting
//! before any longer key it begins.
//!
//! A bare `e` where a value is expected ends the enclosing list or dictionary.

#![warn(
    missing_docs,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_debug_implementations,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

pub mod encoding;
pub mod errors;
pub mod prelude;
pub mod rep;
pub mod util;
pub mod vecmap;

pub use encoding::{Decoder, Encoder};
pub use errors::*;

use bytes::Bytes;
use std::{
    convert::TryFrom,
    fmt::{self, Display},
};
use vecmap::VecMap;

#[derive(Eq, PartialEq, Clone, Debug)]
/// [`Value`] and its variants.
///
/// # Example
///
/// ```
/// use bencode::prelude::*;
///
/// let i = Value::Int(3);
///
/// let val = match i {
///     Value::Int(i) => i,
///     _ => panic!(),
/// };
///
/// assert_eq!(val, 3);
/// ```
pub enum Value {
    /// Integer.
    Int(i64),
    /// Bytestring.
    ///
    /// # Example
    ///
    /// ```
    /// use bencode::prelude::{Value::Byt, *};
    ///
    /// let k_bytes = Byt(Bytes::from_static(b"hello world"));
    /// ```
    Byt(Bytes),
    /// List.
    List(Vec<Value>),
    /// Dictionary.
    ///
    /// ```
    /// use bencode::prelude::{Value::Dict, *};
    ///
    /// let vmap = VecMap::from(vec![(Bytes::from_static(b"hello world"), Value::from(1))]);
    ///
    /// let dict = Dict(vmap);
    /// ```
    Dict(VecMap<Bytes, Value>),
}

/// The kind of a [`Value`], without its contents.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    /// [`Value::Int`]
    Int,
    /// [`Value::Byt`]
    Byt,
    /// [`Value::List`]
    List,
    /// [`Value::Dict`]
    Dict,
}

impl Kind {
    /// A short name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Int => "integer",
            Kind::Byt => "bytestring",
            Kind::List => "list",
            Kind::Dict => "dictionary",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.name()) }
}

use Value::*;

impl Value {
    /// Converts a bytestring literal to a [`Value`].
    ///
    /// # Example
    ///
    /// ```
    /// use bencode::prelude::*;
    ///
    /// let v = Value::from_static(b"this is an example");
    ///
    /// assert_eq!(v.as_bytes().unwrap(), &b"this is an example"[..]);
    /// ```
    pub fn from_static(bytes: &'static [u8]) -> Value { Byt(Bytes::from_static(bytes)) }

    /// Returns the kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Int(_) => Kind::Int,
            Byt(_) => Kind::Byt,
            List(_) => Kind::List,
            Dict(_) => Kind::Dict,
        }
    }

    /// Returns the integer, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the bytes, if this is a bytestring.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Byt(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the bytes as UTF-8 text, if this is a bytestring holding valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Returns the elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Returns the entries, if this is a dictionary.
    pub fn as_dict(&self) -> Option<&VecMap<Bytes, Value>> {
        match self {
            Dict(m) => Some(m),
            _ => None,
        }
    }

    /// Looks up `key` if this is a dictionary.
    ///
    /// # Example
    ///
    /// ```
    /// use bencode::prelude::*;
    ///
    /// let torrent = decode_full(&b"d4:infod6:lengthi42eee"[..]).unwrap();
    ///
    /// let len = torrent
    ///     .get(b"info")
    ///     .and_then(|info| info.get(b"length"))
    ///     .and_then(Value::as_int);
    ///
    /// assert_eq!(len, Some(42));
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> { self.as_dict().and_then(|m| m.get(key)) }

    /// Consumes the value, returning the integer.
    /// This will return a [`ConversionError`] if the value is not a [`Value::Int`].
    pub fn into_int(self) -> Result<i64, ConversionError> { i64::try_from(self) }

    /// Consumes the value, returning the bytes.
    /// This will return a [`ConversionError`] if the value is not a [`Value::Byt`].
    pub fn into_bytes(self) -> Result<Bytes, ConversionError> { Bytes::try_from(self) }

    /// Consumes the value, converting it into a vector of values.
    /// This will return a [`ConversionError`] if the value is not a [`Value::List`].
    ///
    /// # Example
    ///
    /// ```
    /// use bencode::prelude::*;
    ///
    /// let v = vec![1, 2, 3].to_value().unwrap();
    ///
    /// assert_eq!(v.into_list().unwrap().len(), 3);
    /// ```
    pub fn into_list(self) -> Result<Vec<Value>, ConversionError> { Vec::try_from(self) }

    /// Consumes the value, converting it into a [`VecMap`].
    /// This will return a [`ConversionError`] if the value is not a [`Value::Dict`].
    pub fn into_dict(self) -> Result<VecMap<Bytes, Value>, ConversionError> {
        VecMap::try_from(self)
    }
}

fn fmt_bytes(bytes: &Bytes) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => format!("{:?}", s),
        Err(_) => {
            let mut bytes_string: String = "b\"".to_owned();
            bytes
                .iter()
                .for_each(|c| bytes_string.push_str(&format!("{:02x}", c)));
            bytes_string.push('"');

            bytes_string
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn fmt_map(m: &VecMap<Bytes, Value>, indent: usize) -> String {
            let mut map_string: String = "{".to_owned();
            let entries = m.sorted();
            for (i, (k, v)) in entries.iter().enumerate() {
                if i == 0 {
                    map_string.push_str(&format!("\n{:indent$}", "", indent = indent + 2));
                } else {
                    map_string.push_str(&format!(",\n{:indent$}", "", indent = indent + 2));
                }

                map_string.push_str(&format!(
                    "{key}: {value}",
                    key = fmt_bytes(k),
                    value = fmt_helper(v, indent + 2),
                ));

                // check if we're at last element
                if i == entries.len() - 1 {
                    map_string.push_str(&format!("\n{:indent$}", "", indent = indent));
                }
            }
            map_string.push('}');

            map_string
        }

        fn fmt_helper(v: &Value, indent: usize) -> String {
            match v {
                Int(i) => i.to_string(),
                Byt(bytes) => fmt_bytes(bytes),
                List(a) => {
                    let items: Vec<String> = a.iter().map(|v| fmt_helper(v, indent)).collect();
                    format!("[{}]", items.join(", "))
                }
                Dict(m) => fmt_map(m, indent),
            }
        }

        write!(f, "{}", fmt_helper(self, 0))
    }
}

macro_rules! try_from_ctor {
    ($t:ty, $ctor:ident, $kind:expr) => {
        impl TryFrom<Value> for $t {
            type Error = ConversionError;

            fn try_from(v: Value) -> Result<$t, ConversionError> {
                match v {
                    $ctor(x) => Ok(x),
                    other => Err(ConversionError(format!(
                        "expected {}, found {}",
                        $kind,
                        other.kind()
                    ))),
                }
            }
        }
    };
}

try_from_ctor!(i64, Int, Kind::Int);
try_from_ctor!(Bytes, Byt, Kind::Byt);
try_from_ctor!(Vec<Value>, List, Kind::List);
try_from_ctor!(VecMap<Bytes, Value>, Dict, Kind::Dict);

// i64 -> Value
from_fn!(Value, i64, Int);
// Bytes -> Value
from_fn!(Value, Bytes, Byt);
// Vec<Value> -> Value
from_fn!(Value, Vec<Value>, List);
// VecMap -> Value
from_fn!(Value, VecMap<Bytes, Value>, Dict);

// strings
compose_from!(Value, Bytes, &str);
compose_from!(Value, Bytes, String);

// integers that always fit
from_as!(Value, i8, i64);
from_as!(Value, i16, i64);
from_as!(Value, i32, i64);
from_as!(Value, u8, i64);
from_as!(Value, u16, i64);
from_as!(Value, u32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_tests() {
        assert_eq!(Value::from(5).as_int(), Some(5));
        assert_eq!(Value::from(5).as_bytes(), None);

        assert_eq!(
            Value::from("word").as_bytes().unwrap(),
            &Bytes::from("word")
        );
        assert_eq!(Value::from("word").as_str(), Some("word"));
        assert_eq!(Value::from_static(&[0xff]).as_str(), None);
    }

    #[test]
    fn conversions() {
        let v = Value::from(vec![Value::from(1), Value::from("a")]);
        assert_eq!(v.kind(), Kind::List);
        assert_eq!(v.clone().into_list().unwrap().len(), 2);

        let e = v.into_int().unwrap_err();
        assert_eq!(e.0, "expected integer, found list");

        assert!(Value::from("x").into_dict().is_err());
        assert_eq!(Value::from(7u32).into_int().unwrap(), 7);
    }

    #[test]
    fn display() {
        let m = VecMap::from(vec![
            (Bytes::from("b"), Value::from(vec![Value::from(1), Value::from(-2)])),
            (Bytes::from("a"), Value::from_static(&[0x00, 0xff])),
        ]);
        let shown = format!("{}", Value::from(m));
        assert_eq!(shown, "{\n  \"a\": b\"00ff\",\n  \"b\": [1, -2]\n}");
        assert_eq!(format!("{}", Value::from(VecMap::new())), "{}");
    }

    #[test]
    fn dict_lookup() {
        let m = VecMap::from(vec![(Bytes::from("k"), Value::from(1))]);
        let d = Value::from(m);
        assert_eq!(d.get(b"k"), Some(&Value::from(1)));
        assert_eq!(d.get(b"x"), None);
        assert_eq!(Value::from(1).get(b"k"), None);
    }
}
