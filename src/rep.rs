//! Conversions from native Rust types into [`Value`].

use crate::{errors::EncodingError, vecmap::VecMap, Value};
use bytes::Bytes;
use std::{
    collections::{BTreeMap, HashMap},
    convert::TryFrom,
    hash::BuildHasher,
    rc::Rc,
    sync::Arc,
};

/// A native value with a bencode representation.
///
/// Only integers, bytestrings, lists, and dictionaries with bytestring keys can be
/// encoded. Types outside those kinds still implement this trait so that they fail at
/// runtime with [`EncodingError::UnsupportedType`] naming the kind, rather than being
/// coerced into something else.
///
/// Sequences become lists even when their elements are bytes; use [`Bytes`], `str`, or
/// `String` for bytestrings.
///
/// # Example
///
/// ```
/// use bencode::prelude::*;
///
/// assert_eq!(vec![1, 2].to_value().unwrap(), Value::from(vec![Value::from(1), Value::from(2)]));
/// assert_eq!("abc".to_value().unwrap(), Value::from("abc"));
///
/// assert!(1.5f64.to_value().is_err());
/// assert!(u64::max_value().to_value().is_err());
/// ```
pub trait ToValue {
    /// Converts the value into a [`Value`].
    fn to_value(&self) -> Result<Value, EncodingError>;
}

impl ToValue for Value {
    fn to_value(&self) -> Result<Value, EncodingError> { Ok(self.clone()) }
}

impl ToValue for Bytes {
    fn to_value(&self) -> Result<Value, EncodingError> { Ok(Value::Byt(self.clone())) }
}

impl ToValue for str {
    fn to_value(&self) -> Result<Value, EncodingError> { Ok(Value::from(self)) }
}

impl ToValue for String {
    fn to_value(&self) -> Result<Value, EncodingError> { self.as_str().to_value() }
}

macro_rules! lossless_int {
    ($($typ:ty),*) => {
        $(
            impl ToValue for $typ {
                fn to_value(&self) -> Result<Value, EncodingError> {
                    Ok(Value::Int(i64::from(*self)))
                }
            }
        )*
    };
}

lossless_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! checked_int {
    ($($typ:ty),*) => {
        $(
            impl ToValue for $typ {
                fn to_value(&self) -> Result<Value, EncodingError> {
                    i64::try_from(*self).map(Value::Int).map_err(|_| {
                        EncodingError::unsupported(&format!(
                            "{} value {} (out of 64-bit signed range)",
                            stringify!($typ),
                            self
                        ))
                    })
                }
            }
        )*
    };
}

checked_int!(u64, usize, isize, i128, u128);

macro_rules! unsupported {
    ($name:expr, $($typ:ty),*) => {
        $(
            impl ToValue for $typ {
                fn to_value(&self) -> Result<Value, EncodingError> {
                    Err(EncodingError::unsupported($name))
                }
            }
        )*
    };
}

unsupported!("floating point value", f32, f64);
unsupported!("boolean value", bool);
unsupported!("unit value", ());
unsupported!("char value", char);

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Result<Value, EncodingError> {
        match self {
            Some(t) => t.to_value(),
            None => Err(EncodingError::unsupported("null value")),
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Result<Value, EncodingError> {
        let items: Result<Vec<Value>, EncodingError> = self.iter().map(T::to_value).collect();
        Ok(Value::List(items?))
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Result<Value, EncodingError> { self.as_slice().to_value() }
}

fn dict<'a, K, V, I>(entries: I) -> Result<Value, EncodingError>
where
    K: AsRef<[u8]> + 'a,
    V: ToValue + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    let mut out = VecMap::new();
    for (k, v) in entries {
        out.insert(Bytes::from(k.as_ref()), v.to_value()?);
    }
    Ok(Value::Dict(out))
}

impl<K: AsRef<[u8]>, V: ToValue> ToValue for VecMap<K, V> {
    fn to_value(&self) -> Result<Value, EncodingError> { dict(self.iter().map(|(k, v)| (k, v))) }
}

impl<K: AsRef<[u8]>, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Result<Value, EncodingError> { dict(self.iter()) }
}

impl<K: AsRef<[u8]>, V: ToValue, S: BuildHasher> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Result<Value, EncodingError> { dict(self.iter()) }
}

impl<'a, T: ToValue + ?Sized> ToValue for &'a T {
    fn to_value(&self) -> Result<Value, EncodingError> { (**self).to_value() }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Result<Value, EncodingError> { (**self).to_value() }
}

impl<T: ToValue + ?Sized> ToValue for Rc<T> {
    fn to_value(&self) -> Result<Value, EncodingError> { (**self).to_value() }
}

impl<T: ToValue + ?Sized> ToValue for Arc<T> {
    fn to_value(&self) -> Result<Value, EncodingError> { (**self).to_value() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unsupported_kind<T: ToValue + ?Sized>(t: &T) -> String {
        match t.to_value() {
            Err(EncodingError::UnsupportedType { kind }) => kind,
            other => panic!("expected an unsupported type error, got {:?}", other),
        }
    }

    #[test]
    fn integers() {
        assert_eq!(255u8.to_value().unwrap(), Value::Int(255));
        assert_eq!((-1i8).to_value().unwrap(), Value::Int(-1));
        assert_eq!((i64::max_value() as u64).to_value().unwrap(), Value::Int(i64::max_value()));
        assert_eq!(
            unsupported_kind(&u64::max_value()),
            "u64 value 18446744073709551615 (out of 64-bit signed range)"
        );
    }

    #[test]
    fn unsupported_kinds() {
        assert_eq!(unsupported_kind(&None::<i32>), "null value");
        assert_eq!(unsupported_kind(&1.0f32), "floating point value");
        assert_eq!(unsupported_kind(&true), "boolean value");
        assert_eq!(unsupported_kind(&()), "unit value");
        // nested values fail the whole conversion
        assert_eq!(unsupported_kind(&vec![Some(1), None]), "null value");
    }

    #[test]
    fn maps() {
        let mut m = HashMap::new();
        m.insert("def".to_string(), vec![-35, 0]);
        m.insert("abc".to_string(), vec![99]);

        let v = m.to_value().unwrap();
        assert_eq!(v.get(b"abc"), Some(&Value::from(vec![Value::from(99)])));

        let mut bt = BTreeMap::new();
        bt.insert(Bytes::from("k"), Some(1));
        bt.insert(Bytes::from("j"), None);
        assert_eq!(unsupported_kind(&bt), "null value");
    }

    #[test]
    fn byte_vectors_are_lists() {
        let raw: Vec<u8> = vec![1, 2];
        assert_eq!(raw.to_value().unwrap(), Value::from(vec![Value::from(1), Value::from(2)]));
        assert_eq!(raw[..].to_value().unwrap().kind(), crate::Kind::List);
        assert_eq!(Bytes::from(raw).to_value().unwrap(), Value::from_static(&[1, 2]));
    }

    #[test]
    fn references() {
        let s: &str = "x";
        assert_eq!(s.to_value().unwrap(), Value::from("x"));
        assert_eq!(Box::new(3).to_value().unwrap(), Value::from(3));
        assert_eq!(Arc::new("y".to_string()).to_value().unwrap(), Value::from("y"));
    }
}
