//! Everything needed for everyday encoding and decoding.

pub use crate::{
    encoding::{decode, decode_all, decode_full, encode, encode_full, Decoder, Encoder},
    errors::*,
    rep::ToValue,
    vecmap::VecMap,
    Kind, Value,
};
pub use bytes::{Bytes, IntoBuf};
pub use std::convert::TryFrom;
