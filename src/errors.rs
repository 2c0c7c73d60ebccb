//! Errors produced while encoding, decoding, and converting values.

use failure::Fail;
use std::io;

#[derive(Debug, Fail)]
/// An error encountered when decoding fails.
pub enum DecodingError {
    /// The input does not follow the bencode grammar.
    #[fail(display = "invalid format: {}", message)]
    InvalidFormat {
        /// What was expected and what was found instead.
        message: String,
    },
    /// The underlying stream failed.
    #[fail(display = "i/o error while decoding: {}", _0)]
    Io(#[cause] io::Error),
}

impl DecodingError {
    /// Creates a new [`DecodingError::InvalidFormat`].
    ///
    /// # Arguments
    ///
    /// * `s: &str` - The message associated with the error.
    pub fn new(s: &str) -> Self {
        DecodingError::InvalidFormat {
            message: s.to_string(),
        }
    }

    /// Indicates whether this is a grammar violation rather than a stream failure.
    pub fn is_format(&self) -> bool {
        match self {
            DecodingError::InvalidFormat { .. } => true,
            DecodingError::Io(_) => false,
        }
    }
}

impl From<io::Error> for DecodingError {
    fn from(e: io::Error) -> Self { DecodingError::Io(e) }
}

#[derive(Debug, Fail)]
/// An error encountered when encoding fails.
pub enum EncodingError {
    /// The value has no bencode representation.
    #[fail(display = "{} not supported", kind)]
    UnsupportedType {
        /// Name of the offending kind.
        kind: String,
    },
    /// The underlying stream failed.
    #[fail(display = "i/o error while encoding: {}", _0)]
    Io(#[cause] io::Error),
}

impl EncodingError {
    /// Creates a new [`EncodingError::UnsupportedType`].
    ///
    /// # Arguments
    ///
    /// * `kind: &str` - Name of the kind that could not be encoded.
    pub fn unsupported(kind: &str) -> Self {
        EncodingError::UnsupportedType {
            kind: kind.to_string(),
        }
    }
}

impl From<io::Error> for EncodingError {
    fn from(e: io::Error) -> Self { EncodingError::Io(e) }
}

#[derive(Debug, Clone, Default, Fail)]
#[fail(display = "Conversion failed with error: {}", _0)]
/// An error encountered when a type-conversion from [`Value`](crate::Value) fails.
pub struct ConversionError(pub String);

impl ConversionError {
    /// Creates a new `ConversionError`
    ///
    /// # Arguments
    ///
    /// * `s: &str` - The message associated with the error.
    pub fn new(s: &str) -> Self { ConversionError(s.to_string()) }
}
