//! The streaming decoder.

use super::*;
use smallvec::SmallVec;
use std::{cmp::Ordering, io};
use tracing::{debug, trace};

/// The prefix identifying the next item in the stream.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Header {
    Int,
    /// Bytestring of the given length.
    Byt(usize),
    List,
    Dict,
    /// Collection terminator.
    End,
}

/// What a single step of the grammar produced.
#[derive(Debug)]
enum Item {
    Value(Value),
    End,
    Eof,
}

/// Reads [`Value`]s from a byte stream, one per call to [`Decoder::read`].
///
/// The decoder pulls bytes from the stream one at a time and never reads past the end of
/// the value it is decoding, so the stream can hold other data after it. Wrap unbuffered
/// sources such as files or sockets in a [`std::io::BufReader`].
///
/// # Example
///
/// ```
/// use bencode::prelude::*;
///
/// let mut dec = Decoder::new(&b"i1e4:spam"[..]);
///
/// assert_eq!(dec.read().unwrap(), Some(Value::from(1)));
/// assert_eq!(dec.read().unwrap(), Some(Value::from("spam")));
/// assert_eq!(dec.read().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct Decoder<R> {
    reader: R,
    max_depth: usize,
    strict: bool,
    depth: usize,
    pos: u64,
    failed: bool,
}

impl<R: Read> Decoder<R> {
    /// Binds a decoder to `reader`.
    pub fn new(reader: R) -> Self {
        Decoder {
            reader,
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
            depth: 0,
            pos: 0,
            failed: false,
        }
    }

    /// Sets how deeply lists and dictionaries may nest before decoding fails.
    ///
    /// # Example
    ///
    /// ```
    /// use bencode::prelude::*;
    ///
    /// let mut dec = Decoder::new(&b"llleee"[..]).with_max_depth(2);
    ///
    /// assert!(dec.read().unwrap_err().is_format());
    /// ```
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Only accept dictionaries whose keys are in canonical order.
    ///
    /// # Example
    ///
    /// ```
    /// use bencode::prelude::*;
    ///
    /// let unsorted = &b"d1:bi1e1:ai2ee"[..];
    ///
    /// assert!(Decoder::new(unsorted).read().is_ok());
    /// assert!(Decoder::new(unsorted).strict().read().is_err());
    /// ```
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Number of bytes consumed from the stream so far.
    pub fn position(&self) -> u64 { self.pos }

    /// Returns a reference to the underlying stream.
    pub fn get_ref(&self) -> &R { &self.reader }

    /// Returns a mutable reference to the underlying stream.
    pub fn get_mut(&mut self) -> &mut R { &mut self.reader }

    /// Consumes the decoder, returning the underlying stream.
    pub fn into_inner(self) -> R { self.reader }

    /// Reads the next value.
    ///
    /// Returns `Ok(None)` when the stream is exhausted or when it holds a collection
    /// terminator where a value would start. Once exhausted, every further call returns
    /// `Ok(None)` as well.
    ///
    /// # Errors
    ///
    /// Returns [`DecodingError::InvalidFormat`] if the input breaks the grammar, including
    /// when the stream ends partway through a value, and [`DecodingError::Io`] if the
    /// stream fails. Nothing that was decoded before the failure is returned, and the
    /// stream is left wherever the failure was detected.
    pub fn read(&mut self) -> Result<Option<Value>, DecodingError> {
        match self.read_top()? {
            Item::Value(v) => Ok(Some(v)),
            Item::End | Item::Eof => Ok(None),
        }
    }

    fn read_top(&mut self) -> Result<Item, DecodingError> {
        self.depth = 0;
        self.read_item()
    }

    fn read_item(&mut self) -> Result<Item, DecodingError> {
        let header = match self.read_header()? {
            Some(h) => h,
            None => return Ok(Item::Eof),
        };
        trace!(?header, pos = self.pos, depth = self.depth, "dispatching");
        let value = match header {
            Header::End => return Ok(Item::End),
            Header::Int => Value::Int(self.read_int()?),
            Header::Byt(len) => Value::Byt(self.read_bytes(len)?),
            Header::List => {
                self.descend()?;
                let list = self.read_list()?;
                self.depth -= 1;
                Value::List(list)
            }
            Header::Dict => {
                self.descend()?;
                let dict = self.read_dict()?;
                self.depth -= 1;
                Value::Dict(dict)
            }
        };
        Ok(Item::Value(value))
    }

    fn descend(&mut self) -> Result<(), DecodingError> {
        if self.depth >= self.max_depth {
            return Err(self.invalid(format!(
                "nesting deeper than the limit of {}",
                self.max_depth
            )));
        }
        self.depth += 1;
        Ok(())
    }

    #[inline]
    fn take_byte(&mut self) -> Result<Option<u8>, DecodingError> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.pos += 1;
                    return Ok(Some(buf[0]));
                }
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Accumulates bytes until they form one of the grammar's prefixes.
    fn read_header(&mut self) -> Result<Option<Header>, DecodingError> {
        let mut header: SmallVec<[u8; 24]> = SmallVec::new();
        loop {
            let byte = match self.take_byte()? {
                Some(b) => b,
                None if header.is_empty() => return Ok(None),
                None => {
                    return Err(self.invalid(format!(
                        "stream ended inside the length prefix {:?}",
                        String::from_utf8_lossy(&header)
                    )))
                }
            };
            header.push(byte);
            if let Some(h) = self.match_header(&header)? {
                return Ok(Some(h));
            }
        }
    }

    /// Returns the prefix `header` matches, `None` if it is an incomplete length prefix,
    /// and an error if no prefix can start with it.
    fn match_header(&self, header: &[u8]) -> Result<Option<Header>, DecodingError> {
        match header {
            [INT_START] => return Ok(Some(Header::Int)),
            [LIST_START] => return Ok(Some(Header::List)),
            [DICT_START] => return Ok(Some(Header::Dict)),
            [END] => return Ok(Some(Header::End)),
            _ => {}
        }

        let (last, digits) = match header.split_last() {
            Some(split) => split,
            None => return Ok(None),
        };

        if last.is_ascii_digit() {
            if header.len() < MAX_HEADER_LEN {
                Ok(None)
            } else {
                Err(self.invalid(format!(
                    "length prefix longer than {} digits",
                    MAX_HEADER_LEN - 1
                )))
            }
        } else if *last == LEN_SEP && !digits.is_empty() {
            parse_decimal::<usize>(digits).map(|len| Some(Header::Byt(len))).ok_or_else(|| {
                self.invalid(format!(
                    "length prefix {:?} does not fit in memory",
                    String::from_utf8_lossy(digits)
                ))
            })
        } else {
            Err(self.invalid(format!(
                "expected a value, found {:?} at byte {}",
                String::from_utf8_lossy(header),
                self.pos - 1
            )))
        }
    }

    fn read_int(&mut self) -> Result<i64, DecodingError> {
        let mut lit: SmallVec<[u8; 64]> = SmallVec::new();
        loop {
            match self.take_byte()? {
                Some(END) => break,
                Some(b) if lit.len() < MAX_INT_LEN => lit.push(b),
                Some(_) => {
                    return Err(self.invalid(format!(
                        "integer literal longer than {} bytes",
                        MAX_INT_LEN
                    )))
                }
                None => return Err(self.invalid("unterminated integer".to_string())),
            }
        }

        let (negative, digits) = match lit.split_first() {
            Some((&MINUS, rest)) => (true, rest),
            _ => (false, &lit[..]),
        };

        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return Err(self.invalid(format!(
                "{:?} is not an integer",
                String::from_utf8_lossy(&lit)
            )));
        }

        let parsed = if negative {
            parse_decimal::<i64>(&lit)
        } else {
            parse_decimal::<i64>(digits)
        };

        parsed.ok_or_else(|| {
            self.invalid(format!(
                "integer {} does not fit in 64 bits",
                String::from_utf8_lossy(&lit)
            ))
        })
    }

    fn read_bytes(&mut self, len: usize) -> Result<Bytes, DecodingError> {
        // grow as data arrives rather than trusting the declared length
        let mut buf = Vec::with_capacity(len.min(PREALLOC_LIMIT));
        let got = self.reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
        self.pos += got as u64;
        if got != len {
            return Err(self.invalid(format!(
                "bytestring truncated: expected {} bytes, found {}",
                len, got
            )));
        }
        Ok(Bytes::from(buf))
    }

    fn read_list(&mut self) -> Result<Vec<Value>, DecodingError> {
        let mut out = Vec::new();
        loop {
            match self.read_item()? {
                Item::Value(v) => out.push(v),
                Item::End => return Ok(out),
                Item::Eof => return Err(self.invalid("unterminated list".to_string())),
            }
        }
    }

    fn read_dict(&mut self) -> Result<VecMap<Bytes, Value>, DecodingError> {
        let mut out = VecMap::new();
        // greatest key so far; anything above it cannot be a duplicate
        let mut greatest: Option<Bytes> = None;

        loop {
            let key = match self.read_item()? {
                Item::Value(Value::Byt(k)) => k,
                Item::Value(other) => {
                    return Err(self.invalid(format!(
                        "dictionary key must be a bytestring, found {}",
                        other.kind()
                    )))
                }
                Item::End => return Ok(out),
                Item::Eof => return Err(self.invalid("unterminated dictionary".to_string())),
            };

            let value = match self.read_item()? {
                Item::Value(v) => v,
                Item::End => {
                    return Err(self.invalid(format!(
                        "dictionary key {:?} has no value",
                        String::from_utf8_lossy(&key)
                    )))
                }
                Item::Eof => return Err(self.invalid("unterminated dictionary".to_string())),
            };

            let ascending = greatest
                .as_ref()
                .map_or(true, |g| compare_bytes(g, &key) == Ordering::Less);

            if ascending {
                greatest = Some(key.clone());
            } else if self.strict {
                return Err(self.invalid(format!(
                    "dictionary key {:?} is out of canonical order",
                    String::from_utf8_lossy(&key)
                )));
            } else if out.contains_key(&key) {
                return Err(self.invalid(format!(
                    "duplicate dictionary key {:?}",
                    String::from_utf8_lossy(&key)
                )));
            }

            out.push_unique(key, value);
        }
    }

    #[cold]
    fn invalid(&self, message: String) -> DecodingError {
        debug!(reason = %message, pos = self.pos, "rejecting malformed input");
        DecodingError::InvalidFormat { message }
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<Value, DecodingError>;

    /// Yields values until the stream is exhausted. A collection terminator outside any
    /// collection is an error here, unlike [`Decoder::read`]. After an error nothing more
    /// is yielded, since the stream position is no longer meaningful.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let res = match self.read_top() {
            Ok(Item::Value(v)) => return Some(Ok(v)),
            Ok(Item::Eof) => return None,
            Ok(Item::End) => Err(self.invalid(format!(
                "unexpected collection terminator at byte {}",
                self.pos - 1
            ))),
            Err(e) => Err(e),
        };
        self.failed = true;
        Some(res)
    }
}

/// Longest integer literal accepted, leaving room for leading zeros.
const MAX_INT_LEN: usize = 64;
/// Most bytes reserved up front for a bytestring.
const PREALLOC_LIMIT: usize = 64 * 1024;

/// Parses ASCII decimal, returning `None` on overflow or a malformed literal.
fn parse_decimal<T: std::str::FromStr>(digits: &[u8]) -> Option<T> {
    std::str::from_utf8(digits).ok()?.parse().ok()
}
