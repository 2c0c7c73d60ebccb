//! Helpers shared by the encoder and decoder.

use smallvec::SmallVec;
use std::cmp::Ordering;

/// Converts a `u64` to its ASCII decimal digits, most significant first, without leading
/// zeros.
///
/// # Example
///
/// ```
/// use bencode::util::u64_to_decimal;
///
/// assert_eq!(&u64_to_decimal(0)[..], b"0");
/// assert_eq!(&u64_to_decimal(1024)[..], b"1024");
/// ```
pub fn u64_to_decimal(mut num: u64) -> SmallVec<[u8; 20]> {
    let mut out: SmallVec<[u8; 20]> = SmallVec::new();
    loop {
        out.push(b'0' + (num % 10) as u8);
        num /= 10;
        if num == 0 {
            break;
        }
    }
    out.reverse();
    out
}

/// Compares two byte strings position by position, treating every byte as an unsigned
/// 8-bit value. A string that is a prefix of another sorts first.
///
/// This is the order dictionary keys are written in.
///
/// # Example
///
/// ```
/// use bencode::util::compare_bytes;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_bytes(b"abc", b"def"), Ordering::Less);
/// assert_eq!(compare_bytes(b"ab", b"abc"), Ordering::Less);
/// assert_eq!(compare_bytes(&[0x80], &[0x7f]), Ordering::Greater);
/// ```
pub fn compare_bytes(a: &[u8], b: &[u8]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.cmp(y) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    a.len().cmp(&b.len())
}

#[macro_export]
/// Helper macro to compose `From` implementations.
macro_rules! compose_from {
    ($to:tt, $mid:tt, $from:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self { Self::from($mid::from(f)) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_as {
    ($to:tt, $from:ty, $as:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $to::from(f as $as) }
        }
    };
}
