/// Starts an integer.
pub(crate) const INT_START: u8 = b'i';
/// Starts a list.
pub(crate) const LIST_START: u8 = b'l';
/// Starts a dictionary.
pub(crate) const DICT_START: u8 = b'd';
/// Ends an integer, list, or dictionary.
pub(crate) const END: u8 = b'e';
/// Separates a bytestring's length from its contents.
pub(crate) const LEN_SEP: u8 = b':';
/// Sign of a negative integer.
pub(crate) const MINUS: u8 = b'-';

/// Longest header the decoder will accumulate: the digits of a `u64` plus the separator.
pub(crate) const MAX_HEADER_LEN: usize = 21;

/// Nesting limit applied by [`Decoder::new`](super::Decoder::new).
pub const DEFAULT_MAX_DEPTH: usize = 512;
