/// The header of an RLP item: whether it is a list and how long its payload is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    /// True if the item is a list.
    pub list: bool,
    /// Length of the payload in bytes, excluding the header itself.
    pub payload_length: usize,
}

/// Prefix of an empty byte string, also the canonical encoding of zero.
pub const EMPTY_STRING_CODE: u8 = 0x80;
/// Prefix of an empty list.
pub const EMPTY_LIST_CODE: u8 = 0xC0;
