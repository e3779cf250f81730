use crate::{
    decode::{Decodable, DecodeError},
    encode::{encode_list, list_length, Encodable},
    types::Header,
};
use bytes::{Buf, BufMut, Bytes};

/// Deepest list nesting [`RlpItem`] will decode.
pub const MAX_DEPTH: usize = 1024;

/// A decoded RLP value whose shape is only known at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    /// A byte string.
    Bytes(Bytes),
    /// A list of nested items.
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// Returns the payload if this is a byte string.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::List(_) => None,
        }
    }

    /// Returns the elements if this is a list.
    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            Self::Bytes(_) => None,
            Self::List(items) => Some(items),
        }
    }

    fn decode_at_depth(buf: &mut &[u8], depth: usize) -> Result<Self, DecodeError> {
        let h = Header::decode(buf)?;
        if !h.list {
            let item = Self::Bytes(Bytes::copy_from_slice(&buf[..h.payload_length]));
            buf.advance(h.payload_length);
            return Ok(item)
        }

        if depth >= MAX_DEPTH {
            return Err(DecodeError::MaxDepthExceeded)
        }

        let payload_view = &mut &buf[..h.payload_length];
        let mut items = Vec::new();
        while !payload_view.is_empty() {
            items.push(Self::decode_at_depth(payload_view, depth + 1)?);
        }
        buf.advance(h.payload_length);

        Ok(Self::List(items))
    }
}

impl Decodable for RlpItem {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        Self::decode_at_depth(buf, 0)
    }
}

impl Encodable for RlpItem {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Bytes(bytes) => bytes.encode(out),
            Self::List(items) => encode_list::<RlpItem, RlpItem>(items, out),
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Bytes(bytes) => bytes.length(),
            Self::List(items) => list_length::<RlpItem, RlpItem>(items),
        }
    }
}

impl From<Bytes> for RlpItem {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        Self::List(items)
    }
}
