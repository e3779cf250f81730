use crate::types::Header;
use bytes::{Buf, Bytes};

/// A type that can be read back from RLP.
pub trait Decodable: Sized {
    /// Decodes one item from the front of `buf`, advancing it past the consumed bytes.
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError>;
}

/// Errors raised while decoding RLP.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecodeError {
    /// The value does not fit the target type.
    Overflow,
    /// An integer or length was encoded with leading zero bytes.
    LeadingZero,
    /// The input ended before the announced payload.
    InputTooShort,
    /// A single byte below `0x80` was wrapped in a string header.
    NonCanonicalSingleByte,
    /// A long-form length was used for a payload shorter than 56 bytes.
    NonCanonicalSize,
    /// A fixed-size value had the wrong length.
    UnexpectedLength,
    /// Found a byte string where a list was expected.
    UnexpectedString,
    /// Found a list where a byte string was expected.
    UnexpectedList,
    /// Lists are nested deeper than [`MAX_DEPTH`](crate::MAX_DEPTH).
    MaxDepthExceeded,
    /// Input continues after the decoded item.
    TrailingBytes {
        /// Number of bytes left over.
        remaining: usize,
    },
    /// Any other failure.
    Custom(&'static str),
}

impl std::error::Error for DecodeError {}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::Overflow => write!(f, "overflow"),
            DecodeError::LeadingZero => write!(f, "leading zero"),
            DecodeError::InputTooShort => write!(f, "input too short"),
            DecodeError::NonCanonicalSingleByte => write!(f, "non-canonical single byte"),
            DecodeError::NonCanonicalSize => write!(f, "non-canonical size"),
            DecodeError::UnexpectedLength => write!(f, "unexpected length"),
            DecodeError::UnexpectedString => write!(f, "unexpected string"),
            DecodeError::UnexpectedList => write!(f, "unexpected list"),
            DecodeError::MaxDepthExceeded => write!(f, "maximum list nesting depth exceeded"),
            DecodeError::TrailingBytes { remaining } => {
                write!(f, "{remaining} trailing bytes after item")
            }
            DecodeError::Custom(err) => write!(f, "{err}"),
        }
    }
}

impl Header {
    /// Returns the decoded header.
    ///
    /// Returns an error if the given `buf`'s len is less than the expected payload.
    pub fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        if !buf.has_remaining() {
            return Err(DecodeError::InputTooShort)
        }

        let b = buf[0];
        let h: Self = {
            if b < 0x80 {
                Self { list: false, payload_length: 1 }
            } else if b < 0xB8 {
                buf.advance(1);
                let h = Self { list: false, payload_length: b as usize - 0x80 };

                if h.payload_length == 1 {
                    if !buf.has_remaining() {
                        return Err(DecodeError::InputTooShort)
                    }
                    if buf[0] < 0x80 {
                        return Err(DecodeError::NonCanonicalSingleByte)
                    }
                }

                h
            } else if b < 0xC0 {
                buf.advance(1);
                let payload_length = decode_long_length(buf, b as usize - 0xB7)?;
                Self { list: false, payload_length }
            } else if b < 0xF8 {
                buf.advance(1);
                Self { list: true, payload_length: b as usize - 0xC0 }
            } else {
                buf.advance(1);
                let payload_length = decode_long_length(buf, b as usize - 0xF7)?;
                Self { list: true, payload_length }
            }
        };

        if buf.remaining() < h.payload_length {
            return Err(DecodeError::InputTooShort)
        }

        Ok(h)
    }
}

fn decode_long_length(buf: &mut &[u8], len_of_len: usize) -> Result<usize, DecodeError> {
    if buf.len() < len_of_len {
        return Err(DecodeError::InputTooShort)
    }
    let payload_length = usize::try_from(u64::from_be_bytes(
        static_left_pad(&buf[..len_of_len]).ok_or(DecodeError::LeadingZero)?,
    ))
    .map_err(|_| DecodeError::Custom("Input too big"))?;
    buf.advance(len_of_len);
    if payload_length < 56 {
        return Err(DecodeError::NonCanonicalSize)
    }
    Ok(payload_length)
}

fn static_left_pad<const LEN: usize>(data: &[u8]) -> Option<[u8; LEN]> {
    if data.len() > LEN {
        return None
    }

    let mut v = [0; LEN];

    if data.is_empty() {
        return Some(v)
    }

    if data[0] == 0 {
        return None
    }

    v[LEN - data.len()..].copy_from_slice(data);
    Some(v)
}

macro_rules! decode_integer {
    ($t:ty) => {
        impl Decodable for $t {
            fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
                let h = Header::decode(buf)?;
                if h.list {
                    return Err(DecodeError::UnexpectedList)
                }
                if h.payload_length > (<$t>::BITS as usize / 8) {
                    return Err(DecodeError::Overflow)
                }
                // 0x80 decodes to an empty payload, the canonical zero
                if h.payload_length == 0 {
                    return Ok(<$t>::from(0u8))
                }
                let v = <$t>::from_be_bytes(
                    static_left_pad(&buf[..h.payload_length]).ok_or(DecodeError::LeadingZero)?,
                );
                buf.advance(h.payload_length);
                Ok(v)
            }
        }
    };
}

decode_integer!(u64);
decode_integer!(u128);

#[cfg(feature = "ethereum-types")]
mod ethereum_types_support {
    use super::*;
    use ethereum_types::*;

    macro_rules! fixed_hash_impl {
        ($t:ty) => {
            impl Decodable for $t {
                fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
                    Decodable::decode(buf).map(Self)
                }
            }
        };
    }

    fixed_hash_impl!(H160);
    fixed_hash_impl!(H256);

    macro_rules! fixed_uint_impl {
        ($t:ty, $n_bytes:tt) => {
            impl Decodable for $t {
                fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
                    let h = Header::decode(buf)?;
                    if h.list {
                        return Err(DecodeError::UnexpectedList)
                    }
                    if h.payload_length > $n_bytes {
                        return Err(DecodeError::Overflow)
                    }
                    if h.payload_length == 0 {
                        return Ok(<$t>::from(0u8))
                    }
                    let n = <$t>::from_big_endian(
                        &static_left_pad::<$n_bytes>(&buf[..h.payload_length])
                            .ok_or(DecodeError::LeadingZero)?,
                    );
                    buf.advance(h.payload_length);
                    Ok(n)
                }
            }
        };
    }

    fixed_uint_impl!(U256, 32);
}

impl<const N: usize> Decodable for [u8; N] {
    fn decode(from: &mut &[u8]) -> Result<Self, DecodeError> {
        let h = Header::decode(from)?;
        if h.list {
            return Err(DecodeError::UnexpectedList)
        }
        if h.payload_length != N {
            return Err(DecodeError::UnexpectedLength)
        }

        let mut to = [0_u8; N];
        to.copy_from_slice(&from[..N]);
        from.advance(N);

        Ok(to)
    }
}

impl Decodable for Bytes {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        let h = Header::decode(buf)?;
        if h.list {
            return Err(DecodeError::UnexpectedList)
        }
        let to = Bytes::copy_from_slice(&buf[..h.payload_length]);
        buf.advance(h.payload_length);

        Ok(to)
    }
}

/// Decodes a single `T` that must span all of `buf`.
pub fn decode_exact<T: Decodable>(mut buf: &[u8]) -> Result<T, DecodeError> {
    let value = T::decode(&mut buf)?;
    if !buf.is_empty() {
        return Err(DecodeError::TrailingBytes { remaining: buf.len() })
    }
    Ok(value)
}
