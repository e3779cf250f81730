use crate::types::*;
use auto_impl::auto_impl;
use bytes::{BufMut, Bytes, BytesMut};
use core::borrow::Borrow;

fn zeroless_view(v: &impl AsRef<[u8]>) -> &[u8] {
    let v = v.as_ref();
    &v[v.iter().take_while(|&&b| b == 0).count()..]
}

impl Header {
    /// Encodes the header into the `out` buffer.
    pub fn encode(&self, out: &mut dyn BufMut) {
        if self.payload_length < 56 {
            let code = if self.list { EMPTY_LIST_CODE } else { EMPTY_STRING_CODE };
            out.put_u8(code + self.payload_length as u8);
        } else {
            let len_be = self.payload_length.to_be_bytes();
            let len_be = zeroless_view(&len_be);
            let code = if self.list { 0xF7 } else { 0xB7 };
            out.put_u8(code + len_be.len() as u8);
            out.put_slice(len_be);
        }
    }

    /// Returns the length of the encoded header
    pub fn length(&self) -> usize {
        length_of_length(self.payload_length)
    }
}

/// Returns the number of bytes a header announcing `payload_length` bytes occupies.
pub const fn length_of_length(payload_length: usize) -> usize {
    if payload_length < 56 {
        1
    } else {
        1 + 8 - payload_length.leading_zeros() as usize / 8
    }
}

/// A type that can be written as RLP.
#[auto_impl(&, Box)]
pub trait Encodable {
    /// Appends the RLP encoding of `self` to `out`.
    fn encode(&self, out: &mut dyn BufMut);

    /// Length of the encoding in bytes.
    fn length(&self) -> usize {
        let mut out = BytesMut::new();
        self.encode(&mut out);
        out.len()
    }
}

impl Encodable for [u8] {
    fn length(&self) -> usize {
        let mut len = self.len();
        if self.len() != 1 || self[0] >= EMPTY_STRING_CODE {
            len += length_of_length(self.len());
        }
        len
    }

    fn encode(&self, out: &mut dyn BufMut) {
        if self.len() != 1 || self[0] >= EMPTY_STRING_CODE {
            Header { list: false, payload_length: self.len() }.encode(out);
        }
        out.put_slice(self);
    }
}

impl<const LEN: usize> Encodable for [u8; LEN] {
    fn length(&self) -> usize {
        self[..].length()
    }

    fn encode(&self, out: &mut dyn BufMut) {
        self[..].encode(out)
    }
}

macro_rules! encodable_uint {
    ($t:ty) => {
        #[allow(clippy::cmp_owned)]
        impl Encodable for $t {
            fn length(&self) -> usize {
                if *self < <$t>::from(EMPTY_STRING_CODE) {
                    1
                } else {
                    1 + (<$t>::BITS as usize / 8) - (self.leading_zeros() as usize / 8)
                }
            }

            fn encode(&self, out: &mut dyn BufMut) {
                if *self == 0 {
                    out.put_u8(EMPTY_STRING_CODE);
                } else if *self < <$t>::from(EMPTY_STRING_CODE) {
                    out.put_u8(*self as u8);
                } else {
                    let be = self.to_be_bytes();
                    let be = zeroless_view(&be);
                    out.put_u8(EMPTY_STRING_CODE + be.len() as u8);
                    out.put_slice(be);
                }
            }
        }
    };
}

encodable_uint!(u8);
encodable_uint!(u64);
encodable_uint!(u128);

#[cfg(feature = "ethereum-types")]
mod ethereum_types_support {
    use super::*;
    use ethereum_types::*;

    macro_rules! fixed_hash_impl {
        ($t:ty) => {
            impl Encodable for $t {
                fn length(&self) -> usize {
                    self.0.length()
                }

                fn encode(&self, out: &mut dyn BufMut) {
                    self.0.encode(out)
                }
            }
        };
    }

    fixed_hash_impl!(H160);
    fixed_hash_impl!(H256);

    macro_rules! fixed_uint_impl {
        ($t:ty, $n_bytes:tt) => {
            impl Encodable for $t {
                fn length(&self) -> usize {
                    if *self < <$t>::from(EMPTY_STRING_CODE) {
                        1
                    } else {
                        1 + $n_bytes - (self.leading_zeros() as usize / 8)
                    }
                }

                fn encode(&self, out: &mut dyn BufMut) {
                    let mut temp_arr = [0u8; $n_bytes];
                    self.to_big_endian(&mut temp_arr[..]);
                    // cut the leading zeros after converting to big endian
                    let sliced = &temp_arr[(self.leading_zeros() / 8) as usize..];
                    sliced.encode(out);
                }
            }
        };
    }

    fixed_uint_impl!(U256, 32);
}

macro_rules! slice_impl {
    ($t:ty) => {
        impl $crate::Encodable for $t {
            fn length(&self) -> usize {
                self[..].length()
            }

            fn encode(&self, out: &mut dyn BufMut) {
                self[..].encode(out)
            }
        }
    };
}

slice_impl!(Bytes);

fn rlp_list_header<E, K>(v: &[K]) -> Header
where
    E: Encodable + ?Sized,
    K: Borrow<E>,
{
    let mut h = Header { list: true, payload_length: 0 };
    for x in v {
        h.payload_length += x.borrow().length();
    }
    h
}

/// Length of the list encoding of `v`, header included.
pub fn list_length<E, K>(v: &[K]) -> usize
where
    E: Encodable,
    K: Borrow<E>,
{
    let payload_length = rlp_list_header(v).payload_length;
    length_of_length(payload_length) + payload_length
}

/// Encodes `v` as an RLP list.
pub fn encode_list<E, K>(v: &[K], out: &mut dyn BufMut)
where
    E: Encodable + ?Sized,
    K: Borrow<E>,
{
    let h = rlp_list_header(v);
    h.encode(out);
    for x in v {
        x.borrow().encode(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use hex_literal::hex;

    fn encoded<T: Encodable + ?Sized>(t: &T) -> BytesMut {
        let mut out = BytesMut::new();
        t.encode(&mut out);
        assert_eq!(out.len(), t.length(), "length() disagrees with encode()");
        out
    }

    #[test]
    fn rlp_strings() {
        assert_eq!(encoded(&hex!(""))[..], hex!("80")[..]);
        assert_eq!(encoded(&hex!("7B"))[..], hex!("7b")[..]);
        assert_eq!(encoded(&hex!("80"))[..], hex!("8180")[..]);
        assert_eq!(encoded(&hex!("ABBA"))[..], hex!("82abba")[..]);
        assert_eq!(encoded(&hex!("00"))[..], hex!("00")[..]);
    }

    #[test]
    fn rlp_long_string() {
        let payload = [0xAAu8; 60];
        let out = encoded(&payload[..]);
        assert_eq!(out[..2], hex!("b83c")[..]);
        assert_eq!(&out[2..], &payload[..]);
    }

    #[test]
    fn rlp_uints() {
        let fixtures: Vec<(u64, &[u8])> = vec![
            (0, &hex!("80")[..]),
            (1, &hex!("01")[..]),
            (0x7F, &hex!("7F")[..]),
            (0x80, &hex!("8180")[..]),
            (0x400, &hex!("820400")[..]),
            (0xFFCCB5, &hex!("83ffccb5")[..]),
            (0xFFCCB5DD, &hex!("84ffccb5dd")[..]),
            (0xFFCCB5DDFFEE1483, &hex!("88ffccb5ddffee1483")[..]),
        ];
        for (input, output) in fixtures {
            assert_eq!(encoded(&input)[..], output[..], "{input:#x}");
        }

        assert_eq!(
            encoded(&0x10203E405060708090A0B0C0D0E0F2u128)[..],
            hex!("8f10203e405060708090a0b0c0d0e0f2")[..]
        );
    }

    #[test]
    fn rlp_eth_uints() {
        use ethereum_types::U256;

        assert_eq!(encoded(&U256::zero())[..], hex!("80")[..]);
        assert_eq!(encoded(&U256::from(0x7Fu64))[..], hex!("7f")[..]);
        assert_eq!(encoded(&U256::from(0x1d1a94a200u64))[..], hex!("851d1a94a200")[..]);
        assert_eq!(
            encoded(&U256::from_big_endian(&hex!(
                "0100020003000400050006000700080009000A0B4B000C000D000E01"
            )))[..],
            hex!("9c0100020003000400050006000700080009000a0b4b000c000d000e01")[..]
        );
    }

    #[test]
    fn rlp_list() {
        let mut out = BytesMut::new();
        encode_list::<u64, u64>(&[], &mut out);
        assert_eq!(out[..], hex!("c0")[..]);

        let mut out = BytesMut::new();
        encode_list::<u8, u8>(&[0x00u8], &mut out);
        assert_eq!(out[..], hex!("c180")[..]);

        let mut out = BytesMut::new();
        encode_list::<u64, u64>(&[0xFFCCB5, 0xFFC0B5], &mut out);
        assert_eq!(out[..], hex!("c883ffccb583ffc0b5")[..]);
        assert_eq!(list_length::<u64, u64>(&[0xFFCCB5, 0xFFC0B5]), out.len());
    }

    #[test]
    fn header_length_matches_encoding() {
        for payload_length in [0usize, 1, 55, 56, 255, 256, 65_535, 65_536] {
            let header = Header { list: true, payload_length };
            let mut out = BytesMut::new();
            header.encode(&mut out);
            assert_eq!(out.len(), header.length(), "payload length {payload_length}");
        }
    }
}
