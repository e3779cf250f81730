#![warn(missing_docs)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

//! Recursive length prefix (RLP) encoding.
//!
//! Covers what legacy transaction serialization needs: byte strings, unsigned integers in
//! minimal big-endian form and lists of those. [`RlpItem`] decodes arbitrary nested input into
//! a tagged tree for callers that only know the shape of the data at runtime, such as block
//! extra-data.

mod decode;
mod encode;
mod item;
mod types;

pub use bytes::BufMut;
pub use decode::{decode_exact, Decodable, DecodeError};
pub use encode::{encode_list, length_of_length, list_length, Encodable};
pub use item::{RlpItem, MAX_DEPTH};
pub use types::{Header, EMPTY_LIST_CODE, EMPTY_STRING_CODE};
