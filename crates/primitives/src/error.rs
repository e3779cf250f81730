use crate::{ibft::ExtraDataError, transaction::SignatureError};
use sigrecover_rlp::DecodeError;

/// Errors surfaced by the encoding and recovery operations of this crate.
///
/// Every error aborts the single operation in progress; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A transaction field is out of range or has the wrong width.
    #[error("invalid transaction field `{field}`: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// The signature is malformed or does not recover to a public key.
    #[error("invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),
    /// Block extra-data does not have the IBFT shape.
    #[error("malformed extra data: {0}")]
    MalformedExtraData(#[from] ExtraDataError),
    /// A raw transaction could not be decoded.
    #[error("rlp decoding failed: {0}")]
    Rlp(#[from] DecodeError),
}

impl Error {
    pub(crate) const fn invalid_field(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidField { field, reason }
    }
}
