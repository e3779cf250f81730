/// Reasons a [`Signature`](crate::Signature) is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// `r` or `s` is zero.
    #[error("signature component {0} is zero")]
    ZeroValue(&'static str),
    /// `r` or `s` is not below the secp256k1 group order.
    #[error("signature component {0} is not below the curve order")]
    OutOfRange(&'static str),
    /// `s` is in the upper half of the curve order, forbidden since EIP-2.
    #[error("signature s value is in the upper half of the curve order")]
    HighS,
    /// `v` does not encode a recovery id under the rule of its call site.
    #[error("v value {0} does not encode a recovery id")]
    InvalidV(u64),
    /// The curve rejected the signature during public key recovery.
    #[error("public key recovery failed: {0}")]
    Recovery(#[from] secp256k1::Error),
}
