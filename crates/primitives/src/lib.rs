#![warn(missing_debug_implementations, missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

//! Commonly used types in sigrecover.
//!
//! This crate turns already-fetched chain data into signer addresses:
//!
//! - [`Transaction::serialize`] builds the canonical legacy encoding, with or without a
//!   [`Signature`], including the EIP-155 chain binding of the signing preimage.
//! - [`keccak256`] hashes that encoding into the digest that was signed.
//! - [`recover`] runs secp256k1 public key recovery and derives the [`Address`].
//! - [`ibft::extract_validators`] recovers every validator seal in IBFT block extra-data.

mod checksum;
mod error;
mod hex_bytes;
mod transaction;

/// IBFT block extra-data and validator seal recovery.
pub mod ibft;
/// Views of the JSON objects returned by a node.
pub mod rpc;
/// Helpers for working with serde
pub mod serde_helper;

pub use checksum::to_checksum;
pub use error::Error;
pub use hex_bytes::Bytes;
pub use transaction::{
    recover,
    util::secp256k1::{public_key_to_address, sign_message},
    Signature, SignatureError, Transaction, TransactionKind, TransactionSigned, SECP256K1N,
    SECP256K1N_HALF,
};

/// An Ethereum address.
pub type Address = H160;
/// A transaction hash is a keccak hash of an RLP encoded signed transaction.
pub type TxHash = H256;
/// Chain identifier type (introduced in EIP-155).
pub type ChainId = u64;

pub use ethereum_types::{H160, H256, U256, U64};

#[doc(hidden)]
mod __reexport {
    pub use bytes;
    pub use hex;
    pub use secp256k1;
}

// Useful reexports
pub use __reexport::*;

/// Returns the keccak256 hash for the given data.
#[inline]
pub fn keccak256(data: impl AsRef<[u8]>) -> H256 {
    use tiny_keccak::{Hasher, Keccak};

    let mut buf = [0u8; 32];
    let mut hasher = Keccak::v256();
    hasher.update(data.as_ref());
    hasher.finalize(&mut buf);
    buf.into()
}
