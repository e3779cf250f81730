//! IBFT 2.0 block extra-data.
//!
//! The header `extraData` of an IBFT chain is the RLP list
//! `[vanity, validators, vote, round, seals]`. Every seal is a 65 byte `r || s || v` signature
//! by one validator over the block hash. Order of the seals is significant: it follows the order
//! in which the validators committed the block.

use crate::{Address, Bytes, Error, Signature, H256, U256};
use sigrecover_rlp::{decode_exact, DecodeError, RlpItem};
use tracing::{debug, trace};

/// Number of list elements an IBFT extra-data must at least carry.
pub const MIN_EXTRA_DATA_FIELDS: usize = 5;
/// Position of the committed seals list.
pub const SEALS_INDEX: usize = 4;
/// Length of a single seal, `r || s || v`.
pub const SEAL_LENGTH: usize = 65;

/// Reasons block extra-data is rejected before any signature is recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExtraDataError {
    /// The bytes are not valid RLP, or continue past the top-level item.
    #[error("invalid rlp: {0}")]
    Rlp(#[from] DecodeError),
    /// The top-level item is a byte string.
    #[error("expected a list at the top level")]
    NotAList,
    /// The top-level list is too short to hold the seals.
    #[error("expected at least {MIN_EXTRA_DATA_FIELDS} elements, got {got}")]
    TooFewElements {
        /// Number of elements found.
        got: usize,
    },
    /// Element 4 is a byte string instead of a list of seals.
    #[error("seals field is not a list")]
    SealsNotAList,
    /// A seal is a nested list or has the wrong length.
    #[error("seal {index} is {len} bytes, expected {SEAL_LENGTH}")]
    SealLength {
        /// Position of the seal.
        index: usize,
        /// Its length, 0 for a nested list.
        len: usize,
    },
    /// A seal's last byte is not one of 0, 1, 27 or 28.
    #[error("seal {index} has recovery byte {v}, expected 0, 1, 27 or 28")]
    SealRecoveryId {
        /// Position of the seal.
        index: usize,
        /// The offending byte.
        v: u8,
    },
    /// A declared validator is not a 20 byte address.
    #[error("validator {index} is {len} bytes, expected 20")]
    ValidatorLength {
        /// Position of the validator.
        index: usize,
        /// Its length, 0 for a nested list.
        len: usize,
    },
    /// A field that must be a byte string is a list, or the reverse.
    #[error("field {0} has the wrong shape")]
    FieldShape(&'static str),
}

/// Converts one raw seal into a [`Signature`] in legacy form.
///
/// Seals carry a bare recovery byte, either `0`/`1` or `27`/`28`. The rule here is fixed for
/// seals: `v - 27` when `v >= 27`, `v` otherwise. The result always has `v = 27 + recovery_id`
/// so it recovers the same way an unprotected transaction signature does.
pub fn seal_signature(index: usize, seal: &RlpItem) -> Result<Signature, ExtraDataError> {
    let raw = match seal {
        RlpItem::Bytes(raw) if raw.len() == SEAL_LENGTH => raw,
        RlpItem::Bytes(raw) => return Err(ExtraDataError::SealLength { index, len: raw.len() }),
        RlpItem::List(_) => return Err(ExtraDataError::SealLength { index, len: 0 }),
    };

    let v = raw[64];
    let recovery_id = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        _ => return Err(ExtraDataError::SealRecoveryId { index, v }),
    };

    Ok(Signature {
        r: U256::from_big_endian(&raw[0..32]),
        s: U256::from_big_endian(&raw[32..64]),
        v: 27 + recovery_id as u64,
    })
}

fn top_level(extra: &RlpItem) -> Result<&[RlpItem], ExtraDataError> {
    match extra {
        RlpItem::List(items) if items.len() >= MIN_EXTRA_DATA_FIELDS => Ok(items),
        RlpItem::List(items) => Err(ExtraDataError::TooFewElements { got: items.len() }),
        RlpItem::Bytes(_) => Err(ExtraDataError::NotAList),
    }
}

fn seals(items: &[RlpItem]) -> Result<Vec<Signature>, ExtraDataError> {
    match &items[SEALS_INDEX] {
        RlpItem::List(seals) => {
            seals.iter().enumerate().map(|(index, seal)| seal_signature(index, seal)).collect()
        }
        RlpItem::Bytes(_) => Err(ExtraDataError::SealsNotAList),
    }
}

/// Recovers the validators that sealed a block, in seal order.
///
/// `message_hash` is the single hash every seal signs. The whole structure is validated before
/// the first recovery runs.
pub fn extract_validators(extra_data: &[u8], message_hash: H256) -> Result<Vec<Address>, Error> {
    let extra = decode_exact::<RlpItem>(extra_data).map_err(ExtraDataError::from)?;
    let seals = seals(top_level(&extra)?)?;
    debug!(target: "primitives::ibft", seals = seals.len(), ?message_hash, "recovering seal signers");

    seals
        .iter()
        .enumerate()
        .map(|(index, seal)| {
            let signer = seal.recover_unchecked(message_hash)?;
            trace!(target: "primitives::ibft", index, ?signer, "recovered seal");
            Ok(signer)
        })
        .collect()
}

/// Typed view of IBFT 2.0 extra-data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IbftExtra {
    /// 32 bytes of free-form vanity data.
    pub vanity: Bytes,
    /// The validator set declared by the block.
    pub validators: Vec<Address>,
    /// The validator vote, left undecoded: an empty list or `[address, vote_type]`.
    pub vote: RlpItem,
    /// Consensus round the block was produced in.
    pub round: u32,
    /// Committed seals in order.
    pub seals: Vec<Signature>,
}

impl IbftExtra {
    /// Decodes and validates every field of the extra-data.
    pub fn decode(extra_data: &[u8]) -> Result<Self, ExtraDataError> {
        let extra = decode_exact::<RlpItem>(extra_data)?;
        let items = top_level(&extra)?;

        let vanity = items[0].as_bytes().ok_or(ExtraDataError::FieldShape("vanity"))?.clone();
        let validators = items[1]
            .as_list()
            .ok_or(ExtraDataError::FieldShape("validators"))?
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                RlpItem::Bytes(raw) if raw.len() == 20 => Ok(Address::from_slice(raw)),
                RlpItem::Bytes(raw) => Err(ExtraDataError::ValidatorLength { index, len: raw.len() }),
                RlpItem::List(_) => Err(ExtraDataError::ValidatorLength { index, len: 0 }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let vote = items[2].clone();
        let round = match items[3].as_bytes() {
            Some(raw) if raw.len() <= 4 => {
                let mut padded = [0u8; 4];
                padded[4 - raw.len()..].copy_from_slice(raw);
                u32::from_be_bytes(padded)
            }
            _ => return Err(ExtraDataError::FieldShape("round")),
        };
        let seals = seals(items)?;

        Ok(Self { vanity: vanity.into(), validators, vote, round, seals })
    }

    /// Recovers the signer of every seal against `message_hash`, in order.
    pub fn recover_signers(&self, message_hash: H256) -> Result<Vec<Address>, Error> {
        self.seals.iter().map(|seal| Ok(seal.recover_unchecked(message_hash)?)).collect()
    }
}
