use super::{error::SignatureError, util::secp256k1};
use crate::{Address, ChainId, Error, H256, U256};
use tracing::trace;

/// The order of the secp256k1 curve.
pub const SECP256K1N: U256 =
    U256([0xbfd25e8cd0364141, 0xbaaedce6af48a03b, 0xfffffffffffffffe, 0xffffffffffffffff]);

/// The order of the secp256k1 curve, divided by two. Signatures that should be checked according
/// to EIP-2 should have an S value less than or equal to this.
pub const SECP256K1N_HALF: U256 =
    U256([0xdfe92f46681b20a0, 0x5d576e7357a4501d, 0xffffffffffffffff, 0x7fffffffffffffff]);

/// An ECDSA signature over secp256k1 as it appears on a legacy transaction.
///
/// `v` is kept exactly as it was received. For transactions it is `27 + recovery_id`, or
/// `35 + chain_id * 2 + recovery_id` once EIP-155 replay protection is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    /// The R field of the signature; the point on the curve.
    pub r: U256,
    /// The S field of the signature; the point on the curve.
    pub s: U256,
    /// Recovery id, possibly carrying the chain id.
    pub v: u64,
}

impl Signature {
    /// Builds a signature from big-endian `r` and `s` byte strings of at most 32 bytes each.
    pub fn try_from_slices(r: &[u8], s: &[u8], v: u64) -> Result<Self, Error> {
        if r.len() > 32 {
            return Err(Error::invalid_field("r", "wider than 32 bytes"))
        }
        if s.len() > 32 {
            return Err(Error::invalid_field("s", "wider than 32 bytes"))
        }
        Ok(Self { r: U256::from_big_endian(r), s: U256::from_big_endian(s), v })
    }

    /// Builds a signature from a recovery id, encoding `v` for `chain_id` (0 for unprotected).
    pub fn from_recovery_id(
        r: U256,
        s: U256,
        recovery_id: u8,
        chain_id: ChainId,
    ) -> Result<Self, Error> {
        if recovery_id > 1 {
            return Err(SignatureError::InvalidV(recovery_id as u64).into())
        }
        let v = Self::encode_v(recovery_id, chain_id)
            .ok_or(Error::invalid_field("chain_id", "too large to encode in v"))?;
        Ok(Self { r, s, v })
    }

    /// Returns the wire `v` for a recovery id on the given chain, `None` on overflow.
    ///
    /// `recovery_id + 27` when `chain_id` is zero, `recovery_id + chain_id * 2 + 35` otherwise.
    pub fn encode_v(recovery_id: u8, chain_id: ChainId) -> Option<u64> {
        if chain_id == 0 {
            Some(recovery_id as u64 + 27)
        } else {
            chain_id.checked_mul(2)?.checked_add(35 + recovery_id as u64)
        }
    }

    /// Re-encodes `v` for `chain_id`, keeping the same recovery id.
    pub fn with_chain_id(self, chain_id: ChainId) -> Result<Self, Error> {
        let recovery_id = self.recovery_id()?;
        Self::from_recovery_id(self.r, self.s, recovery_id, chain_id)
    }

    /// Normalizes `v` to a recovery id of 0 or 1.
    ///
    /// `27` and `28` are unprotected legacy values; anything from `35` up is EIP-155 encoded.
    /// Other values are rejected.
    pub fn recovery_id(&self) -> Result<u8, SignatureError> {
        match self.v {
            27 | 28 => Ok((self.v - 27) as u8),
            v if v >= 35 => Ok(((v - 35) % 2) as u8),
            v => Err(SignatureError::InvalidV(v)),
        }
    }

    /// Returns the chain id encoded in `v`, `None` for unprotected signatures.
    pub fn chain_id(&self) -> Option<ChainId> {
        (self.v >= 35).then(|| (self.v - 35) / 2)
    }

    /// Returns true if `s` satisfies the EIP-2 low-s rule.
    pub fn is_low_s(&self) -> bool {
        self.s <= SECP256K1N_HALF
    }

    /// Checks that `r` and `s` are valid scalars: non-zero and below the curve order.
    pub fn validate_scalars(&self) -> Result<(), SignatureError> {
        for (name, value) in [("r", self.r), ("s", self.s)] {
            if value.is_zero() {
                return Err(SignatureError::ZeroValue(name))
            }
            if value >= SECP256K1N {
                return Err(SignatureError::OutOfRange(name))
            }
        }
        Ok(())
    }

    /// Returns `r || s || recovery_id`, the layout secp256k1 recovery expects.
    pub fn to_compact_bytes(&self) -> Result<[u8; 65], SignatureError> {
        let recovery_id = self.recovery_id()?;
        let mut sig = [0u8; 65];
        self.r.to_big_endian(&mut sig[0..32]);
        self.s.to_big_endian(&mut sig[32..64]);
        sig[64] = recovery_id;
        Ok(sig)
    }

    /// Recovers the signer of `digest` without the EIP-2 low-s check.
    ///
    /// Fails before touching the curve if `v`, `r` or `s` are malformed.
    pub fn recover_unchecked(&self, digest: H256) -> Result<Address, SignatureError> {
        self.validate_scalars()?;
        let sig = self.to_compact_bytes()?;
        let signer = secp256k1::recover_signer_unchecked(&sig, digest.as_fixed_bytes())?;
        trace!(target: "primitives::signature", ?digest, ?signer, "recovered signer");
        Ok(signer)
    }

    /// Recovers the signer of `digest`, rejecting high-s signatures as EIP-2 requires.
    pub fn recover(&self, digest: H256) -> Result<Address, SignatureError> {
        if !self.is_low_s() {
            return Err(SignatureError::HighS)
        }
        self.recover_unchecked(digest)
    }
}

/// Recovers the address that produced `signature` over `digest`.
///
/// `v` is normalized with the legacy transaction rule (see [`Signature::recovery_id`]). No
/// EIP-2 low-s check is applied, so pre-Homestead signatures recover as well.
pub fn recover(digest: H256, signature: &Signature) -> Result<Address, Error> {
    Ok(signature.recover_unchecked(digest)?)
}
