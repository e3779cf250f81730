use crate::{keccak256, Address};

pub(crate) mod secp256k1 {
    use super::*;
    use crate::{Signature, H256, U256};
    pub(crate) use ::secp256k1::Error;
    use ::secp256k1::{
        ecdsa::{RecoverableSignature, RecoveryId},
        Message, PublicKey, SecretKey, SECP256K1,
    };

    /// Recovers the address of the sender using secp256k1 pubkey recovery.
    ///
    /// `sig` is `r || s || recovery_id` with the recovery id already normalized to 0 or 1.
    pub(crate) fn recover_signer_unchecked(
        sig: &[u8; 65],
        msg: &[u8; 32],
    ) -> Result<Address, Error> {
        let sig =
            RecoverableSignature::from_compact(&sig[0..64], RecoveryId::from_i32(sig[64] as i32)?)?;

        let public = SECP256K1.recover_ecdsa(&Message::from_slice(&msg[..32])?, &sig)?;
        Ok(public_key_to_address(public))
    }

    /// Signs message with the given secret key.
    ///
    /// The returned signature carries `v = 27 + recovery_id`, the unprotected legacy form. Use
    /// [`Signature::with_chain_id`] to bind it to a chain.
    pub fn sign_message(secret: H256, message: H256) -> Result<Signature, Error> {
        let sec = SecretKey::from_slice(secret.as_ref())?;
        let s = SECP256K1.sign_ecdsa_recoverable(&Message::from_slice(&message[..])?, &sec);
        let (rec_id, data) = s.serialize_compact();

        Ok(Signature {
            r: U256::from_big_endian(&data[..32]),
            s: U256::from_big_endian(&data[32..64]),
            v: 27 + rec_id.to_i32() as u64,
        })
    }

    /// Converts a public key into an ethereum address by hashing the encoded public key with
    /// keccak256.
    pub fn public_key_to_address(public: PublicKey) -> Address {
        // strip out the first byte because that should be the SECP256K1_TAG_PUBKEY_UNCOMPRESSED
        // tag returned by libsecp's uncompressed pubkey serialization
        let hash = keccak256(&public.serialize_uncompressed()[1..]);
        Address::from_slice(&hash[12..])
    }
}
