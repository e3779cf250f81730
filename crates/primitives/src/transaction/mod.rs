//! Legacy transaction types.

use crate::{keccak256, Address, Bytes, ChainId, Error, TxHash, H256, U256};
use bytes::{Buf, BytesMut};
use sigrecover_rlp::{
    length_of_length, BufMut, Decodable, DecodeError, Encodable, Header, EMPTY_STRING_CODE,
};

pub use error::SignatureError;
pub use signature::{recover, Signature, SECP256K1N, SECP256K1N_HALF};

mod error;
mod signature;
pub(crate) mod util;

/// Whether or not the transaction is a contract creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionKind {
    /// A transaction that creates a contract.
    #[default]
    Create,
    /// A transaction that calls a contract or transfer.
    Call(Address),
}

impl TransactionKind {
    /// Parses a raw `to` field: empty for creation, exactly 20 bytes for a call.
    pub fn try_from_slice(to: &[u8]) -> Result<Self, Error> {
        match to.len() {
            0 => Ok(Self::Create),
            20 => Ok(Self::Call(Address::from_slice(to))),
            _ => Err(Error::invalid_field("to", "address must be empty or 20 bytes")),
        }
    }

    /// Returns the address of the contract that will be called or will receive the transfer.
    pub fn to(&self) -> Option<&Address> {
        match self {
            Self::Create => None,
            Self::Call(to) => Some(to),
        }
    }
}

impl From<Option<Address>> for TransactionKind {
    fn from(to: Option<Address>) -> Self {
        to.map_or(Self::Create, Self::Call)
    }
}

impl Encodable for TransactionKind {
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::Call(to) => to.encode(out),
            Self::Create => out.put_u8(EMPTY_STRING_CODE),
        }
    }

    fn length(&self) -> usize {
        match self {
            Self::Call(to) => to.length(),
            Self::Create => 1, // EMPTY_STRING_CODE is a single byte
        }
    }
}

impl Decodable for TransactionKind {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        if let Some(&first) = buf.first() {
            if first == EMPTY_STRING_CODE {
                buf.advance(1);
                Ok(Self::Create)
            } else {
                let addr = <Address as Decodable>::decode(buf)?;
                Ok(Self::Call(addr))
            }
        } else {
            Err(DecodeError::InputTooShort)
        }
    }
}

/// Legacy transaction.
///
/// The caller owns it; encoding and hashing only ever borrow it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Transaction {
    /// Added as EIP-155: Simple replay attack protection. Zero means unprotected.
    pub chain_id: ChainId,
    /// A scalar value equal to the number of transactions sent by the sender; formally Tn.
    pub nonce: u64,
    /// A scalar value equal to the number of
    /// Wei to be paid per unit of gas for all computation
    /// costs incurred as a result of the execution of this transaction; formally Tp.
    pub gas_price: u128,
    /// A scalar value equal to the maximum
    /// amount of gas that should be used in executing
    /// this transaction. This is paid up-front, before any
    /// computation is done and may not be increased
    /// later; formally Tg.
    pub gas_limit: u64,
    /// The 160-bit address of the message call’s recipient or, for a contract creation
    /// transaction, ∅, used here to denote the only member of B0 ; formally Tt.
    pub to: TransactionKind,
    /// A scalar value equal to the number of Wei to
    /// be transferred to the message call’s recipient or,
    /// in the case of contract creation, as an endowment
    /// to the newly created account; formally Tv.
    pub value: U256,
    /// Call data for a message call, or the EVM init code of the contract for a creation;
    /// formally Td or Ti.
    pub input: Bytes,
}

impl Transaction {
    /// Returns the chain id if the transaction is replay protected.
    pub fn chain_id(&self) -> Option<ChainId> {
        (self.chain_id != 0).then_some(self.chain_id)
    }

    /// Outputs the length of the transaction's fields, without a RLP header or length of the
    /// eip155 fields.
    fn fields_len(&self) -> usize {
        self.nonce.length() +
            self.gas_price.length() +
            self.gas_limit.length() +
            self.to.length() +
            self.value.length() +
            self.input.length()
    }

    /// Encodes only the transaction's fields into the desired buffer, without a RLP header or
    /// eip155 fields.
    fn encode_fields(&self, out: &mut dyn BufMut) {
        self.nonce.encode(out);
        self.gas_price.encode(out);
        self.gas_limit.encode(out);
        self.to.encode(out);
        self.value.encode(out);
        self.input.encode(out);
    }

    /// Outputs the length of EIP-155 fields. Only outputs a non-zero value for EIP-155 legacy
    /// transactions.
    fn eip155_fields_len(&self) -> usize {
        match self.chain_id() {
            // EIP-155 encodes the tuple (chain_id, 0, 0); zero is a single 0x80 byte
            Some(id) => id.length() + 2,
            None => 0,
        }
    }

    /// Encodes EIP-155 arguments into the desired buffer. Only encodes values for legacy
    /// transactions.
    fn encode_eip155_fields(&self, out: &mut dyn BufMut) {
        // if this is a legacy transaction without a chain ID, it must be pre-EIP-155
        // and does not need to encode the chain ID for the signature hash encoding
        if let Some(id) = self.chain_id() {
            // EIP-155 encodes the tuple (chain_id, 0, 0)
            id.encode(out);
            0x00u8.encode(out);
            0x00u8.encode(out);
        }
    }

    fn unsigned_payload_len(&self) -> usize {
        self.fields_len() + self.eip155_fields_len()
    }

    /// Length of the unsigned encoding, header included.
    pub fn unsigned_length(&self) -> usize {
        let payload_length = self.unsigned_payload_len();
        length_of_length(payload_length) + payload_length
    }

    /// Writes the unsigned encoding, the preimage of the signature hash.
    ///
    /// Six fields for unprotected transactions; nine with `(chain_id, "", "")` appended when a
    /// chain id is set.
    pub fn encode_unsigned(&self, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.unsigned_payload_len() }.encode(out);
        self.encode_fields(out);
        self.encode_eip155_fields(out);
    }

    /// Checks that `signature.v` is the canonical `v` for this transaction's chain id.
    fn check_signature_v(&self, signature: &Signature) -> Result<(), Error> {
        let recovery_id = signature
            .recovery_id()
            .map_err(|_| Error::invalid_field("v", "does not encode a recovery id"))?;
        let expected = Signature::encode_v(recovery_id, self.chain_id)
            .ok_or(Error::invalid_field("chain_id", "too large to encode in v"))?;
        if signature.v != expected {
            return Err(Error::invalid_field("v", "does not match the transaction chain id"))
        }
        Ok(())
    }

    fn signed_payload_len(&self, signature: &Signature) -> usize {
        self.fields_len() + signature.v.length() + signature.r.length() + signature.s.length()
    }

    fn encode_signed_unchecked(&self, signature: &Signature, out: &mut dyn BufMut) {
        Header { list: true, payload_length: self.signed_payload_len(signature) }.encode(out);
        self.encode_fields(out);
        signature.v.encode(out);
        signature.r.encode(out);
        signature.s.encode(out);
    }

    /// Writes the signed encoding `(nonce, gas_price, gas_limit, to, value, input, v, r, s)`.
    ///
    /// Fails with [`Error::InvalidField`] if `v` does not encode this transaction's chain id.
    pub fn encode_signed(&self, signature: &Signature, out: &mut dyn BufMut) -> Result<(), Error> {
        self.check_signature_v(signature)?;
        self.encode_signed_unchecked(signature, out);
        Ok(())
    }

    /// Serializes the transaction, signed if a signature is given.
    ///
    /// The unsigned form is only meant for hashing and is never broadcast.
    pub fn serialize(&self, signature: Option<&Signature>) -> Result<Bytes, Error> {
        let mut out = BytesMut::new();
        match signature {
            Some(signature) => self.encode_signed(signature, &mut out)?,
            None => self.encode_unsigned(&mut out),
        }
        Ok(out.freeze().into())
    }

    /// Returns the hash the sender signs: keccak256 of the unsigned encoding.
    pub fn signature_hash(&self) -> H256 {
        let mut buf = BytesMut::with_capacity(self.unsigned_length());
        self.encode_unsigned(&mut buf);
        keccak256(&buf)
    }

    /// Attaches a signature, validating `v` and computing the transaction hash.
    pub fn into_signed(self, signature: Signature) -> Result<TransactionSigned, Error> {
        TransactionSigned::from_transaction_and_signature(self, signature)
    }
}

/// Signed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionSigned {
    /// Transaction hash
    hash: TxHash,
    /// The transaction signature values
    signature: Signature,
    /// Raw transaction info
    transaction: Transaction,
}

impl TransactionSigned {
    /// Creates a signed transaction, computing its hash.
    ///
    /// Fails if `signature.v` does not encode the transaction's chain id.
    pub fn from_transaction_and_signature(
        transaction: Transaction,
        signature: Signature,
    ) -> Result<Self, Error> {
        transaction.check_signature_v(&signature)?;
        let mut buf = BytesMut::new();
        transaction.encode_signed_unchecked(&signature, &mut buf);
        let hash = keccak256(&buf);
        Ok(Self { hash, signature, transaction })
    }

    /// Decodes a raw signed legacy transaction that must span all of `raw`.
    pub fn decode_raw(raw: &[u8]) -> Result<Self, Error> {
        Ok(sigrecover_rlp::decode_exact(raw)?)
    }

    /// Transaction hash: keccak256 of the signed encoding.
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// Transaction signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The unsigned transaction.
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// The signed encoding, as it would be broadcast.
    pub fn envelope(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.length());
        self.encode(&mut buf);
        buf.freeze().into()
    }

    /// Recover signer from signature and hash.
    ///
    /// Returns an error if the transaction's signature is invalid following [EIP-2](https://eips.ethereum.org/EIPS/eip-2).
    /// Both constructors check that `v` carries the transaction's chain id.
    pub fn recover_signer(&self) -> Result<Address, Error> {
        let signature_hash = self.transaction.signature_hash();
        Ok(self.signature.recover(signature_hash)?)
    }

    /// Recover signer from signature and hash _without ensuring that the signature has a low `s`
    /// value_.
    ///
    /// Needed for transactions signed before Homestead.
    pub fn recover_signer_unchecked(&self) -> Result<Address, Error> {
        let signature_hash = self.transaction.signature_hash();
        recover(signature_hash, &self.signature)
    }
}

impl Encodable for TransactionSigned {
    fn encode(&self, out: &mut dyn BufMut) {
        self.transaction.encode_signed_unchecked(&self.signature, out)
    }

    fn length(&self) -> usize {
        let payload_length = self.transaction.signed_payload_len(&self.signature);
        length_of_length(payload_length) + payload_length
    }
}

impl Decodable for TransactionSigned {
    fn decode(buf: &mut &[u8]) -> Result<Self, DecodeError> {
        let original = *buf;
        let header = Header::decode(buf)?;
        if !header.list {
            return Err(DecodeError::UnexpectedString)
        }
        let payload = &mut &buf[..header.payload_length];

        let mut transaction = Transaction {
            chain_id: 0,
            nonce: Decodable::decode(payload)?,
            gas_price: Decodable::decode(payload)?,
            gas_limit: Decodable::decode(payload)?,
            to: Decodable::decode(payload)?,
            value: Decodable::decode(payload)?,
            input: Decodable::decode(payload)?,
        };
        let signature = Signature {
            v: Decodable::decode(payload)?,
            r: Decodable::decode(payload)?,
            s: Decodable::decode(payload)?,
        };
        if !payload.is_empty() {
            return Err(DecodeError::Custom("unexpected fields after legacy signature"))
        }
        buf.advance(header.payload_length);

        transaction.chain_id = signature.chain_id().unwrap_or_default();
        // v = 35 | 36 claims EIP-155 with chain id 0, which no signer produces
        transaction
            .check_signature_v(&signature)
            .map_err(|_| DecodeError::Custom("invalid legacy signature v"))?;

        let encoded_len = original.len() - buf.len();
        let hash = keccak256(&original[..encoded_len]);
        Ok(Self { hash, signature, transaction })
    }
}
