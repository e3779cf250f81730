//! Transaction and block objects as returned by `eth_getTransactionByHash` and
//! `eth_getBlockByNumber`.
//!
//! Quantities arrive as hex strings of arbitrary width. They are kept as [`U256`] here and
//! narrowed, with overflow checks, when converted into the core types.

use crate::{
    ibft::extract_validators, serde_helper::quantity, Address, Bytes, Error, Signature,
    Transaction, TransactionSigned, H256, U256,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A legacy transaction object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    /// Hash reported by the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<H256>,
    /// Sender reported by the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    /// Recipient, `null` for contract creation.
    #[serde(default)]
    pub to: Option<Address>,
    /// Sender nonce.
    #[serde(with = "quantity")]
    pub nonce: U256,
    /// Transferred value in wei.
    #[serde(with = "quantity")]
    pub value: U256,
    /// Gas price in wei.
    #[serde(with = "quantity")]
    pub gas_price: U256,
    /// Gas limit.
    #[serde(with = "quantity", alias = "gasLimit")]
    pub gas: U256,
    /// Call data or init code.
    #[serde(default, alias = "data")]
    pub input: Bytes,
    /// Signature `v` as on the wire.
    #[serde(with = "quantity")]
    pub v: U256,
    /// Signature `r`.
    #[serde(with = "quantity")]
    pub r: U256,
    /// Signature `s`.
    #[serde(with = "quantity")]
    pub s: U256,
    /// Chain id reported by the node, if any.
    #[serde(default, with = "quantity::opt", skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<U256>,
    /// Envelope type, absent or zero for legacy transactions.
    #[serde(rename = "type", default, with = "quantity::opt", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<U256>,
}

fn narrow_u64(value: U256, field: &'static str) -> Result<u64, Error> {
    if value.bits() > 64 {
        return Err(Error::invalid_field(field, "does not fit in 64 bits"))
    }
    Ok(value.as_u64())
}

fn narrow_u128(value: U256, field: &'static str) -> Result<u128, Error> {
    if value.bits() > 128 {
        return Err(Error::invalid_field(field, "does not fit in 128 bits"))
    }
    Ok(value.as_u128())
}

impl RpcTransaction {
    /// Returns the signature carried by the object.
    pub fn signature(&self) -> Result<Signature, Error> {
        Ok(Signature { r: self.r, s: self.s, v: narrow_u64(self.v, "v")? })
    }

    /// Rebuilds the unsigned transaction.
    ///
    /// The chain id is taken from `v`. A `chainId` field that disagrees with an EIP-155 `v` is
    /// rejected; on unprotected transactions the field is ignored.
    pub fn transaction(&self) -> Result<Transaction, Error> {
        if self.transaction_type.map_or(false, |ty| !ty.is_zero()) {
            return Err(Error::invalid_field("type", "only legacy transactions are supported"))
        }

        let signature = self.signature()?;
        let chain_id = match (signature.chain_id(), self.chain_id) {
            (Some(from_v), Some(declared)) if declared != U256::from(from_v) => {
                return Err(Error::invalid_field("chainId", "does not match the chain id in v"))
            }
            (Some(from_v), _) => from_v,
            (None, declared) => {
                if declared.map_or(false, |id| !id.is_zero()) {
                    debug!(target: "primitives::rpc", ?declared, "ignoring chainId of unprotected transaction");
                }
                0
            }
        };

        Ok(Transaction {
            chain_id,
            nonce: narrow_u64(self.nonce, "nonce")?,
            gas_price: narrow_u128(self.gas_price, "gasPrice")?,
            gas_limit: narrow_u64(self.gas, "gas")?,
            to: self.to.into(),
            value: self.value,
            input: self.input.clone(),
        })
    }
}

impl TryFrom<RpcTransaction> for TransactionSigned {
    type Error = Error;

    /// Fails if a field overflows, `v` does not fit the chain id, or the reported hash differs
    /// from the recomputed one.
    fn try_from(tx: RpcTransaction) -> Result<Self, Self::Error> {
        let signed =
            TransactionSigned::from_transaction_and_signature(tx.transaction()?, tx.signature()?)?;
        match tx.hash {
            Some(hash) if hash != signed.hash() => {
                Err(Error::invalid_field("hash", "does not match the recomputed transaction hash"))
            }
            _ => Ok(signed),
        }
    }
}

/// The parts of a block object needed to recover its sealers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcBlock {
    /// Block hash, the message every seal signs.
    pub hash: H256,
    /// Header extra-data.
    pub extra_data: Bytes,
    /// Block number.
    #[serde(default, with = "quantity::opt", skip_serializing_if = "Option::is_none")]
    pub number: Option<U256>,
}

impl RpcBlock {
    /// Recovers the validators that sealed this block, in seal order.
    pub fn validators(&self) -> Result<Vec<Address>, Error> {
        extract_validators(&self.extra_data, self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::to_checksum;
    use assert_matches::assert_matches;
    use hex_literal::hex;

    const APPROVE_TX: &str = r#"{
        "from": "0xda86793f4aa24c0716b657eed899a73b9a12f937",
        "gas": "0xbecf",
        "gasPrice": "0x1d1a94a200",
        "hash": "0x2769fa79d3a55fdb003461ad8b86bc2a85e6f28ecf9f64c3246a30677fbff35d",
        "input": "0x095ea7b30000000000000000000000007a250d5630b4cf539739df2c5dacb4c659f2488dffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
        "nonce": "0x8f",
        "to": "0x066798d9ef0833ccc719076dab77199ecbd178b0",
        "transactionIndex": "0x5d",
        "value": "0x0",
        "type": "0x0",
        "chainId": "0x1",
        "v": "0x25",
        "r": "0x7cca508ee0c29e9e3402ef74bb611b8d8532d4682ac04f21fbf21171244208b",
        "s": "0x2cf161165f71d0de343f31a4666c29a2c804d3f18d8a7a276b8fb7d72477e1a8"
    }"#;

    fn approve_tx() -> RpcTransaction {
        serde_json::from_str(APPROVE_TX).unwrap()
    }

    #[test]
    fn converts_node_transaction() {
        let rpc = approve_tx();
        let signed = TransactionSigned::try_from(rpc.clone()).unwrap();

        assert_eq!(signed.transaction().chain_id, 1);
        assert_eq!(signed.transaction().nonce, 0x8f);
        assert_eq!(signed.transaction().gas_limit, 0xbecf);
        assert_eq!(signed.transaction().gas_price, 0x1d1a94a200);
        assert_eq!(
            signed.hash(),
            H256(hex!("2769fa79d3a55fdb003461ad8b86bc2a85e6f28ecf9f64c3246a30677fbff35d"))
        );

        let sender = signed.recover_signer().unwrap();
        assert_eq!(Some(sender), rpc.from);
        assert_eq!(to_checksum(&sender), "0xDA86793f4aa24C0716b657eeD899a73b9a12F937");
    }

    #[test]
    fn accepts_aliases_and_missing_optionals() {
        let json = r#"{
            "to": null,
            "nonce": "0x0",
            "value": "0x0",
            "gasPrice": "0x1",
            "gasLimit": "0x5208",
            "data": "0x",
            "v": "0x1b",
            "r": "0x1",
            "s": "0x1"
        }"#;
        let rpc: RpcTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(rpc.gas, U256::from(0x5208));
        assert!(rpc.input.is_empty());

        let tx = rpc.transaction().unwrap();
        assert_eq!(tx.chain_id, 0);
        assert_eq!(tx.to.to(), None);
    }

    #[test]
    fn unprotected_v_ignores_declared_chain_id() {
        let mut rpc = approve_tx();
        rpc.v = U256::from(27);
        rpc.chain_id = Some(U256::from(5));
        assert_eq!(rpc.transaction().unwrap().chain_id, 0);
    }

    #[test]
    fn rejects_inconsistent_objects() {
        let mut rpc = approve_tx();
        rpc.chain_id = Some(U256::from(3));
        assert_matches!(
            TransactionSigned::try_from(rpc),
            Err(Error::InvalidField { field: "chainId", .. })
        );

        let mut rpc = approve_tx();
        rpc.nonce = U256::from(u64::MAX) + 1;
        assert_matches!(
            TransactionSigned::try_from(rpc),
            Err(Error::InvalidField { field: "nonce", .. })
        );

        let mut rpc = approve_tx();
        rpc.gas_price = U256::MAX;
        assert_matches!(
            TransactionSigned::try_from(rpc),
            Err(Error::InvalidField { field: "gasPrice", .. })
        );

        let mut rpc = approve_tx();
        rpc.transaction_type = Some(U256::from(2));
        assert_matches!(
            TransactionSigned::try_from(rpc),
            Err(Error::InvalidField { field: "type", .. })
        );

        let mut rpc = approve_tx();
        rpc.hash = Some(H256::zero());
        assert_matches!(
            TransactionSigned::try_from(rpc),
            Err(Error::InvalidField { field: "hash", .. })
        );

        let mut rpc = approve_tx();
        rpc.v = U256::from(29);
        assert_matches!(
            TransactionSigned::try_from(rpc),
            Err(Error::InvalidField { field: "v", .. })
        );
    }

    #[test]
    fn block_round_trip() {
        let json = r#"{"hash":"0x0000000000000000000000000000000000000000000000000000000000000001","extraData":"0xc0","number":"0x10"}"#;
        let block: RpcBlock = serde_json::from_str(json).unwrap();
        assert_eq!(block.number, Some(U256::from(16)));
        assert_eq!(block.extra_data.as_slice(), &[0xc0]);
        assert_eq!(serde_json::to_string(&block).unwrap(), json);
        assert_matches!(block.validators(), Err(Error::MalformedExtraData(_)));
    }
}
