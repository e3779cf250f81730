use proptest::prelude::*;
use sigrecover_primitives::{
    public_key_to_address, recover, secp256k1::{PublicKey, SecretKey, SECP256K1}, sign_message,
    Address, Bytes, Signature, Transaction, TransactionKind, TransactionSigned, H256, U256,
};

prop_compose! {
    fn arb_transaction()(
        chain_id in prop_oneof![Just(0u64), 1u64..(1 << 62)],
        nonce in any::<u64>(),
        gas_price in any::<u128>(),
        gas_limit in any::<u64>(),
        to in proptest::option::of(any::<[u8; 20]>()),
        value in any::<[u8; 32]>(),
        input in proptest::collection::vec(any::<u8>(), 0..256),
    ) -> Transaction {
        Transaction {
            chain_id,
            nonce,
            gas_price,
            gas_limit,
            to: TransactionKind::from(to.map(Address::from)),
            value: U256::from_big_endian(&value),
            input: Bytes::from(input),
        }
    }
}

prop_compose! {
    fn arb_secret()(secret in any::<[u8; 32]>()
        .prop_filter("valid secp256k1 secret", |s| SecretKey::from_slice(s).is_ok())
    ) -> H256 {
        H256(secret)
    }
}

fn address_of(secret: H256) -> Address {
    let key = SecretKey::from_slice(secret.as_bytes()).unwrap();
    public_key_to_address(PublicKey::from_secret_key(SECP256K1, &key))
}

fn sign(tx: &Transaction, secret: H256) -> Signature {
    sign_message(secret, tx.signature_hash()).unwrap().with_chain_id(tx.chain_id).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn signing_round_trips(tx in arb_transaction(), secret in arb_secret()) {
        let signature = sign(&tx, secret);
        let expected = address_of(secret);

        prop_assert_eq!(recover(tx.signature_hash(), &signature).unwrap(), expected);

        let signed = tx.clone().into_signed(signature).unwrap();
        prop_assert_eq!(signed.recover_signer().unwrap(), expected);

        let decoded = TransactionSigned::decode_raw(&signed.envelope()).unwrap();
        prop_assert_eq!(&decoded, &signed);
        prop_assert_eq!(decoded.recover_signer().unwrap(), expected);
    }

    #[test]
    fn preimage_binds_chain_id(tx in arb_transaction(), secret in arb_secret(), other in 1u64..(1 << 62)) {
        prop_assume!(other != tx.chain_id);
        let replayed = Transaction { chain_id: other, ..tx.clone() };
        prop_assert_ne!(tx.signature_hash(), replayed.signature_hash());

        let signature = sign(&tx, secret);
        let replayed_signature = signature.with_chain_id(other).unwrap();
        let signer = recover(replayed.signature_hash(), &replayed_signature);
        prop_assert_ne!(signer.ok(), Some(address_of(secret)));
    }

    #[test]
    fn serialize_is_deterministic(tx in arb_transaction(), secret in arb_secret()) {
        let signature = sign(&tx, secret);
        prop_assert_eq!(tx.serialize(None).unwrap(), tx.serialize(None).unwrap());
        prop_assert_eq!(
            tx.serialize(Some(&signature)).unwrap(),
            tx.clone().serialize(Some(&signature)).unwrap()
        );
    }
}
