use hex_literal::hex;
use sigrecover_primitives::{
    keccak256, recover, to_checksum, Address, Bytes, Signature, Transaction, TransactionKind,
    TransactionSigned, H256, U256,
};

/// An ERC20 `approve(router, MAX)` sent on mainnet.
fn approve() -> Transaction {
    Transaction {
        chain_id: 1,
        nonce: 0x8f,
        gas_price: 0x1d1a94a200,
        gas_limit: 0xbecf,
        to: TransactionKind::Call(Address::from(hex!("066798d9ef0833ccc719076dab77199ecbd178b0"))),
        value: U256::zero(),
        input: Bytes::from(hex!("095ea7b30000000000000000000000007a250d5630b4cf539739df2c5dacb4c659f2488dffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff")),
    }
}

fn approve_signature() -> Signature {
    Signature {
        r: U256::from_big_endian(&hex!(
            "07cca508ee0c29e9e3402ef74bb611b8d8532d4682ac04f21fbf21171244208b"
        )),
        s: U256::from_big_endian(&hex!(
            "2cf161165f71d0de343f31a4666c29a2c804d3f18d8a7a276b8fb7d72477e1a8"
        )),
        v: 0x25,
    }
}

#[test]
fn approve_pipeline() {
    sigrecover_tracing::init_test_tracing();

    let tx = approve();
    let unsigned = tx.serialize(None).unwrap();
    assert_eq!(
        unsigned.as_slice(),
        hex!("f86a818f851d1a94a20082becf94066798d9ef0833ccc719076dab77199ecbd178b080b844095ea7b30000000000000000000000007a250d5630b4cf539739df2c5dacb4c659f2488dffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff018080")
    );

    let preimage = keccak256(&unsigned);
    assert_eq!(
        preimage,
        H256(hex!("8342181a4b3dd526c10ac9d25b85bd896245199e386af170f6d7649b00174b3a"))
    );
    assert_eq!(tx.signature_hash(), preimage);

    let signature = approve_signature();
    let sender = recover(preimage, &signature).unwrap();
    assert_eq!(to_checksum(&sender), "0xDA86793f4aa24C0716b657eeD899a73b9a12F937");

    let signed = tx.serialize(Some(&signature)).unwrap();
    assert_eq!(
        signed.as_slice(),
        hex!("f8aa818f851d1a94a20082becf94066798d9ef0833ccc719076dab77199ecbd178b080b844095ea7b30000000000000000000000007a250d5630b4cf539739df2c5dacb4c659f2488dffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff25a007cca508ee0c29e9e3402ef74bb611b8d8532d4682ac04f21fbf21171244208ba02cf161165f71d0de343f31a4666c29a2c804d3f18d8a7a276b8fb7d72477e1a8")
    );
    assert_eq!(
        keccak256(&signed),
        H256(hex!("2769fa79d3a55fdb003461ad8b86bc2a85e6f28ecf9f64c3246a30677fbff35d"))
    );
}

#[test]
fn approve_raw_decodes_back() {
    let tx = approve();
    let signed = tx.clone().into_signed(approve_signature()).unwrap();
    let decoded = TransactionSigned::decode_raw(&signed.envelope()).unwrap();

    assert_eq!(decoded, signed);
    assert_eq!(decoded.transaction(), &tx);
    assert_eq!(
        decoded.hash(),
        H256(hex!("2769fa79d3a55fdb003461ad8b86bc2a85e6f28ecf9f64c3246a30677fbff35d"))
    );
    assert_eq!(
        decoded.recover_signer().unwrap(),
        Address::from(hex!("da86793f4aa24c0716b657eed899a73b9a12f937"))
    );
}

#[test]
fn empty_fields_encode_as_empty_strings() {
    let tx = Transaction { to: TransactionKind::Create, ..Default::default() };
    assert_eq!(tx.serialize(None).unwrap().as_slice(), hex!("c6808080808080"));

    let tx = Transaction { chain_id: 1, ..Default::default() };
    assert_eq!(tx.serialize(None).unwrap().as_slice(), hex!("c9808080808080018080"));
}

#[test]
fn serialize_is_deterministic() {
    let tx = approve();
    let signature = approve_signature();
    assert_eq!(tx.serialize(None).unwrap(), tx.serialize(None).unwrap());
    assert_eq!(tx.serialize(Some(&signature)).unwrap(), tx.serialize(Some(&signature)).unwrap());
}
