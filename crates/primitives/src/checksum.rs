use crate::{keccak256, Address};

/// Renders an address as `0x`-prefixed EIP-55 mixed-case checksum hex.
pub fn to_checksum(address: &Address) -> String {
    let lower = hex::encode(address.as_bytes());
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        // high nibble for even positions, low nibble for odd ones
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn eip55_vectors() {
        // <https://eips.ethereum.org/EIPS/eip-55#test-cases>
        for expected in [
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ] {
            let address: Address =
                hex::decode(&expected[2..]).map(|raw| Address::from_slice(&raw)).unwrap();
            assert_eq!(to_checksum(&address), expected);
        }
    }

    #[test]
    fn all_digits_stay_lowercase() {
        let address = Address::from(hex!("0000000000000000000000000000000000000001"));
        assert_eq!(to_checksum(&address), "0x0000000000000000000000000000000000000001");
    }
}
