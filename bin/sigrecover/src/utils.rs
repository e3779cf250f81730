//! Common helpers for reading command input.

use eyre::WrapErr;
use sigrecover_primitives::{Address, H256};
use std::{io::Read, path::Path};

/// Reads the whole of `path`, or stdin when no path is given.
pub fn read_input(path: Option<&Path>) -> eyre::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input).wrap_err("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn parse_fixed<const N: usize>(value: &str) -> Result<[u8; N], String> {
    let value = value.trim();
    let raw = hex::decode(value.strip_prefix("0x").unwrap_or(value)).map_err(|e| e.to_string())?;
    raw.try_into().map_err(|raw: Vec<u8>| format!("expected {N} bytes, got {}", raw.len()))
}

/// Parses a 20 byte hex address, with or without `0x`. Checksum casing is not enforced.
pub fn parse_address(value: &str) -> Result<Address, String> {
    parse_fixed::<20>(value).map(Address::from)
}

/// Parses a 32 byte hex hash, with or without `0x`.
pub fn parse_hash(value: &str) -> Result<H256, String> {
    parse_fixed::<32>(value).map(H256::from)
}
