//! This module contains all commands of the executable.

pub mod raw_tx;
pub mod tx;
pub mod validators;

use sigrecover_primitives::{to_checksum, Address, Bytes, H256};

/// Everything the transaction commands print, one value per line.
#[derive(Debug)]
pub(crate) struct TransactionReport {
    pub(crate) unsigned: Bytes,
    pub(crate) preimage: H256,
    pub(crate) sender: Address,
    pub(crate) signed: Bytes,
    pub(crate) hash: H256,
}

impl TransactionReport {
    pub(crate) fn print(&self) {
        println!("unsigned  {}", self.unsigned);
        println!("preimage  {:?}", self.preimage);
        println!("from      {}", to_checksum(&self.sender));
        println!("signed    {}", self.signed);
        println!("hash      {:?}", self.hash);
    }
}
