//! `sigrecover tx` command.
use super::TransactionReport;
use crate::utils::{parse_address, read_input};
use clap::Parser;
use eyre::WrapErr;
use sigrecover_primitives::{
    keccak256, recover, rpc::RpcTransaction, to_checksum, Address, TransactionSigned,
};
use std::path::PathBuf;
use tracing::{info, warn};

/// `sigrecover tx` command
#[derive(Debug, Parser)]
pub struct Command {
    /// JSON transaction object as returned by `eth_getTransactionByHash`.
    ///
    /// Read from stdin when omitted.
    #[arg(long, short, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Exit with an error unless the recovered sender is this address.
    #[arg(long, value_name = "ADDRESS", value_parser = parse_address)]
    expect_from: Option<Address>,
}

impl Command {
    /// Execute `tx` command
    pub fn execute(self) -> eyre::Result<()> {
        let input = read_input(self.file.as_deref())?;
        let rpc: RpcTransaction =
            serde_json::from_str(&input).wrap_err("failed to parse transaction object")?;

        let transaction = rpc.transaction()?;
        let signature = rpc.signature()?;
        let unsigned = transaction.serialize(None)?;
        let preimage = keccak256(&unsigned);
        let sender = recover(preimage, &signature).wrap_err("failed to recover sender")?;
        info!(target: "sigrecover::cli", sender = %to_checksum(&sender), "Recovered sender");

        if let Some(reported) = rpc.from.filter(|reported| *reported != sender) {
            warn!(
                target: "sigrecover::cli",
                reported = %to_checksum(&reported),
                "Node reported a different sender"
            );
        }

        let signed = TransactionSigned::try_from(rpc)?;
        TransactionReport {
            unsigned,
            preimage,
            sender,
            signed: signed.envelope(),
            hash: signed.hash(),
        }
        .print();

        if let Some(expected) = self.expect_from {
            if expected != sender {
                eyre::bail!(
                    "recovered sender {} does not match expected {}",
                    to_checksum(&sender),
                    to_checksum(&expected)
                )
            }
        }

        Ok(())
    }
}
