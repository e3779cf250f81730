//! `sigrecover raw-tx` command.
use super::TransactionReport;
use clap::Parser;
use eyre::WrapErr;
use sigrecover_primitives::{Bytes, TransactionSigned};
use tracing::debug;

/// `sigrecover raw-tx` command
#[derive(Debug, Parser)]
pub struct Command {
    /// Hex encoded signed legacy transaction.
    #[arg(value_name = "HEX")]
    raw: Bytes,

    /// Reject signatures with a high `s` value (EIP-2).
    #[arg(long)]
    strict: bool,
}

impl Command {
    /// Execute `raw-tx` command
    pub fn execute(self) -> eyre::Result<()> {
        let signed =
            TransactionSigned::decode_raw(&self.raw).wrap_err("failed to decode transaction")?;
        debug!(
            target: "sigrecover::cli",
            hash = ?signed.hash(),
            chain_id = signed.transaction().chain_id,
            "Decoded transaction"
        );

        let sender = if self.strict {
            signed.recover_signer()
        } else {
            signed.recover_signer_unchecked()
        }
        .wrap_err("failed to recover sender")?;

        TransactionReport {
            unsigned: signed.transaction().serialize(None)?,
            preimage: signed.transaction().signature_hash(),
            sender,
            signed: signed.envelope(),
            hash: signed.hash(),
        }
        .print();

        Ok(())
    }
}
