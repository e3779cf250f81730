//! `sigrecover validators` command.
use crate::utils::{parse_hash, read_input};
use clap::Parser;
use eyre::WrapErr;
use sigrecover_primitives::{
    ibft::{extract_validators, IbftExtra},
    rpc::RpcBlock,
    to_checksum, Bytes, H256,
};
use std::path::PathBuf;
use tracing::{debug, info};

/// `sigrecover validators` command
#[derive(Debug, Parser)]
pub struct Command {
    /// JSON block object as returned by `eth_getBlockByNumber`.
    ///
    /// Read from stdin when neither this nor `--extra-data` is given.
    #[arg(long, short, value_name = "PATH", conflicts_with = "extra_data")]
    file: Option<PathBuf>,

    /// Hex encoded header extra-data.
    #[arg(long, value_name = "HEX", requires = "hash")]
    extra_data: Option<Bytes>,

    /// The block hash the seals sign.
    #[arg(long, value_name = "HASH", requires = "extra_data", value_parser = parse_hash)]
    hash: Option<H256>,
}

impl Command {
    /// Execute `validators` command
    pub fn execute(self) -> eyre::Result<()> {
        let (extra_data, hash) = match (self.extra_data, self.hash) {
            (Some(extra_data), Some(hash)) => (extra_data, hash),
            _ => {
                let input = read_input(self.file.as_deref())?;
                let block: RpcBlock =
                    serde_json::from_str(&input).wrap_err("failed to parse block object")?;
                debug!(target: "sigrecover::cli", number = ?block.number, hash = ?block.hash, "Loaded block");
                (block.extra_data, block.hash)
            }
        };

        let signers = extract_validators(&extra_data, hash)
            .wrap_err("failed to recover validators from extra data")?;
        info!(target: "sigrecover::cli", seals = signers.len(), "Recovered seal signers");

        // the declared set is informational; extra-data that recovers but does not fit the typed
        // view is still printed
        let declared = match IbftExtra::decode(&extra_data) {
            Ok(extra) => extra.validators,
            Err(err) => {
                debug!(target: "sigrecover::cli", %err, "Extra data is not a full IBFT view");
                Vec::new()
            }
        };

        for signer in signers {
            let marker = if declared.is_empty() || declared.contains(&signer) {
                ""
            } else {
                "  (not in validator set)"
            };
            println!("{}{marker}", to_checksum(&signer));
        }

        Ok(())
    }
}
