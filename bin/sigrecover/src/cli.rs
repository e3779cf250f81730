//! CLI definition and entrypoint to executable
use crate::commands::{raw_tx, tx, validators};
use clap::{ArgAction, Args, Parser, Subcommand};
use sigrecover_tracing::{
    tracing::{metadata::LevelFilter, Level},
    LayerInfo, LogFormat, SigrecoverTracer, Tracer,
};

/// Parse CLI options, set up logging and run the chosen command.
pub fn run() -> eyre::Result<()> {
    let opt = Cli::parse();

    SigrecoverTracer::new().with_stderr(opt.logs.layer_info(&opt.verbosity)).init()?;

    match opt.command {
        Commands::Tx(command) => command.execute(),
        Commands::RawTx(command) => command.execute(),
        Commands::Validators(command) => command.execute(),
    }
}

/// Commands to be executed
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Recover the sender of a transaction object returned by `eth_getTransactionByHash`.
    #[command(name = "tx")]
    Tx(tx::Command),
    /// Decode a raw signed legacy transaction and recover its sender.
    #[command(name = "raw-tx")]
    RawTx(raw_tx::Command),
    /// Recover the validators that sealed an IBFT block.
    #[command(name = "validators")]
    Validators(validators::Command),
}

#[derive(Debug, Parser)]
#[command(author, version, about = "sigrecover", long_about = None)]
struct Cli {
    /// The command to run
    #[clap(subcommand)]
    command: Commands,

    #[clap(flatten)]
    logs: Logs,

    #[clap(flatten)]
    verbosity: Verbosity,
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Logging")]
struct Logs {
    /// The format to use for log records written to stderr.
    #[arg(long = "log.format", value_name = "FORMAT", global = true, default_value_t = LogFormat::Terminal)]
    format: LogFormat,

    /// Additional filter directives, e.g. `primitives::ibft=trace`.
    #[arg(long = "log.filter", value_name = "FILTER", global = true, default_value = "")]
    filter: String,

    /// Disable ANSI colors in log output.
    #[arg(long = "log.no-color", global = true)]
    no_color: bool,
}

impl Logs {
    /// Builds the stderr layer configuration from the log options.
    fn layer_info(&self, verbosity: &Verbosity) -> LayerInfo {
        LayerInfo::new(
            self.format,
            verbosity.directive(),
            self.filter.clone(),
            (!self.no_color).then(|| "always".to_string()),
        )
    }
}

#[derive(Debug, Args)]
#[command(next_help_heading = "Display")]
struct Verbosity {
    /// Set the minimum log level.
    ///
    /// -v      Errors
    /// -vv     Warnings
    /// -vvv    Info
    /// -vvvv   Debug
    /// -vvvvv  Traces (warning: very verbose!)
    #[clap(short, long, action = ArgAction::Count, global = true, default_value_t = 3, verbatim_doc_comment, help_heading = "Display")]
    verbosity: u8,

    /// Silence all log output.
    #[clap(long, alias = "silent", short = 'q', global = true, help_heading = "Display")]
    quiet: bool,
}

impl Verbosity {
    /// Get the default directive for the given verbosity, `off` when silenced.
    fn directive(&self) -> String {
        if self.quiet {
            return LevelFilter::OFF.to_string()
        }

        let level = match self.verbosity.saturating_sub(1) {
            0 => Level::ERROR,
            1 => Level::WARN,
            2 => Level::INFO,
            3 => Level::DEBUG,
            _ => Level::TRACE,
        };
        LevelFilter::from_level(level).to_string()
    }
}
