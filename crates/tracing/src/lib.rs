//!  The `tracing` module provides functionalities for setting up and configuring logging.
//!
//!  Log records are written to stderr so that command output on stdout stays machine readable.
//!  The module's primary entry point is the `SigrecoverTracer` struct, which can be configured to
//!  use different logging formats and filters.
//!
//!  # Examples
//!
//!  Basic usage:
//!
//!  ```
//!  use sigrecover_tracing::{
//!      LayerInfo, SigrecoverTracer, Tracer,
//!      tracing::level_filters::LevelFilter,
//!      LogFormat,
//!  };
//!
//!  fn main() -> eyre::Result<()> {
//!      let tracer = SigrecoverTracer::new().with_stderr(LayerInfo::new(
//!          LogFormat::Json,
//!          LevelFilter::INFO.to_string(),
//!          "primitives=debug".to_string(),
//!          None,
//!      ));
//!
//!      tracer.init()?;
//!
//!      // Your application logic here
//!
//!      Ok(())
//!  }
//!  ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

// Re-export tracing crates
pub use tracing;
pub use tracing_subscriber;

// Re-export our types
pub use formatter::LogFormat;
pub use test_tracer::TestTracer;

mod formatter;
mod layers;
mod test_tracer;

use crate::layers::Layers;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

///  Tracer for application logging.
///
///  Manages the configuration and initialization of the stderr logging layer.
#[derive(Debug, Clone, Default)]
pub struct SigrecoverTracer {
    stderr: LayerInfo,
}

impl SigrecoverTracer {
    ///  Constructs a new `Tracer` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    ///  Sets a custom configuration for the stderr layer.
    pub fn with_stderr(mut self, config: LayerInfo) -> Self {
        self.stderr = config;
        self
    }
}

///  Configuration for a logging layer.
///
///  This struct holds configuration parameters for a tracing layer, including
///  the format, filtering directives, optional coloring, and directive.
#[derive(Debug, Clone)]
pub struct LayerInfo {
    format: LogFormat,
    default_directive: String,
    filters: String,
    color: Option<String>,
}

impl LayerInfo {
    ///  Constructs a new `LayerInfo`.
    ///
    ///  # Arguments
    ///  * `format` - Specifies the format for log messages. Possible values are:
    ///      - `LogFormat::Json` for JSON formatting.
    ///      - `LogFormat::Terminal` for human-readable, terminal-friendly formatting.
    ///  * `default_directive` - Directive applied when `RUST_LOG` is unset.
    ///  * `filters` - Additional comma separated filtering directives.
    ///  * `color` - Optional color configuration for the log messages.
    pub const fn new(
        format: LogFormat,
        default_directive: String,
        filters: String,
        color: Option<String>,
    ) -> Self {
        Self { format, default_directive, filters, color }
    }
}

impl Default for LayerInfo {
    ///  Provides default values for `LayerInfo`.
    ///
    ///  By default, it uses terminal format, INFO level filter,
    ///  no additional filters, and colors unless `RUST_LOG_STYLE=never`.
    fn default() -> Self {
        Self {
            format: LogFormat::Terminal,
            default_directive: LevelFilter::INFO.to_string(),
            filters: String::new(),
            color: Some("always".to_string()),
        }
    }
}

/// Trait defining a general interface for logging configuration.
///
/// Implementations can set up the subscriber differently, for example for the command line tool
/// or for tests.
pub trait Tracer {
    /// Initialize the logging configuration.
    fn init(self) -> eyre::Result<()>;
}

impl Tracer for SigrecoverTracer {
    ///  Installs the global tracing subscriber with the configured stderr layer.
    fn init(self) -> eyre::Result<()> {
        let mut layers = Layers::new();

        layers.stderr(
            self.stderr.format,
            self.stderr.default_directive.parse()?,
            &self.stderr.filters,
            self.stderr.color,
        )?;

        // fails only if a global subscriber is already set
        let _ = tracing_subscriber::registry().with(layers.into_inner()).try_init();
        Ok(())
    }
}

///  Initializes a tracing subscriber for tests.
///
///  The filter is configurable via `RUST_LOG`.
///
///  # Note
///
///  The subscriber will silently fail if it could not be installed.
pub fn init_test_tracing() {
    let _ = TestTracer::default().init();
}
