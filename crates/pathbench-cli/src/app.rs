//! PathbenchCli application.
//!
//! Wires parsed [`CliArgs`] to the loaded [`PathbenchConfig`] and dispatches
//! each command to its handler.

use crate::bench_handlers::{self, resolve_general, resolve_grid, resolve_seed};
use crate::cli::{CliArgs, Command};
use crate::config::PathbenchConfig;
use crate::config_handlers;
use pathbench_core::Result;
use tracing_subscriber::EnvFilter;

// ============================================================================
// PathbenchCli
// ============================================================================

/// The CLI application: a name, a version, and the loaded configuration.
pub struct PathbenchCli {
    name: String,
    config: PathbenchConfig,
    version: String,
}

impl PathbenchCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = PathbenchConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: PathbenchConfig) -> Self {
        Self {
            name: name.into(),
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Get a reference to the loaded configuration.
    pub fn config(&self) -> &PathbenchConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        let format = args.format.unwrap_or(self.config.output.format);
        let seed = args.seed.or(self.config.seed);

        match args.command {
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::General(general)) => {
                let settings = resolve_general(&self.config.general, &general);
                bench_handlers::handle_general(&settings, resolve_seed(seed), format)
            }
            Some(Command::Grid(grid)) => {
                let settings = resolve_grid(&self.config.grid, &grid);
                bench_handlers::handle_grid(&settings, resolve_seed(seed), format)
            }
            Some(Command::Stats(stats)) => bench_handlers::handle_stats(
                &self.config,
                &stats.command,
                resolve_seed(seed),
                format,
            ),
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
