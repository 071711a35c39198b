//! Command-line front end for pathbench.
//!
//! Loads a [`PathbenchConfig`](config::PathbenchConfig), merges command-line
//! overrides into it, and runs the general-graph or grid experiments.
//!
//! # Key Abstractions
//!
//! - [`PathbenchCli`]: application object owning the loaded configuration
//! - [`CliArgs`]: clap-derived argument tree
//! - `bench_handlers` / `config_handlers`: one function per subcommand

pub mod app;
pub mod bench_handlers;
pub mod cli;
pub mod config;
pub mod config_handlers;

pub use app::PathbenchCli;
pub use cli::CliArgs;
pub use config::{OutputFormat, PathbenchConfig};
