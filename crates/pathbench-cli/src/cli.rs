//! CLI argument parsing and command definitions.
//!
//! Every generation parameter is optional on the command line; values left
//! unset fall back to the loaded [`PathbenchConfig`](crate::config::PathbenchConfig).

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use pathbench_graph::Heuristic;

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "pathbench", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "PATHBENCH_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Seed for the random number generator (random when omitted).
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a random connected graph and compare Dijkstra with Bellman-Ford.
    General(GeneralArgs),

    /// Generate a grid obstacle graph and time A* between random cells.
    Grid(GridArgs),

    /// Generate a graph and report its statistics without benchmarking.
    Stats(StatsCommand),

    /// Configuration operations.
    Config(ConfigCommand),

    /// Print version information.
    Version,
}

/// Parameters of the general-graph experiment.
#[derive(Args, Debug, Clone, Default)]
pub struct GeneralArgs {
    /// Number of vertices.
    #[arg(long)]
    pub vertices: Option<usize>,

    /// Requested edge count.
    #[arg(long)]
    pub edges: Option<usize>,

    /// Source vertex for the single-source algorithms.
    #[arg(long)]
    pub source: Option<usize>,

    /// Timed runs per algorithm.
    #[arg(long)]
    pub trials: Option<usize>,
}

/// Parameters of the grid experiment.
#[derive(Args, Debug, Clone, Default)]
pub struct GridArgs {
    /// Grid rows.
    #[arg(long)]
    pub height: Option<usize>,

    /// Grid columns.
    #[arg(long)]
    pub width: Option<usize>,

    /// Number of obstacle cells.
    #[arg(long)]
    pub obstacles: Option<usize>,

    /// Number of A* experiments.
    #[arg(long)]
    pub trials: Option<usize>,

    /// A* heuristic: zero or manhattan.
    #[arg(long)]
    pub heuristic: Option<Heuristic>,
}

/// Stats-specific subcommands.
#[derive(Parser, Debug)]
pub struct StatsCommand {
    /// Which generator to run.
    #[command(subcommand)]
    pub command: StatsTarget,
}

/// Graph kinds that `stats` can generate.
#[derive(Subcommand, Debug)]
pub enum StatsTarget {
    /// Random general graph.
    General(GeneralArgs),

    /// Grid obstacle graph.
    Grid(GridArgs),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "grid.height").
        key: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML.
    Show,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_args_default() {
        let args = CliArgs::parse_from(["test"]);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(args.seed.is_none());
        assert!(args.format.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_verbose() {
        let args = CliArgs::parse_from(["test", "--verbose"]);
        assert!(args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_args_config() {
        let args = CliArgs::parse_from(["test", "--config", "/path/to/config.toml"]);
        assert_eq!(args.config, Some("/path/to/config.toml".to_string()));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["test", "general", "--seed", "42", "--format", "json"]);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_general_command() {
        let args = CliArgs::parse_from([
            "test",
            "general",
            "--vertices",
            "20",
            "--edges",
            "60",
            "--source",
            "3",
        ]);
        match args.command {
            Some(Command::General(general)) => {
                assert_eq!(general.vertices, Some(20));
                assert_eq!(general.edges, Some(60));
                assert_eq!(general.source, Some(3));
                assert!(general.trials.is_none());
            }
            _ => panic!("Expected General command"),
        }
    }

    #[test]
    fn test_grid_command() {
        let args = CliArgs::parse_from([
            "test",
            "grid",
            "--height",
            "4",
            "--width",
            "6",
            "--heuristic",
            "manhattan",
        ]);
        match args.command {
            Some(Command::Grid(grid)) => {
                assert_eq!(grid.height, Some(4));
                assert_eq!(grid.width, Some(6));
                assert!(grid.obstacles.is_none());
                assert_eq!(grid.heuristic, Some(Heuristic::Manhattan));
            }
            _ => panic!("Expected Grid command"),
        }
    }

    #[test]
    fn test_grid_command_bad_heuristic() {
        let result = CliArgs::try_parse_from(["test", "grid", "--heuristic", "euclid"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_stats_grid_command() {
        let args = CliArgs::parse_from(["test", "stats", "grid", "--obstacles", "3"]);
        match args.command {
            Some(Command::Stats(StatsCommand {
                command: StatsTarget::Grid(grid),
            })) => assert_eq!(grid.obstacles, Some(3)),
            _ => panic!("Expected Stats Grid command"),
        }
    }

    #[test]
    fn test_version_command() {
        let args = CliArgs::parse_from(["test", "version"]);
        assert!(matches!(args.command, Some(Command::Version)));
    }

    // ------------------------------------------------------------------------
    // Config command tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_config_get_command() {
        let args = CliArgs::parse_from(["test", "config", "get", "grid.height"]);
        match args.command {
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Get { key },
            })) => assert_eq!(key, "grid.height"),
            _ => panic!("Expected Config Get command"),
        }
    }

    #[test]
    fn test_config_init_force() {
        let args = CliArgs::parse_from(["test", "config", "init", "--force"]);
        match args.command {
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Init { file, force },
            })) => {
                assert!(file.is_none());
                assert!(force);
            }
            _ => panic!("Expected Config Init command with force"),
        }
    }

    #[test]
    fn test_config_show_command() {
        let args = CliArgs::parse_from(["test", "config", "show"]);
        assert!(matches!(
            args.command,
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Show
            }))
        ));
    }
}
