//! Configuration for the pathbench CLI.
//!
//! Provides the [`PathbenchConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `PATHBENCH_CONFIG` environment variable
//! 3. XDG default: `~/.config/pathbench/config.toml`
//! 4. Built-in defaults
//!
//! Environment overrides use the `PATHBENCH_` prefix, e.g.
//! `PATHBENCH_GRID_HEIGHT=12`.

use clap::ValueEnum;
use confyg::{Confygery, env};
use pathbench_core::{Error, Result};
use pathbench_graph::Heuristic;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the pathbench CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathbenchConfig {
    /// RNG seed; a fresh entropy seed is used when unset.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "seed_to_toml",
        deserialize_with = "lenient_option"
    )]
    pub seed: Option<u64>,

    /// General-graph experiment.
    pub general: GeneralConfig,

    /// Grid experiment.
    pub grid: GridConfig,

    /// Output settings.
    pub output: OutputConfig,
}

/// General-graph experiment settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Number of vertices.
    #[serde(deserialize_with = "lenient")]
    pub vertices: usize,
    /// Requested edge count.
    #[serde(deserialize_with = "lenient")]
    pub edges: usize,
    /// Source vertex.
    #[serde(deserialize_with = "lenient")]
    pub source: usize,
    /// Timed runs per algorithm.
    #[serde(deserialize_with = "lenient")]
    pub trials: usize,
}

/// Grid experiment settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Grid rows.
    #[serde(deserialize_with = "lenient")]
    pub height: usize,
    /// Grid columns.
    #[serde(deserialize_with = "lenient")]
    pub width: usize,
    /// Obstacle cells.
    #[serde(deserialize_with = "lenient")]
    pub obstacles: usize,
    /// Number of A* experiments.
    #[serde(deserialize_with = "lenient")]
    pub trials: usize,
    /// A* heuristic.
    pub heuristic: Heuristic,
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format.
    pub format: OutputFormat,
}

/// How reports are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            vertices: 100,
            edges: 500,
            source: 7,
            trials: 10,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            height: 10,
            width: 20,
            obstacles: 40,
            trials: 5,
            heuristic: Heuristic::Zero,
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl PathbenchConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// A config path that does not exist is skipped, leaving defaults and
    /// environment overrides in effect.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("PATHBENCH");
        env_opts.add_section("general");
        env_opts.add_section("grid");
        env_opts.add_section("output");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("PATHBENCH_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pathbench").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// Helper: numbers from env strings
// ============================================================================

/// A value given either natively or as text.
///
/// Environment overrides arrive as strings, file values as TOML numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Native(T),
    Text(String),
}

impl<T> Lenient<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn resolve<E: de::Error>(self) -> std::result::Result<T, E> {
        match self {
            Self::Native(value) => Ok(value),
            Self::Text(text) => text.trim().parse().map_err(E::custom),
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    Lenient::<T>::deserialize(deserializer)?.resolve()
}

/// TOML integers are signed 64-bit, so larger seeds are written as strings.
fn seed_to_toml<S: Serializer>(
    seed: &Option<u64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match *seed {
        Some(value) => match i64::try_from(value) {
            Ok(signed) => serializer.serialize_i64(signed),
            Err(_) => serializer.collect_str(&value),
        },
        None => serializer.serialize_none(),
    }
}

fn lenient_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    Lenient::<T>::deserialize(deserializer)?.resolve().map(Some)
}

// ============================================================================
// Tests
// ============================================================================

/// Serializes tests that read or write `PATHBENCH_*` variables.
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
