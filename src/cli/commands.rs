// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `build` and `stats`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → bool, PathBuf, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use crate::application::build_use_case::BuildConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build (or load from cache) the train/test/validation sets and utility matrix
    Build(BuildArgs),

    /// Print the dimensions of a previously built artifact set
    Stats(StatsArgs),
}

/// All arguments for the `build` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Path to the JSON settings file with file paths and hyperparameters
    #[arg(long, default_value = "config.json")]
    pub settings: String,

    /// Override the ratings file path from the settings file
    #[arg(long)]
    pub ratings_file: Option<String>,

    /// Rebuild the matrices even when all four cached files exist
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

/// Convert CLI BuildArgs into the application-layer BuildConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<BuildArgs> for BuildConfig {
    fn from(a: BuildArgs) -> Self {
        BuildConfig {
            settings_path: a.settings,
            ratings_file:  a.ratings_file,
            force_rebuild: a.force,
        }
    }
}

/// All arguments for the `stats` command
#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the JSON settings file (same one used for the build)
    #[arg(long, default_value = "config.json")]
    pub settings: String,
}
