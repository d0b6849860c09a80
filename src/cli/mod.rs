// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `build` — parses the ratings file, splits it and writes
//                the four matrix artifacts to the cache folder
//   2. `stats` — loads the cached artifacts and prints their
//                dimensions (useful to sanity-check a build)
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, BuildArgs, StatsArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "ratings-prep",
    version = "0.1.0",
    about = "Split a movie ratings file into train/test/validation sets and build the utility matrix."
)]
pub struct Cli {
    /// The subcommand to run (build or stats)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match &self.command {
            Commands::Build(args) => self.run_build(args.clone()),
            Commands::Stats(args) => self.run_stats(args.clone()),
        }
    }

    /// Handles the `build` subcommand.
    /// Converts CLI args into a BuildConfig and hands off to Layer 2.
    fn run_build(&self, args: BuildArgs) -> Result<()> {
        use crate::application::build_use_case::BuildUseCase;

        tracing::info!("Starting dataset build with settings: {}", args.settings);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = BuildUseCase::new(args.into());
        let artifacts = use_case.execute()?;

        println!(
            "Build complete: {} train / {} test / {} validation records, utility matrix {}x{}.",
            artifacts.train.len(),
            artifacts.test.len(),
            artifacts.validation.len(),
            artifacts.utility.nrows(),
            artifacts.utility.ncols(),
        );
        Ok(())
    }

    /// Handles the `stats` subcommand.
    /// Loads the cached artifact set and prints a short report.
    fn run_stats(&self, args: StatsArgs) -> Result<()> {
        use crate::application::stats_use_case::StatsUseCase;

        let use_case = StatsUseCase::new(args.settings.clone());
        let report = use_case.execute()?;

        println!("{}", report);
        Ok(())
    }
}
