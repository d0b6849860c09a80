// ============================================================
// Layer 5 — Run Log
// ============================================================
// Appends one CSV line per completed run so results can be
// compared across experiments.
//
// Columns:
//   operation, rmse, elapsed_secs,
//   number_processes, number_neighbours, alpha, train_epoch,
//   latent_factors, regularization_factor, hyper_optimization,
//   hyper_epoch
//
// The hyperparameter columns are captured from the settings at
// construction time, so every line records the configuration
// the run actually used — not whatever the settings file says
// by the time someone reads the log.
//
// A failed append returns an error, but callers treat it as
// non-fatal: losing one log line must never fail a build that
// already produced its artifacts. The decision sits with the
// caller, not here.
//
// Example output:
//   dataset_build, NaN, 1.482913, 4, 10, 0.01, 20, 32, 0.1, false, 5
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::infra::settings::Settings;

/// Appends run results to the configured CSV log file.
pub struct RunLog {
    /// Name of the operation being logged (e.g. "dataset_build")
    operation: String,

    /// Full path of the CSV file lines are appended to
    log_path: PathBuf,

    // Hyperparameter bundle, frozen at construction
    number_processes:      u32,
    number_neighbours:     u32,
    alpha:                 f64,
    train_epoch:           u32,
    latent_factors:        u32,
    regularization_factor: f64,
    hyper_optimization:    bool,
    hyper_epoch:           u32,
}

impl RunLog {
    /// Create a RunLog for one named operation, snapshotting
    /// the hyperparameters from the settings.
    pub fn new(operation: impl Into<String>, settings: &Settings) -> Self {
        Self {
            operation: operation.into(),
            log_path:  PathBuf::from(&settings.run_log_path),

            number_processes:      settings.number_processes,
            number_neighbours:     settings.number_neighbours,
            alpha:                 settings.alpha,
            train_epoch:           settings.train_epoch,
            latent_factors:        settings.latent_factors,
            regularization_factor: settings.regularization_factor,
            hyper_optimization:    settings.hyper_optimization,
            hyper_epoch:           settings.hyper_epoch,
        }
    }

    /// Append one result line.
    ///
    /// `rmse` is NaN for operations that produce no error
    /// metric (like the dataset build itself); downstream
    /// training runs pass their real test-set RMSE.
    pub fn save(&self, rmse: f64, elapsed_secs: f64) -> Result<()> {
        let line = format!(
            "{}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}",
            self.operation,
            rmse,
            elapsed_secs,
            self.number_processes,
            self.number_neighbours,
            self.alpha,
            self.train_epoch,
            self.latent_factors,
            self.regularization_factor,
            self.hyper_optimization,
            self.hyper_epoch,
        );

        // Open in append mode — one file accumulates all runs
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Cannot open run log '{}'", self.log_path.display()))?;

        writeln!(file, "{line}")
            .with_context(|| format!("Cannot append to run log '{}'", self.log_path.display()))?;

        tracing::debug!("Run log line: {line}");
        Ok(())
    }
}
