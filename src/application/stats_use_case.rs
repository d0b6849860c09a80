// ============================================================
// Layer 2 — StatsUseCase
// ============================================================
// Loads the cached artifact set and summarises it, without
// ever touching the raw ratings file. Handy for checking what
// a previous build produced before starting a long training
// run on top of it.
//
// If the cache is absent (or only partially present) this is
// an error with a hint to run `build` first — it never quietly
// rebuilds, because the user asked for a report, not a
// potentially expensive side effect.

use anyhow::{bail, Result};
use std::fmt;
use std::path::Path;

use crate::data::builder::DatasetBuilder;
use crate::infra::settings::Settings;

/// A human-readable summary of the cached artifact set.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub train_records:      usize,
    pub test_records:       usize,
    pub validation_records: usize,
    pub matrix_items:       usize,
    pub matrix_users:       usize,
    pub observed_cells:     usize,
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cached artifact set:")?;
        writeln!(f, "  train:      {} records", self.train_records)?;
        writeln!(f, "  test:       {} records", self.test_records)?;
        writeln!(f, "  validation: {} records", self.validation_records)?;
        write!(
            f,
            "  utility:    {} items x {} users, {} observed cells",
            self.matrix_items, self.matrix_users, self.observed_cells
        )
    }
}

/// Owns the settings path and produces a StatsReport.
pub struct StatsUseCase {
    settings_path: String,
}

impl StatsUseCase {
    /// Create a new StatsUseCase reading the given settings file
    pub fn new(settings_path: String) -> Self {
        Self { settings_path }
    }

    /// Load the cached artifacts and summarise them.
    pub fn execute(&self) -> Result<StatsReport> {
        let settings = Settings::load(Path::new(&self.settings_path))?;
        let builder = DatasetBuilder::new(&settings, None);

        if !builder.store().set_available() {
            bail!(
                "No complete cached artifact set in '{}'. Run 'build' first.",
                settings.matrices_folder_path
            );
        }

        let set = builder.store().load_set()?;
        Ok(StatsReport {
            train_records:      set.train.len(),
            test_records:       set.test.len(),
            validation_records: set.validation.len(),
            matrix_items:       set.utility.nrows(),
            matrix_users:       set.utility.ncols(),
            observed_cells:     set.observed_cells(),
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_settings(dir: &TempDir, ratings: &Path) -> String {
        let settings = serde_json::json!({
            "ratings_file_path": ratings.to_string_lossy(),
            "matrices_folder_path": dir.path().join("matrices").to_string_lossy(),
            "train_set_file_name": "train_set",
            "test_set_file_name": "test_set",
            "validation_set_file_name": "validation_set",
            "utility_matrix_file_name": "utility_matrix",
            "number_processes": 1,
            "number_neighbours": 5,
            "alpha": 0.01,
            "train_epoch": 10,
            "latent_factors": 8,
            "regularization_factor": 0.1,
            "hyper_optimization": false,
            "hyper_epoch": 1
        });
        let path = dir.path().join("config.json");
        fs::write(&path, settings.to_string()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_stats_without_cache_is_an_error() {
        let dir = TempDir::new().unwrap();
        let settings_path = write_settings(&dir, Path::new("unused.csv"));

        let err = StatsUseCase::new(settings_path).execute().unwrap_err();
        assert!(err.to_string().contains("Run 'build' first"));
    }

    #[test]
    fn test_stats_after_build_reports_counts() {
        let dir = TempDir::new().unwrap();
        let ratings = dir.path().join("ratings.csv");
        let mut content = String::from("userId,movieId,rating,timestamp\n");
        for i in 0..20u32 {
            content.push_str(&format!("{},{},4.0,{}\n", (i % 4) + 1, (i % 2) + 1, i));
        }
        fs::write(&ratings, content).unwrap();
        let settings_path = write_settings(&dir, &ratings);

        let settings = Settings::load(Path::new(&settings_path)).unwrap();
        DatasetBuilder::new(&settings, None).build(false).unwrap();

        let report = StatsUseCase::new(settings_path).execute().unwrap();
        assert_eq!(
            report.train_records + report.test_records + report.validation_records,
            20
        );
        assert_eq!(report.matrix_items, 2);
        assert_eq!(report.matrix_users, 4);
        // At most one cell per (item, user) pair can be observed
        assert!(report.observed_cells <= 8);
    }
}
