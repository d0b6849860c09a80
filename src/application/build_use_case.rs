// ============================================================
// Layer 2 — BuildUseCase
// ============================================================
// Orchestrates the full dataset build in order:
//
//   Step 1: Load and validate settings   (Layer 5 - infra)
//   Step 2: Run the dataset builder      (Layer 4 - data)
//   Step 3: Append to the run log        (Layer 5 - infra)
//
// Error policy follows the severity of each step:
//   - Settings problems are fatal (nothing can run without them)
//   - Build problems are fatal (no artifacts were produced)
//   - Run-log problems are NOT fatal — the artifacts already
//     exist on disk, so a missing log line only costs a warning
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::Result;
use std::path::Path;
use std::time::Instant;

use crate::data::builder::DatasetBuilder;
use crate::domain::artifact_set::ArtifactSet;
use crate::infra::run_log::RunLog;
use crate::infra::settings::Settings;

/// Everything the build workflow needs, converted from CLI args
/// by Layer 1.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Path of the JSON settings file
    pub settings_path: String,

    /// Optional override of the configured ratings file
    pub ratings_file: Option<String>,

    /// Rebuild even when all four cached artifacts exist
    pub force_rebuild: bool,
}

/// Owns the config and runs the build workflow end to end.
pub struct BuildUseCase {
    config: BuildConfig,
}

impl BuildUseCase {
    /// Create a new BuildUseCase with the given configuration
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Execute the build and return the artifact set.
    pub fn execute(&self) -> Result<ArtifactSet> {
        let cfg = &self.config;

        // ── Step 1: Load settings ─────────────────────────────────────────────
        // Fails with one error listing every missing key.
        let settings = Settings::load(Path::new(&cfg.settings_path))?;

        // ── Step 2: Build (or load) the artifact set ──────────────────────────
        let builder = DatasetBuilder::new(&settings, cfg.ratings_file.as_deref());
        let started = Instant::now();
        let artifacts = builder.build(cfg.force_rebuild)?;
        let elapsed = started.elapsed().as_secs_f64();

        tracing::info!(
            "Artifact set ready in {:.3}s: {} train, {} test, {} validation, utility {:?}",
            elapsed,
            artifacts.train.len(),
            artifacts.test.len(),
            artifacts.validation.len(),
            artifacts.utility.dim(),
        );

        // ── Step 3: Record the run ────────────────────────────────────────────
        // The build produces no RMSE, so that column is NaN.
        // A log failure is downgraded to a warning: the
        // artifacts are already safely on disk.
        let run_log = RunLog::new("dataset_build", &settings);
        if let Err(e) = run_log.save(f64::NAN, elapsed) {
            tracing::warn!("Could not append to run log: {e:#}");
        }

        Ok(artifacts)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_workspace(dir: &TempDir) -> String {
        let ratings_path = dir.path().join("ratings.csv");
        let mut content = String::from("userId,movieId,rating,timestamp\n");
        for i in 0..40u32 {
            content.push_str(&format!("{},{},3.5,{}\n", (i % 8) + 1, (i % 4) + 1, 500 + i));
        }
        fs::write(&ratings_path, content).unwrap();

        let settings = serde_json::json!({
            "ratings_file_path": ratings_path.to_string_lossy(),
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
            "hyper_epoch": 1,
            "run_log_path": dir.path().join("logs.csv").to_string_lossy()
        });
        let settings_path = dir.path().join("config.json");
        fs::write(&settings_path, settings.to_string()).unwrap();
        settings_path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_execute_builds_and_logs() {
        let dir = TempDir::new().unwrap();
        let settings_path = write_workspace(&dir);

        let use_case = BuildUseCase::new(BuildConfig {
            settings_path,
            ratings_file: None,
            force_rebuild: false,
        });
        let artifacts = use_case.execute().unwrap();

        assert_eq!(artifacts.record_count(), 40);
        assert_eq!(artifacts.utility.dim(), (4, 8));

        // One run log line was appended
        let log = fs::read_to_string(dir.path().join("logs.csv")).unwrap();
        assert_eq!(log.lines().count(), 1);
        assert!(log.starts_with("dataset_build,"));
    }

    #[test]
    fn test_missing_settings_file_is_fatal() {
        let use_case = BuildUseCase::new(BuildConfig {
            settings_path: "/no/such/config.json".into(),
            ratings_file:  None,
            force_rebuild: false,
        });
        assert!(use_case.execute().is_err());
    }
}
