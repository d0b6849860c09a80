// ============================================================
// Layer 5 — Settings
// ============================================================
// Loads the JSON settings file into a typed struct.
//
// The settings path is always passed in explicitly — nothing
// in this crate reads a hard-coded "config.json" from the
// working directory. The CLI supplies the default, so library
// code stays free of hidden file dependencies and tests can
// point at temp files.
//
// Validation is eager and complete: instead of failing on the
// first missing key (serde's default), we first collect every
// missing required key and report them all at once. Fixing a
// settings file one error message at a time is miserable.
//
// Example settings file:
//   {
//     "ratings_file_path": "data/ratings.csv",
//     "matrices_folder_path": "data/matrices/",
//     "train_set_file_name": "train_set",
//     "test_set_file_name": "test_set",
//     "validation_set_file_name": "validation_set",
//     "utility_matrix_file_name": "utility_matrix",
//     "number_processes": 4,
//     "number_neighbours": 10,
//     "alpha": 0.01,
//     "train_epoch": 20,
//     "latent_factors": 32,
//     "regularization_factor": 0.1,
//     "hyper_optimization": false,
//     "hyper_epoch": 5
//   }
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json crate documentation

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every key that must be present in the settings file.
/// `run_log_path` is intentionally absent — it has a default.
const REQUIRED_KEYS: &[&str] = &[
    "ratings_file_path",
    "matrices_folder_path",
    "train_set_file_name",
    "test_set_file_name",
    "validation_set_file_name",
    "utility_matrix_file_name",
    "number_processes",
    "number_neighbours",
    "alpha",
    "train_epoch",
    "latent_factors",
    "regularization_factor",
    "hyper_optimization",
    "hyper_epoch",
];

/// Everything that can go wrong while loading settings.
/// All of these are fatal — a build cannot start without a
/// complete settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file '{}' is not valid JSON: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Lists EVERY missing key, not just the first one found
    #[error("settings file '{}' is missing required keys: {}", .path.display(), .keys.join(", "))]
    MissingKeys { path: PathBuf, keys: Vec<String> },

    /// A key exists but holds the wrong JSON type
    #[error("settings file '{}' has a key of the wrong type: {source}", .path.display())]
    WrongType {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The full settings surface of the pipeline: where the files
/// live, plus the hyperparameter bundle that gets stamped onto
/// every run log line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── File locations ───────────────────────────────────────
    /// Path to the raw ratings CSV (overridable on the CLI)
    pub ratings_file_path: String,

    /// Folder the four matrix artifacts are cached in
    pub matrices_folder_path: String,

    /// Base names of the four artifacts; the store appends the
    /// ".bin" extension
    pub train_set_file_name: String,
    pub test_set_file_name: String,
    pub validation_set_file_name: String,
    pub utility_matrix_file_name: String,

    // ── Hyperparameters (recorded in the run log) ────────────
    pub number_processes: u32,
    pub number_neighbours: u32,
    pub alpha: f64,
    pub train_epoch: u32,
    pub latent_factors: u32,
    pub regularization_factor: f64,
    pub hyper_optimization: bool,
    pub hyper_epoch: u32,

    // ── Optional ─────────────────────────────────────────────
    /// Where run results are appended; defaults to "logs.csv"
    #[serde(default = "default_run_log_path")]
    pub run_log_path: String,
}

fn default_run_log_path() -> String {
    "logs.csv".to_string()
}

impl Settings {
    /// Load and validate the settings file at `path`.
    ///
    /// Steps:
    ///   1. Read the file (Unreadable on I/O failure)
    ///   2. Parse as generic JSON (InvalidJson on bad syntax)
    ///   3. Check ALL required keys are present (MissingKeys)
    ///   4. Deserialize into the typed struct (WrongType)
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| SettingsError::InvalidJson {
                path: path.to_path_buf(),
                source,
            })?;

        // Collect every missing key before reporting anything
        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|key| value.get(**key).is_none())
            .map(|key| key.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(SettingsError::MissingKeys {
                path: path.to_path_buf(),
                keys: missing,
            });
        }

        serde_json::from_value(value).map_err(|source| SettingsError::WrongType {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn complete_json() -> serde_json::Value {
        serde_json::json!({
            "ratings_file_path": "data/ratings.csv",
            "matrices_folder_path": "data/matrices/",
            "train_set_file_name": "train_set",
            "test_set_file_name": "test_set",
            "validation_set_file_name": "validation_set",
            "utility_matrix_file_name": "utility_matrix",
            "number_processes": 4,
            "number_neighbours": 10,
            "alpha": 0.01,
            "train_epoch": 20,
            "latent_factors": 32,
            "regularization_factor": 0.1,
            "hyper_optimization": false,
            "hyper_epoch": 5
        })
    }

    fn write_settings(value: &serde_json::Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(value.to_string().as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_complete_file_loads() {
        let file = write_settings(&complete_json());
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.ratings_file_path, "data/ratings.csv");
        assert_eq!(settings.latent_factors, 32);
        // The optional key falls back to its default
        assert_eq!(settings.run_log_path, "logs.csv");
    }

    #[test]
    fn test_all_missing_keys_reported_together() {
        let mut value = complete_json();
        let map = value.as_object_mut().unwrap();
        map.remove("alpha");
        map.remove("train_set_file_name");
        map.remove("hyper_epoch");

        let file = write_settings(&value);
        let err = Settings::load(file.path()).unwrap_err();
        match err {
            SettingsError::MissingKeys { keys, .. } => {
                assert_eq!(keys.len(), 3);
                assert!(keys.contains(&"alpha".to_string()));
                assert!(keys.contains(&"train_set_file_name".to_string()));
                assert!(keys.contains(&"hyper_epoch".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load(Path::new("/no/such/config.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Unreadable { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidJson { .. }));
    }

    #[test]
    fn test_wrong_type_is_not_a_missing_key() {
        let mut value = complete_json();
        value.as_object_mut().unwrap().insert("alpha".into(), "fast".into());
        let file = write_settings(&value);
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::WrongType { .. }));
    }

    #[test]
    fn test_run_log_path_override() {
        let mut value = complete_json();
        value
            .as_object_mut()
            .unwrap()
            .insert("run_log_path".into(), "out/results.csv".into());
        let file = write_settings(&value);
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.run_log_path, "out/results.csv");
    }
}
