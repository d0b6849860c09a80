// ============================================================
// Layer 5 — Artifact Store
// ============================================================
// Saves and loads the four cached artifacts:
//
//   matrices/
//     train_set.bin        ← train partition, N x 4 matrix
//     test_set.bin         ← test partition
//     validation_set.bin   ← validation partition
//     utility_matrix.bin   ← dense item x user matrix
//
// The partitions are stored as 2D float matrices (one row per
// record, columns user/item/rating/timestamp) and the utility
// matrix in its dense form, NAN sentinel included. Everything
// goes through serde + bincode, so the files are compact binary
// and loading is a straight deserialize.
//
// The four files are ONE logical unit. That shows up twice:
//   - set_available() answers for the whole set; a single
//     missing file means "no cache" (a partial set could mix
//     artifacts from different runs, which is worse than a
//     rebuild)
//   - save_set() stages all four as .tmp files first and only
//     then renames them into place, so a failed save never
//     leaves a half-replaced set behind
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use ndarray::Array2;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::artifact_set::ArtifactSet;
use crate::domain::rating::Rating;
use crate::infra::settings::Settings;

/// Extension appended to the configured artifact base names
const ARTIFACT_EXT: &str = "bin";

/// Knows where the four artifacts live and how to (de)serialize
/// them. Holds paths only — no file handles are kept open.
pub struct ArtifactStore {
    train_path:      PathBuf,
    test_path:       PathBuf,
    validation_path: PathBuf,
    utility_path:    PathBuf,
}

impl ArtifactStore {
    /// Derive the four artifact paths from the settings:
    /// `<matrices_folder_path>/<name>.bin` for each name.
    pub fn from_settings(settings: &Settings) -> Self {
        let folder = Path::new(&settings.matrices_folder_path);
        let artifact_path =
            |name: &str| folder.join(format!("{name}.{ARTIFACT_EXT}"));

        Self {
            train_path:      artifact_path(&settings.train_set_file_name),
            test_path:       artifact_path(&settings.test_set_file_name),
            validation_path: artifact_path(&settings.validation_set_file_name),
            utility_path:    artifact_path(&settings.utility_matrix_file_name),
        }
    }

    /// True only when ALL FOUR artifact files exist.
    ///
    /// This is one question about the whole set, not four
    /// separate ones: 1-3 files present is treated exactly like
    /// 0 files present, and the builder regenerates everything.
    pub fn set_available(&self) -> bool {
        self.paths().iter().all(|path| path.is_file())
    }

    /// Load the full artifact set from the cache.
    /// Call only after set_available() returned true (a missing
    /// file surfaces as a read error, not a panic).
    pub fn load_set(&self) -> Result<ArtifactSet> {
        let train      = matrix_to_partition(&load_matrix(&self.train_path)?);
        let test       = matrix_to_partition(&load_matrix(&self.test_path)?);
        let validation = matrix_to_partition(&load_matrix(&self.validation_path)?);
        let utility    = load_matrix(&self.utility_path)?;

        tracing::info!(
            "Loaded cached artifact set: {} train, {} test, {} validation, utility {:?}",
            train.len(),
            test.len(),
            validation.len(),
            utility.dim(),
        );

        Ok(ArtifactSet { train, test, validation, utility })
    }

    /// Persist the full artifact set, overwriting any previous
    /// files.
    ///
    /// Two-phase: all four files are first written next to
    /// their targets as `.tmp` files; only when every write
    /// succeeded are they renamed into place. A failure during
    /// the write phase leaves the old set untouched.
    pub fn save_set(&self, set: &ArtifactSet) -> Result<()> {
        if let Some(folder) = self.train_path.parent() {
            fs::create_dir_all(folder)
                .with_context(|| format!("Cannot create artifact folder '{}'", folder.display()))?;
        }

        let staged = [
            (self.train_path.clone(),      bincode::serialize(&partition_to_matrix(&set.train)?)?),
            (self.test_path.clone(),       bincode::serialize(&partition_to_matrix(&set.test)?)?),
            (self.validation_path.clone(), bincode::serialize(&partition_to_matrix(&set.validation)?)?),
            (self.utility_path.clone(),    bincode::serialize(&set.utility)?),
        ];

        // Phase 1: write everything to .tmp files
        let write_result: Result<()> = staged.iter().try_for_each(|(path, bytes)| {
            fs::write(tmp_path(path), bytes)
                .with_context(|| format!("Cannot write artifact '{}'", path.display()))
        });
        if let Err(e) = write_result {
            // Best-effort cleanup of whatever tmp files made it
            for (path, _) in &staged {
                let _ = fs::remove_file(tmp_path(path));
            }
            return Err(e);
        }

        // Phase 2: rename into place (same directory, so this
        // is a cheap metadata operation on every platform)
        for (path, _) in &staged {
            fs::rename(tmp_path(path), path)
                .with_context(|| format!("Cannot commit artifact '{}'", path.display()))?;
        }

        tracing::info!("Saved artifact set ({} files)", staged.len());
        Ok(())
    }

    /// The four artifact paths, in train/test/validation/utility
    /// order. Used by tests to poke at individual files.
    pub fn paths(&self) -> [&Path; 4] {
        [
            &self.train_path,
            &self.test_path,
            &self.validation_path,
            &self.utility_path,
        ]
    }
}

/// Staging name for an artifact path: "train_set.bin.tmp"
fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Read and deserialize one stored matrix.
fn load_matrix(path: &Path) -> Result<Array2<f64>> {
    let bytes = fs::read(path)
        .with_context(|| format!("Cannot read cached artifact '{}'", path.display()))?;
    bincode::deserialize(&bytes)
        .with_context(|| format!("Cached artifact '{}' is corrupt", path.display()))
}

/// Flatten a partition into its on-disk N x 4 matrix form.
fn partition_to_matrix(records: &[Rating]) -> Result<Array2<f64>> {
    let flat: Vec<f64> = records.iter().flat_map(|r| r.as_row()).collect();
    Array2::from_shape_vec((records.len(), 4), flat)
        .context("Partition rows do not form an N x 4 matrix")
}

/// Rebuild the record list from its stored matrix form.
fn matrix_to_partition(matrix: &Array2<f64>) -> Vec<Rating> {
    matrix
        .outer_iter()
        .map(|row| Rating::from_row(&[row[0], row[1], row[2], row[3]]))
        .collect()
}
