// ============================================================
// Layer 4 — Dataset Builder
// ============================================================
// The core of the pipeline: turns the raw ratings file into
// the four cached artifacts, or returns the cached set when it
// already exists.
//
// Build order:
//
//   Step 1: Cache check                 (Layer 5 - infra)
//   Step 2: Parse the ratings file      (Layer 4 - data)
//   Step 3: Scan id extents             (Layer 3 - domain)
//   Step 4: Shuffle + 70/15/15 split    (Layer 4 - data)
//   Step 5: Build the utility matrix    (Layer 4 - data)
//   Step 6: Persist all four artifacts  (Layer 5 - infra)
//
// The cache is all-or-nothing: the builder asks the store one
// question ("is the full set available?") and either loads all
// four artifacts or regenerates all four. It never mixes cached
// and fresh artifacts, because the split is random — a train
// set from one run and a utility matrix from another would
// disagree about which records are held out.
//
// Nothing is written until the whole set is assembled in
// memory, so a parse error can never truncate an existing
// cache.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use std::path::PathBuf;

use crate::data::parser::parse_ratings;
use crate::data::splitter::shuffle_and_split;
use crate::data::utility::build_utility_matrix;
use crate::domain::artifact_set::ArtifactSet;
use crate::domain::rating::RatingExtents;
use crate::infra::settings::Settings;
use crate::infra::store::ArtifactStore;

/// Produces and caches the artifact set from a ratings source.
pub struct DatasetBuilder {
    /// The ratings file to parse on a rebuild
    ratings_path: PathBuf,

    /// Where the four artifacts are cached
    store: ArtifactStore,
}

impl DatasetBuilder {
    /// Create a builder from the settings.
    ///
    /// `ratings_override` takes precedence over the configured
    /// `ratings_file_path` (mirrors the --ratings-file CLI flag).
    pub fn new(settings: &Settings, ratings_override: Option<&str>) -> Self {
        let ratings_path =
            PathBuf::from(ratings_override.unwrap_or(&settings.ratings_file_path));

        Self {
            ratings_path,
            store: ArtifactStore::from_settings(settings),
        }
    }

    /// Produce the artifact set, from cache when possible.
    ///
    /// With `force_rebuild = false` and a complete cached set,
    /// this returns the cached artifacts without touching the
    /// ratings file at all. In every other case the set is
    /// rebuilt from scratch and all four files are overwritten.
    pub fn build(&self, force_rebuild: bool) -> Result<ArtifactSet> {
        // ── Step 1: Cache check ───────────────────────────────────────────────
        // One question for the whole set; 1-3 files present is
        // the same as none present.
        if !force_rebuild && self.store.set_available() {
            tracing::info!("Cached artifact set found, skipping rebuild");
            return self.store.load_set();
        }
        tracing::info!(
            "No usable cache, building from '{}'",
            self.ratings_path.display()
        );

        // ── Step 2: Parse the ratings file ────────────────────────────────────
        // All-or-nothing: a malformed row aborts here, before
        // anything is written.
        let records = parse_ratings(&self.ratings_path)?;
        tracing::info!("Parsed {} rating records", records.len());

        // ── Step 3: Scan extents over the FULL input ──────────────────────────
        // Matrix dimensions must cover users/movies that end up
        // only in the held-out partitions, so this happens
        // before the split.
        let extents = RatingExtents::scan(&records);

        // ── Step 4: Shuffle and split 70/15/15 ────────────────────────────────
        let total = records.len();
        let (train, test, validation) = shuffle_and_split(records);
        debug_assert_eq!(train.len() + test.len() + validation.len(), total);

        // ── Step 5: Build the utility matrix from train only ──────────────────
        let utility = build_utility_matrix(&train, &extents);

        // ── Step 6: Persist all four artifacts ────────────────────────────────
        let set = ArtifactSet { train, test, validation, utility };
        self.store.save_set(&set)?;

        Ok(set)
    }

    /// Read-only access to the store (used by the stats use
    /// case and by tests).
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// 100 well-formed records: user ids 1..=10, movie ids
    /// 1..=5, ratings 1..=5 (zero never used as a real rating).
    fn write_ratings_file(dir: &Path) -> PathBuf {
        let mut content = String::from("userId,movieId,rating,timestamp\n");
        for i in 0..100u32 {
            let user = (i % 10) + 1;
            let movie = (i % 5) + 1;
            let rating = (i % 5) + 1;
            content.push_str(&format!("{user},{movie},{rating}.0,{}\n", 1000 + i));
        }
        let path = dir.join("ratings.csv");
        fs::write(&path, content).unwrap();
        path
    }

    fn settings_in(dir: &TempDir, ratings_path: &Path) -> Settings {
        Settings {
            ratings_file_path:         ratings_path.to_string_lossy().into_owned(),
            matrices_folder_path:      dir.path().join("matrices").to_string_lossy().into_owned(),
            train_set_file_name:       "train_set".into(),
            test_set_file_name:        "test_set".into(),
            validation_set_file_name:  "validation_set".into(),
            utility_matrix_file_name:  "utility_matrix".into(),
            number_processes:          1,
            number_neighbours:         5,
            alpha:                     0.01,
            train_epoch:               10,
            latent_factors:            8,
            regularization_factor:     0.1,
            hyper_optimization:        false,
            hyper_epoch:               1,
            run_log_path:              dir.path().join("logs.csv").to_string_lossy().into_owned(),
        }
    }

    #[test]
    fn test_build_produces_complete_partitions_and_matrix() {
        let dir = TempDir::new().unwrap();
        let ratings = write_ratings_file(dir.path());
        let builder = DatasetBuilder::new(&settings_in(&dir, &ratings), None);

        let set = builder.build(false).unwrap();

        assert_eq!(set.record_count(), 100);
        assert_eq!(set.train.len(), 70);
        assert_eq!(set.test.len(), 15);
        assert_eq!(set.validation.len(), 15);
        // Shape comes from the whole input: items 1..=5, users 1..=10
        assert_eq!(set.utility.dim(), (5, 10));
        // Every cell is either an observed rating or NAN, never 0
        assert!(set.utility.iter().all(|v| v.is_nan() || *v != 0.0));
        // All four files exist afterwards
        assert!(builder.store().set_available());
    }

    #[test]
    fn test_cached_set_short_circuits_without_reading_source() {
        let dir = TempDir::new().unwrap();
        let ratings = write_ratings_file(dir.path());
        let settings = settings_in(&dir, &ratings);

        let first = DatasetBuilder::new(&settings, None).build(false).unwrap();

        // Delete the source: a cached build must not need it
        fs::remove_file(&ratings).unwrap();
        let second = DatasetBuilder::new(&settings, None).build(false).unwrap();

        assert_eq!(second.train, first.train);
        assert_eq!(second.test, first.test);
        assert_eq!(second.validation, first.validation);
        assert_eq!(second.utility.dim(), first.utility.dim());
    }

    #[test]
    fn test_force_rebuild_always_reparses() {
        let dir = TempDir::new().unwrap();
        let ratings = write_ratings_file(dir.path());
        let settings = settings_in(&dir, &ratings);

        DatasetBuilder::new(&settings, None).build(false).unwrap();

        // With the source gone, a forced rebuild must fail —
        // proving it reparses instead of serving the cache
        fs::remove_file(&ratings).unwrap();
        assert!(DatasetBuilder::new(&settings, None).build(true).is_err());
    }

    #[test]
    fn test_partial_cache_is_regenerated() {
        let dir = TempDir::new().unwrap();
        let ratings = write_ratings_file(dir.path());
        let settings = settings_in(&dir, &ratings);
        let builder = DatasetBuilder::new(&settings, None);

        builder.build(false).unwrap();

        // Remove one of the four files → the set counts as absent
        fs::remove_file(builder.store().paths()[3]).unwrap();
        assert!(!builder.store().set_available());

        // A plain (non-forced) build regenerates all four
        let set = builder.build(false).unwrap();
        assert_eq!(set.record_count(), 100);
        assert!(builder.store().set_available());
    }

    #[test]
    fn test_parse_failure_leaves_no_artifacts() {
        let dir = TempDir::new().unwrap();
        let ratings = dir.path().join("ratings.csv");
        fs::write(&ratings, "userId,movieId,rating,timestamp\n1,2,broken,100\n").unwrap();
        let builder = DatasetBuilder::new(&settings_in(&dir, &ratings), None);

        assert!(builder.build(false).is_err());
        assert!(!builder.store().set_available());
        assert!(!dir.path().join("matrices").join("train_set.bin").exists());
    }

    #[test]
    fn test_ratings_override_wins_over_settings() {
        let dir = TempDir::new().unwrap();
        let ratings = write_ratings_file(dir.path());
        let mut settings = settings_in(&dir, &ratings);
        settings.ratings_file_path = "/no/such/file.csv".into();

        let override_path = ratings.to_string_lossy().into_owned();
        let builder = DatasetBuilder::new(&settings, Some(&override_path));
        assert_eq!(builder.build(false).unwrap().record_count(), 100);
    }

    #[test]
    fn test_known_record_appears_in_matrix_when_in_train() {
        // One record only: it always lands in some partition,
        // and if that partition is train the matrix holds it at
        // [item-1, user-1]. With N=1 the cut points are 0/0 so
        // the record goes to validation — build a file where
        // every record is identical instead, making the matrix
        // content deterministic regardless of the shuffle.
        let dir = TempDir::new().unwrap();
        let ratings = dir.path().join("ratings.csv");
        let mut content = String::from("userId,movieId,rating,timestamp\n");
        for _ in 0..10 {
            content.push_str("3,2,4.0,1000\n");
        }
        fs::write(&ratings, content).unwrap();

        let set = DatasetBuilder::new(&settings_in(&dir, &ratings), None)
            .build(false)
            .unwrap();

        // 10 records → 7 copies in train, all writing cell [1, 2]
        assert_eq!(set.utility.dim(), (2, 3));
        assert_eq!(set.utility[[1, 2]], 4.0);
    }
}
