// ============================================================
// Layer 4 — Train/Test/Validation Splitter
// ============================================================
// Randomly shuffles records and splits them into three sets:
//   - Training set:   70% — builds the utility matrix and
//                           trains the recommender
//   - Test set:       15% — measures final performance
//   - Validation set: 15% — tunes hyperparameters
//
// Why shuffle before splitting?
//   Ratings files are usually sorted by user. Without a
//   shuffle, the test set would only contain the last users
//   in the file. Shuffling gives every set a representative
//   mix of users and movies.
//
// The shuffle is deliberately unseeded — every build produces
// a fresh random split, and reproducibility across runs is not
// a goal of this pipeline.
//
// Cut points are computed as two independent truncations of
// 0.70*N and 0.85*N. Because the three slices are contiguous
// and share those two cut points, every record lands in exactly
// one set regardless of how the truncation rounds.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom
// which is the standard unbiased shuffle algorithm.
//
// Reference: Rust Book §8 (Vectors)
//            rand crate documentation

use rand::seq::SliceRandom;

/// Fraction of records that goes into the training set
const TRAIN_FRACTION: f64 = 0.70;

/// Fraction below which records go to train + test; the
/// remainder above this point is the validation set
const TEST_UPPER_FRACTION: f64 = 0.85;

/// Randomly shuffle `records` and split into (train, test, validation).
///
/// Generic over the record type so the split logic can be
/// tested with plain integers.
///
/// # Returns
/// Three contiguous, non-overlapping slices of the shuffled
/// sequence whose lengths sum to the input length.
pub fn shuffle_and_split<T>(mut records: Vec<T>) -> (Vec<T>, Vec<T>, Vec<T>) {
    // thread_rng() gives a fast, freshly seeded RNG per thread
    let mut rng = rand::thread_rng();

    // Fisher-Yates shuffle — every permutation is equally likely
    records.shuffle(&mut rng);

    let total = records.len();
    let train_cut = ((total as f64) * TRAIN_FRACTION) as usize;
    let test_cut = ((total as f64) * TEST_UPPER_FRACTION) as usize;

    // split_off(n) removes elements [n..] and returns them, so
    // we peel from the back: validation first, then test.
    let validation = records.split_off(test_cut);
    let test = records.split_off(train_cut);

    tracing::debug!(
        "Dataset split: {} train, {} test, {} validation (of {})",
        records.len(),
        test.len(),
        validation.len(),
        total,
    );

    (records, test, validation)
}
