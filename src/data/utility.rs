// ============================================================
// Layer 4 — Utility Matrix Construction
// ============================================================
// Builds the dense item x user matrix the recommender trains
// on. Rows are movies, columns are users, and a cell holds the
// rating user `col+1` gave movie `row+1` in the TRAIN partition
// (test and validation ratings are never written in — that
// would leak held-out data into training).
//
// Missing cells hold f64::NAN rather than 0.0: a zero would
// look like a real "rated it zero" observation to the matrix
// factorization and drag predictions down, while NAN can be
// masked out.
//
// Note on zero ratings: any cell holding exactly 0.0 after the
// fill pass is reclassified as missing, including a cell an
// actual train record set to 0. The rating scale in use starts
// at 0.5 so no real rating is lost; if the scale ever grows a
// legitimate 0, this pass needs a separate "written" mask.
//
// Reference: rand/ndarray crate documentation

use ndarray::Array2;

use crate::domain::rating::{Rating, RatingExtents};

/// Build the dense utility matrix from the train partition.
///
/// Shape is (max_item_id, max_user_id) taken from the extents
/// of the WHOLE input — users or movies that only occur in the
/// held-out sets still get their row/column, so downstream
/// evaluation can index them.
///
/// Duplicate (user, movie) pairs in train are resolved by last
/// write wins; there is no averaging.
pub fn build_utility_matrix(train: &[Rating], extents: &RatingExtents) -> Array2<f64> {
    let shape = (extents.max_item_id as usize, extents.max_user_id as usize);

    // Start every cell at the missing sentinel, then overwrite
    // the observed ones — this resolves every cell explicitly
    // to either "observed rating" or "missing".
    let mut matrix = Array2::from_elem(shape, f64::NAN);

    for r in train {
        matrix[[(r.item_id - 1) as usize, (r.user_id - 1) as usize]] = r.rating;
    }

    // Full-matrix pass: exact zeros are placeholders, not
    // observations, so they join the missing cells.
    for cell in matrix.iter_mut() {
        if *cell == 0.0 {
            *cell = f64::NAN;
        }
    }

    tracing::debug!(
        "Constructed {}x{} utility matrix from {} train records",
        shape.0,
        shape.1,
        train.len(),
    );

    matrix
}
