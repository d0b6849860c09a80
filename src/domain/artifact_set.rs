// ============================================================
// Layer 3 — ArtifactSet Domain Type
// ============================================================
// The four outputs of one dataset build, kept together on
// purpose: the cache either holds ALL four or the build starts
// over. Returning them as one struct (instead of a 4-tuple)
// makes that all-or-nothing rule visible in the type.
//
// The utility matrix is indexed [item_id - 1, user_id - 1]:
// rows are movies, columns are users. Cells with no observed
// training rating hold f64::NAN.

use ndarray::Array2;

use crate::domain::rating::Rating;

/// The complete result of one dataset build.
#[derive(Debug, Clone)]
pub struct ArtifactSet {
    /// ~70% of the shuffled records; the only partition the
    /// utility matrix is built from
    pub train: Vec<Rating>,

    /// ~15% of the shuffled records, held out for evaluation
    pub test: Vec<Rating>,

    /// ~15% of the shuffled records, held out for tuning
    pub validation: Vec<Rating>,

    /// Dense (max_item_id x max_user_id) matrix of training
    /// ratings; NAN marks a missing cell
    pub utility: Array2<f64>,
}

impl ArtifactSet {
    /// Total number of records across the three partitions.
    /// Must equal the input record count — the split never
    /// drops or duplicates a record.
    pub fn record_count(&self) -> usize {
        self.train.len() + self.test.len() + self.validation.len()
    }

    /// Number of utility matrix cells holding an observed
    /// rating (i.e. not the NAN sentinel).
    pub fn observed_cells(&self) -> usize {
        self.utility.iter().filter(|v| !v.is_nan()).count()
    }
}
