// ============================================================
// Layer 3 — Rating Domain Type
// ============================================================
// Represents one row of the ratings file in domain terms:
// one user gave one movie one rating at one point in time.
//
// The ids are 1-based, exactly as they appear in the MovieLens
// style input file. All index arithmetic (subtracting 1 to get
// a matrix position) happens where the utility matrix is built,
// never here.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// One parsed row of the ratings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// 1-based id of the user who rated
    pub user_id: u32,

    /// 1-based id of the rated movie
    pub item_id: u32,

    /// The rating value itself (e.g. 0.5..=5.0 on MovieLens)
    pub rating: f64,

    /// Unix timestamp of the rating, carried along but unused
    /// by the matrix construction
    pub timestamp: i64,
}

impl Rating {
    /// Create a new Rating
    pub fn new(user_id: u32, item_id: u32, rating: f64, timestamp: i64) -> Self {
        Self { user_id, item_id, rating, timestamp }
    }

    /// The record as one numeric row, in input-file column order.
    /// This is the on-disk layout of the train/test/validation
    /// artifacts: one row per record, four columns.
    pub fn as_row(&self) -> [f64; 4] {
        [
            self.user_id as f64,
            self.item_id as f64,
            self.rating,
            self.timestamp as f64,
        ]
    }

    /// Rebuild a Rating from a stored numeric row.
    /// Inverse of as_row — ids and timestamps are whole numbers
    /// so the float round-trip is exact for any realistic id.
    pub fn from_row(row: &[f64]) -> Self {
        Self {
            user_id:   row[0] as u32,
            item_id:   row[1] as u32,
            rating:    row[2],
            timestamp: row[3] as i64,
        }
    }
}

// ─── Extents ─────────────────────────────────────────────────────────────────
// The maxima observed across the WHOLE parsed record set.
// The utility matrix must be sized from these, not from the
// train partition alone — a user who only appears in the test
// set still needs a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingExtents {
    /// Highest user id seen anywhere in the input
    pub max_user_id: u32,

    /// Highest movie id seen anywhere in the input
    pub max_item_id: u32,

    /// Latest timestamp seen; tracked for completeness but
    /// nothing downstream reads it yet
    pub max_timestamp: i64,
}

impl RatingExtents {
    /// Scan all records once and record the maxima.
    /// An empty input yields all-zero extents, which later
    /// produces an empty (0 x 0) utility matrix.
    pub fn scan(records: &[Rating]) -> Self {
        let mut extents = Self { max_user_id: 0, max_item_id: 0, max_timestamp: 0 };
        for r in records {
            extents.max_user_id   = extents.max_user_id.max(r.user_id);
            extents.max_item_id   = extents.max_item_id.max(r.item_id);
            extents.max_timestamp = extents.max_timestamp.max(r.timestamp);
        }
        extents
    }
}
