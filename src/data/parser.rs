// ============================================================
// Layer 4 — Ratings Parser
// ============================================================
// Reads the raw ratings file into a Vec<Rating>.
//
// Input format (MovieLens style):
//   userId,movieId,rating,timestamp     ← header, skipped
//   1,31,2.5,1260759144
//   1,1029,3.0,1260759179
//   ...
//
// Parsing is all-or-nothing: one malformed row fails the whole
// file. A half-parsed ratings set would silently shrink the
// train/test/validation split, which is far worse than a loud
// error, so there is no skip-and-continue here (unlike a
// document corpus where one bad file can be dropped).
//
// Errors are a typed enum so the caller can tell "the file is
// missing" apart from "row 812 is garbage" without string
// matching.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading Files)

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::rating::Rating;

/// Everything that can go wrong while reading the ratings file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file could not be opened or read at all
    #[error("cannot read ratings file '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data row did not have exactly 4 comma separated fields
    #[error("ratings file '{}' line {line}: expected 4 fields, found {found}", .path.display())]
    WrongFieldCount {
        path: PathBuf,
        line: usize,
        found: usize,
    },

    /// A field could not be parsed as the expected numeric type
    #[error("ratings file '{}' line {line}: field '{field}' has non-numeric value '{value}'", .path.display())]
    BadField {
        path: PathBuf,
        line: usize,
        field: &'static str,
        value: String,
    },

    /// user_id and item_id are 1-based; 0 would underflow the
    /// matrix index
    #[error("ratings file '{}' line {line}: {field} must be >= 1, found 0", .path.display())]
    ZeroId {
        path: PathBuf,
        line: usize,
        field: &'static str,
    },
}

/// Parse the whole ratings file, skipping the header line.
///
/// Returns the records in file order — shuffling is the
/// splitter's job, not the parser's.
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();

    // enumerate() is 0-based; line numbers reported to the user
    // are 1-based, and line 1 is the header
    for (index, line) in content.lines().enumerate().skip(1) {
        let line_number = index + 1;

        // Tolerate trailing blank lines (a final newline is common)
        if line.trim().is_empty() {
            continue;
        }

        records.push(parse_row(path, line_number, line)?);
    }

    tracing::debug!("Parsed {} rating records from '{}'", records.len(), path.display());
    Ok(records)
}

/// Parse one data row into a Rating.
fn parse_row(path: &Path, line_number: usize, line: &str) -> Result<Rating, ParseError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    if fields.len() != 4 {
        return Err(ParseError::WrongFieldCount {
            path: path.to_path_buf(),
            line: line_number,
            found: fields.len(),
        });
    }

    let user_id = parse_field::<u32>(path, line_number, "user_id", fields[0])?;
    let item_id = parse_field::<u32>(path, line_number, "item_id", fields[1])?;
    let rating = parse_field::<f64>(path, line_number, "rating", fields[2])?;
    let timestamp = parse_field::<i64>(path, line_number, "timestamp", fields[3])?;

    // Ids are 1-based in the input; a 0 here would wrap around
    // when the utility matrix subtracts 1 for indexing
    if user_id == 0 {
        return Err(ParseError::ZeroId { path: path.to_path_buf(), line: line_number, field: "user_id" });
    }
    if item_id == 0 {
        return Err(ParseError::ZeroId { path: path.to_path_buf(), line: line_number, field: "item_id" });
    }

    Ok(Rating::new(user_id, item_id, rating, timestamp))
}

/// Parse one field, mapping the std parse error into our typed
/// ParseError with file/line/field context attached.
fn parse_field<T: std::str::FromStr>(
    path: &Path,
    line: usize,
    field: &'static str,
    value: &str,
) -> Result<T, ParseError> {
    value.parse::<T>().map_err(|_| ParseError::BadField {
        path: path.to_path_buf(),
        line,
        field,
        value: value.to_string(),
    })
}
