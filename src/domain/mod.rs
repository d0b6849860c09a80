// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// This is the heart of the application — plain Rust structs
// that define the core concepts of the system.
//
// Rules for this layer:
//   - NO file I/O or parsing code here
//   - NO randomness here
//   - Only the data types and the pure computations on them
//
// Why keep this layer pure?
//   - Easy to unit test (no temp directories needed)
//   - Easy to understand (no framework noise)
//   - The data/infra layers move these types around,
//     but the meaning of a Rating lives here
//
// Reference: Rust Book §5 (Structs)

// One (user, movie, rating, timestamp) record
pub mod rating;

// The four artifacts produced by a build, treated as one unit
pub mod artifact_set;
