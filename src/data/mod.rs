// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from the raw ratings file
// all the way to the cached matrix artifacts.
//
// The pipeline flows in this order:
//
//   ratings.csv
//       │
//       ▼
//   parser            → reads rows, skips the header,
//       │               rejects anything malformed
//       ▼
//   splitter          → shuffles and cuts 70/15/15
//       │
//       ▼
//   utility           → builds the dense item x user matrix
//       │               from the train partition only
//       ▼
//   builder           → ties it together and talks to the
//                       artifact store (Layer 5 - infra)
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Parses the comma separated ratings file into Rating records
pub mod parser;

/// Shuffles and splits records into train/test/validation
pub mod splitter;

/// Builds the dense utility matrix from the train partition
pub mod utility;

/// Orchestrates parse → split → matrix → cache
pub mod builder;
