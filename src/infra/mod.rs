// ============================================================
// Layer 5 — Infrastructure Layer
// ============================================================
// Handles all cross-cutting concerns that don't belong in
// any specific business layer:
//
//   settings.rs — Typed settings loading
//                 Reads the JSON settings file into a struct,
//                 reporting EVERY missing key in one error
//                 instead of failing on the first one.
//
//   store.rs    — Artifact persistence
//                 Saves and loads the four matrix artifacts as
//                 bincode files, staged through temp files so a
//                 failed save never leaves a half-replaced set.
//
//   run_log.rs  — Run result logging
//                 Appends one CSV line per completed run
//                 (operation, rmse, elapsed time, plus the
//                 hyperparameter bundle from the settings).
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//     (e.g. swap file storage for an object store)
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Typed settings file loading and validation
pub mod settings;

/// Saving and loading the four cached artifacts
pub mod store;

/// Appends run results to the CSV run log
pub mod run_log;
