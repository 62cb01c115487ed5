//! Local keyword-to-password store.
//!
//! Generates random passwords and keeps keyword → (secret, last-updated)
//! entries in a single JSON file on disk. Single user, single process,
//! plaintext storage.
//!
//! ## Modules
//! - `cli` — Command-line handlers and the interactive menu
//! - `core` — Store, path resolution, settings loading
//! - `models` — Data structures
//! - `util` — Password generation and timestamp formatting

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod util;
