//! Service layer containing the governance engine and its I/O helpers.
//!
//! ## Service map
//! - `engine.rs` — master protocol: score accumulation, channel rule table, batch map.
//! - `detectors.rs` — custodian, legal dispute, land class and mutation chain checks.
//! - `identity.rs` — offline farmer ID and honorific-aware name similarity.
//! - `policy.rs` — penalty/threshold tables and TOML policy loading.
//! - `ingest.rs` — CSV loading with metadata-row header detection.
//! - `export.rs` — registry CSV writer.
//! - `sample.rs` — demonstration registry fixture.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - `engine`, `detectors` and `identity` are pure: no I/O, no shared state.
//! - Side effects (files, stdout) stay in `ingest`, `export`, `output`.
//! - Keep command handlers thin; delegate to services.

pub mod detectors;
pub mod engine;
pub mod export;
pub mod identity;
pub mod ingest;
pub mod output;
pub mod policy;
pub mod sample;
