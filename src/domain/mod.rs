//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep record/result/report structs in one place.
//! - Keep the keyword and phrase tables the detectors match against reviewable.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — land record, audit result, channel/category enums, reports.
//! - `constants.rs` — keyword tables, sentinels, column names.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs and exported registries.
//! Keep schema-impacting changes explicit and synchronized with `docs/contracts/*`.

pub mod constants;
pub mod models;
