//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `audit.rs` — audit/validate/sample: file in, registry out.
//! - `tools.rs` — fid/match/classify/policy: single-value probes of the engine.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate scoring to `services/*`; the engine never sees paths or flags.
//! - Keep behavior and output schema stable.

pub mod audit;
pub mod tools;

pub use audit::handle_audit_commands;
pub use tools::handle_tool_commands;
