//! Zone File Analysis
//!
//! This module turns raw zone file text into a security report in two steps:
//!
//! * `parser` - tokenizes text into an ordered record sequence, collecting
//!   per-line errors without aborting the file
//! * `analyzer` - runs independent detection passes over the parsed records
//!   and assembles a single `Report`
//!
//! The remaining modules support those two: `record` holds the immutable
//! record value type, `rules` the classification rule tables, `inspect` the
//! presentation-side assessment helpers, `export` the CSV report writer, and
//! `telemetry` the decoupled event emission.

/// Aggregate detection passes and report assembly
pub mod analyzer;

/// CSV report writer
pub mod export;

/// Per-record purpose, security status, and analysis text
pub mod inspect;

/// Zone file line parser
pub mod parser;

/// Parsed zone record value type
pub mod record;

/// Category and finding rule tables
pub mod rules;

/// Analysis lifecycle event emission
pub mod telemetry;
