//! Zonelint
//!
//! A DNS zone file security auditor. Zonelint parses a textual zone file into
//! typed records and evaluates a fixed set of classification and detection
//! rules over them, producing a structured report: per-record categories and
//! findings, detected cloud service integrations, email authentication
//! posture (SPF/DKIM/DMARC), environment leakage, TTL anomalies, and
//! prioritized recommendations.
//!
//! # Features
//!
//! * Line-oriented zone file parsing with per-line error collection
//! * Rule tables for record categorization and findings
//! * Aggregate detection passes over the parsed record set
//! * CSV report export and JSON serialization of the full report
//! * Decoupled telemetry events derived from a finished report
//!
//! # Architecture
//!
//! All analysis lives in the `zone` module; the `zonelint` binary is a thin
//! terminal front end over it. Data flows one way: text -> records -> report.
//! Every entry point is a pure function of its input.

/// Zone file parsing and rule-based analysis
pub mod zone;
