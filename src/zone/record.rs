//! Zone record value type.

use serde::{Deserialize, Serialize};

use crate::zone::rules;

/// One parsed zone file entry.
///
/// `category` and `findings` are derived from the raw fields exactly once,
/// at construction. A record is never mutated after that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Owner name; may contain a `*` wildcard, or be `@`/empty for the apex
    pub name: String,
    /// Cache lifetime in seconds; any parsed integer, including negative
    pub ttl: i64,
    /// Record class, e.g. `IN`; not semantically validated
    pub class: String,
    /// Record type token, preserved verbatim; unknown types are kept
    #[serde(rename = "type")]
    pub rtype: String,
    /// Record data, whitespace-joined
    pub value: String,
    /// Derived role label, first matching category rule
    pub category: String,
    /// Derived findings, in rule table order
    pub findings: Vec<String>,
}

impl ZoneRecord {
    /// Build a record and classify it against the rule tables.
    pub fn new(name: String, ttl: i64, class: String, rtype: String, value: String) -> ZoneRecord {
        let category = rules::categorize(&rtype, &name, &value);
        let findings = rules::record_findings(&name, ttl, &rtype, &value);

        ZoneRecord {
            name,
            ttl,
            class,
            rtype,
            value,
            category,
            findings,
        }
    }

    /// True if the record carries the given finding label.
    pub fn has_finding(&self, label: &str) -> bool {
        self.findings.iter().any(|f| f == label)
    }
}
