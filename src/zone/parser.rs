//! Zone file line parser.
//!
//! Deliberately line-oriented: one record per line, fields separated by runs
//! of whitespace, `;` comments and blank lines skipped. Directives,
//! multi-line records, and escapes are out of scope. A structurally invalid
//! line is recorded as an error and never aborts the rest of the file.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::zone::record::ZoneRecord;

/// Minimum fields for a record line: `name ttl class type value...`
const MIN_RECORD_FIELDS: usize = 5;

/// Result of parsing a zone file: salvaged records plus per-line errors,
/// both in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub records: Vec<ZoneRecord>,
    pub errors: Vec<String>,
}

/// Parse zone file text into records, collecting one error per invalid line.
///
/// Line numbers in errors are 1-based and count comment and blank lines. A
/// TTL token that does not parse as an integer invalidates the whole line,
/// the same way a short line does.
pub fn parse(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    for (idx, line) in text.lines().enumerate() {
        let line_number = idx + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() < MIN_RECORD_FIELDS {
            outcome
                .errors
                .push(format!("Line {}: Invalid record format", line_number));
            continue;
        }

        let ttl = match fields[1].parse::<i64>() {
            Ok(ttl) => ttl,
            Err(_) => {
                outcome.errors.push(format!(
                    "Line {}: Invalid TTL value: {}",
                    line_number, fields[1]
                ));
                continue;
            }
        };

        outcome.records.push(ZoneRecord::new(
            fields[0].to_string(),
            ttl,
            fields[2].to_string(),
            fields[3].to_string(),
            fields[4..].join(" "),
        ));
    }

    debug!(
        records = outcome.records.len(),
        errors = outcome.errors.len(),
        "zone file parsed"
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_record_line() {
        let outcome = parse("www 3600 IN A 93.184.216.34");

        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.records.len(), 1);

        let record = &outcome.records[0];
        assert_eq!(record.name, "www");
        assert_eq!(record.ttl, 3600);
        assert_eq!(record.class, "IN");
        assert_eq!(record.rtype, "A");
        assert_eq!(record.value, "93.184.216.34");
    }

    #[test]
    fn test_value_is_whitespace_joined() {
        let outcome = parse("@ 3600 IN TXT \"v=spf1   include:_spf.example.com    ~all\"");

        assert_eq!(
            outcome.records[0].value,
            "\"v=spf1 include:_spf.example.com ~all\""
        );
    }

    #[test]
    fn test_comments_and_blanks_are_skipped_but_counted() {
        let text = "; zone for example.com\n\nwww 3600 IN A 93.184.216.34\n   ; indented comment\nshort line\n";
        let outcome = parse(text);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.errors, vec!["Line 5: Invalid record format"]);
    }

    #[test]
    fn test_short_line_is_an_error() {
        let outcome = parse("www 3600 IN A");

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.errors, vec!["Line 1: Invalid record format"]);
    }

    #[test]
    fn test_invalid_ttl_is_an_error() {
        let outcome = parse("www 1h IN A 93.184.216.34");

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.errors, vec!["Line 1: Invalid TTL value: 1h"]);
    }

    #[test]
    fn test_negative_ttl_parses() {
        let outcome = parse("www -1 IN A 93.184.216.34");

        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.records[0].ttl, -1);
    }

    #[test]
    fn test_bad_line_never_aborts_the_file() {
        let text = "good 3600 IN A 203.0.113.1\nbad line\nalso-good 3600 IN A 203.0.113.2";
        let outcome = parse(text);

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].name, "good");
        assert_eq!(outcome.records[1].name, "also-good");
        assert_eq!(outcome.errors, vec!["Line 2: Invalid record format"]);
    }

    #[test]
    fn test_input_order_is_preserved() {
        let text = "a 300 IN A 203.0.113.1\nb 300 IN A 203.0.113.2\nc 300 IN A 203.0.113.3";
        let outcome = parse(text);

        let names: Vec<&str> = outcome.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let outcome = parse("@ 3600 IN SPF \"v=spf1 ~all\"");

        assert_eq!(outcome.records[0].rtype, "SPF");
        assert_eq!(outcome.records[0].category, "SPF");
    }

    #[test]
    fn test_empty_input() {
        let outcome = parse("");

        assert!(outcome.records.is_empty());
        assert!(outcome.errors.is_empty());
    }
}
