//! CSV report writer.

use crate::zone::analyzer::Report;
use crate::zone::inspect;

const CSV_HEADER: &str = "Name,TTL,Type,Value,Purpose,Security Status,Analysis";

/// Serialize the report's records as a CSV document: one row per record,
/// every field double-quoted with embedded quotes doubled.
///
/// The Security Status column is the record's findings joined with `"; "`,
/// or `Safe` when there are none.
pub fn to_csv(report: &Report) -> String {
    let mut rows = vec![CSV_HEADER.to_string()];

    for record in &report.records {
        let security_status = if record.findings.is_empty() {
            "Safe".to_string()
        } else {
            record.findings.join("; ")
        };

        let columns = [
            record.name.clone(),
            record.ttl.to_string(),
            record.rtype.clone(),
            record.value.clone(),
            inspect::purpose_of(&record.rtype, &record.name, &record.value),
            security_status,
            inspect::detailed_analysis(record),
        ];

        let row = columns
            .iter()
            .map(|column| quote(column))
            .collect::<Vec<_>>()
            .join(",");
        rows.push(row);
    }

    rows.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
