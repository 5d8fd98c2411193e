//! Aggregate detection passes and report assembly.
//!
//! Each pass is a pure function over the parsed record slice; no pass reads
//! another pass's output, and all of them are total over an arbitrary
//! (possibly empty) record sequence. `analyze` composes the parser with
//! every pass and hands back a single `Report`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::zone::parser::{self, ParseOutcome};
use crate::zone::record::ZoneRecord;

/// Service mapping entries are capped for display.
const SERVICE_MAPPING_LIMIT: usize = 10;

/// Cloud providers recognized in record values, in detection order.
const CLOUD_PROVIDERS: &[(&str, &str)] = &[
    ("amazonaws.com", "Amazon AWS"),
    ("cloudfront.net", "Amazon CloudFront"),
    ("azure.com", "Microsoft Azure"),
    ("googleusercontent.com", "Google Cloud"),
];

/// Environment markers recognized in record names, in detection order.
const ENVIRONMENT_MARKERS: &[(&[&str], &str)] = &[
    (&["prod"], "Production"),
    (&["dev"], "Development"),
    (&["stage", "staging"], "Staging"),
    (&["qa"], "QA"),
    (&["test"], "Testing"),
];

/// Email authentication posture plus the raw MX values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailConfig {
    pub has_spf: bool,
    pub has_dkim: bool,
    pub has_dmarc: bool,
    pub mx_records: Vec<String>,
}

/// One CNAME target in the service map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceMapping {
    pub name: String,
    #[serde(rename = "type")]
    pub rtype: String,
    pub target: String,
}

/// Aggregate analysis result. Every field is computed directly from the
/// parsed records; none depends on another field's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub records: Vec<ZoneRecord>,
    pub parse_errors: Vec<String>,
    pub record_counts: HashMap<String, usize>,
    pub cloud_services: Vec<String>,
    pub security_issues: Vec<String>,
    pub environments: Vec<String>,
    pub recommendations: Vec<String>,
    pub email_config: EmailConfig,
    pub unusual_ttls: Vec<String>,
    pub service_mapping: Vec<ServiceMapping>,
}

/// Parse zone file text and run every detection pass over the result.
pub fn analyze(text: &str) -> Report {
    let ParseOutcome { records, errors } = parser::parse(text);

    let report = Report {
        record_counts: count_record_types(&records),
        cloud_services: detect_cloud_services(&records),
        security_issues: detect_security_issues(&records),
        environments: detect_environments(&records),
        recommendations: generate_recommendations(&records),
        email_config: analyze_email_config(&records),
        unusual_ttls: detect_unusual_ttls(&records),
        service_mapping: map_services(&records),
        parse_errors: errors,
        records,
    };

    info!(
        records = report.records.len(),
        parse_errors = report.parse_errors.len(),
        security_issues = report.security_issues.len(),
        "zone analysis complete"
    );

    report
}

/// Occurrence count per record type token.
pub fn count_record_types(records: &[ZoneRecord]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.rtype.clone()).or_insert(0) += 1;
    }
    counts
}

/// Cloud providers referenced anywhere in record values, first-seen order.
pub fn detect_cloud_services(records: &[ZoneRecord]) -> Vec<String> {
    let mut services = Vec::new();
    for record in records {
        for (needle, provider) in CLOUD_PROVIDERS {
            if record.value.contains(needle) {
                push_unique(&mut services, provider);
            }
        }
    }
    services
}

/// Zone-wide security issues. Each check contributes at most one entry no
/// matter how many records match it.
pub fn detect_security_issues(records: &[ZoneRecord]) -> Vec<String> {
    let mut issues = Vec::new();

    if records.iter().any(|r| r.name.contains('*')) {
        issues.push("Wildcard DNS entries detected - potential security risk".to_string());
    }

    if records.iter().any(|r| r.value.contains("internal")) {
        issues.push("Internal service endpoints exposed in public DNS".to_string());
    }

    if records
        .iter()
        .any(|r| r.name.contains("dev") || r.name.contains("test"))
    {
        issues.push("Development/Test environments detected in production DNS".to_string());
    }

    issues
}

/// Deployment environments leaked through record names, first-seen order.
pub fn detect_environments(records: &[ZoneRecord]) -> Vec<String> {
    let mut environments = Vec::new();
    for record in records {
        for (markers, label) in ENVIRONMENT_MARKERS {
            if markers.iter().any(|m| record.name.contains(m)) {
                push_unique(&mut environments, label);
            }
        }
    }
    environments
}

/// SPF/DKIM/DMARC presence and the MX host list.
///
/// DMARC requires the exact name `_dmarc`; SPF and DKIM are substring checks.
pub fn analyze_email_config(records: &[ZoneRecord]) -> EmailConfig {
    EmailConfig {
        has_spf: records.iter().any(|r| r.value.contains("v=spf1")),
        has_dkim: records.iter().any(|r| r.name.contains("_domainkey")),
        has_dmarc: records.iter().any(|r| r.name == "_dmarc"),
        mx_records: records
            .iter()
            .filter(|r| r.rtype == "MX" && !r.value.is_empty())
            .map(|r| r.value.clone())
            .collect(),
    }
}

/// Per-record TTL anomaly messages. A single record can contribute both the
/// 666 message and the very-low message (666 itself is not below 300).
pub fn detect_unusual_ttls(records: &[ZoneRecord]) -> Vec<String> {
    let mut messages = Vec::new();
    for record in records {
        if record.ttl == 666 {
            messages.push(format!("Unusual TTL value (666) found for {}", record.name));
        }
        if record.ttl < 300 {
            messages.push(format!(
                "Very low TTL value ({}) found for {}",
                record.ttl, record.name
            ));
        }
    }
    messages
}

/// The first ten CNAME records with a non-empty target, in input order.
pub fn map_services(records: &[ZoneRecord]) -> Vec<ServiceMapping> {
    records
        .iter()
        .filter(|r| r.rtype == "CNAME" && !r.value.is_empty())
        .take(SERVICE_MAPPING_LIMIT)
        .map(|r| ServiceMapping {
            name: r.name.clone(),
            rtype: "CNAME".to_string(),
            target: r.value.clone(),
        })
        .collect()
}

/// Three standing recommendations plus two conditional ones.
pub fn generate_recommendations(records: &[ZoneRecord]) -> Vec<String> {
    let mut recommendations = vec![
        "Implement DNSSEC for enhanced security".to_string(),
        "Use CAA records to restrict certificate authorities".to_string(),
        "Regular audit of DNS TTL values".to_string(),
    ];

    if !records.iter().any(|r| r.name == "_dmarc") {
        recommendations.push("Add DMARC record for improved email security".to_string());
    }

    if records.iter().any(|r| r.ttl == 666) {
        recommendations.push("Standardize TTL values across records".to_string());
    }

    recommendations
}

fn push_unique(list: &mut Vec<String>, label: &str) {
    if !list.iter().any(|existing| existing == label) {
        list.push(label.to_string());
    }
}
