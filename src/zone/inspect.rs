//! Presentation-side record assessment.
//!
//! Pure helpers backing the report's Purpose, Security Status, and Analysis
//! columns, plus the severity and scoring classifiers used by telemetry.
//! None of this feeds back into the `Report` itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::zone::analyzer::EmailConfig;
use crate::zone::record::ZoneRecord;
use crate::zone::rules;

/// Triage severity for a record or issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Security triage for a single record. An empty issue list means safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityStatus {
    pub severity: Severity,
    pub issues: Vec<String>,
}

impl SecurityStatus {
    pub fn is_safe(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Describe what a record is for, refined by well-known providers and
/// email-authentication markers.
pub fn purpose_of(rtype: &str, name: &str, value: &str) -> String {
    match rtype {
        "A" => "Maps domain name to IPv4 address - Used for direct host addressing".to_string(),
        "AAAA" => "Maps domain name to IPv6 address - Used for next-gen IP addressing".to_string(),
        "MX" => {
            if value.contains("google") {
                "Google Workspace email handling".to_string()
            } else if value.contains("amazonses") {
                "Amazon SES email handling".to_string()
            } else {
                "Mail server configuration - Handles email routing".to_string()
            }
        }
        "CNAME" => {
            if value.contains("amazonaws") {
                "AWS service alias".to_string()
            } else if value.contains("azure") {
                "Azure service alias".to_string()
            } else if value.contains("google") {
                "Google service alias".to_string()
            } else {
                "Domain alias - Points to another domain name".to_string()
            }
        }
        "TXT" => {
            if value.contains("v=spf1") {
                "SPF Record - Email sender policy".to_string()
            } else if name == "_dmarc" {
                "DMARC Policy - Email authentication".to_string()
            } else if name.contains("_domainkey") {
                "DKIM - Email signing configuration".to_string()
            } else {
                "Text record - Domain verification or policy".to_string()
            }
        }
        "NS" => "Nameserver - Controls DNS resolution chain".to_string(),
        "SOA" => "Start of Authority - Primary DNS zone info".to_string(),
        _ => format!("{} record - Basic DNS configuration", rtype),
    }
}

/// Triage one record. Severity only ever escalates: a later medium hit never
/// downgrades an earlier high one.
pub fn security_status_of(record: &ZoneRecord) -> SecurityStatus {
    let mut issues = Vec::new();
    let mut severity = Severity::Low;

    if record.name.contains('*') {
        issues.push("Wildcard record poses security risk".to_string());
        severity = Severity::High;
    }
    if record.ttl < 300 {
        issues.push("Very low TTL may indicate DNS hijacking".to_string());
        severity = severity.max(Severity::Medium);
    }
    if record.rtype == "A" && rules::is_private_address(&record.value) {
        issues.push("Internal IP exposed".to_string());
        severity = Severity::High;
    }
    if record.name.contains("dev") || record.name.contains("staging") {
        issues.push("Non-production environment exposed".to_string());
        severity = severity.max(Severity::Medium);
    }

    SecurityStatus { severity, issues }
}

/// Prose analysis of a single record for the report's Analysis column.
pub fn detailed_analysis(record: &ZoneRecord) -> String {
    let mut analysis = String::new();

    if record.rtype == "A" || record.rtype == "AAAA" {
        analysis = format!("This record points {} to {}. ", record.name, record.value);
        if record.name == "@" || record.name.is_empty() {
            analysis.push_str("This is the main domain IP address. ");
        }
    }

    if record.rtype == "MX" {
        let mut parts = record.value.split_whitespace();
        let priority = parts.next().unwrap_or("");
        let server = parts.next().unwrap_or("");
        analysis = format!("Email server priority {} pointing to {}. ", priority, server);
        if priority == "10" {
            analysis.push_str("This is likely the primary mail server. ");
        }
    }

    if record.rtype == "CNAME" {
        analysis = format!("Alias record pointing to {}. ", record.value);
        if record.value.contains("amazonaws") {
            analysis.push_str("This is an AWS service integration. ");
        } else if record.value.contains("azure") {
            analysis.push_str("This is an Azure service integration. ");
        }
    }

    if record.rtype == "TXT" {
        if record.value.contains("v=spf1") {
            analysis = "SPF record defining authorized email senders. ".to_string();
            if record.value.contains("-all") {
                analysis.push_str("Strict SPF policy enforced. ");
            } else if record.value.contains("~all") {
                analysis.push_str("Soft SPF policy (recommended). ");
            }
        }
        if record.name == "_dmarc" {
            analysis = "DMARC policy for email authentication. ".to_string();
            if record.value.contains("p=reject") {
                analysis.push_str("Strict rejection policy for failed authentication. ");
            }
        }
    }

    if record.ttl < 300 {
        analysis.push_str("Warning: Very low TTL value. ");
    } else if record.ttl > 86400 {
        analysis.push_str("Note: High TTL value may slow down DNS changes. ");
    }

    analysis.trim().to_string()
}

/// Classify an aggregate security issue string for telemetry.
pub fn severity_of_issue(issue: &str) -> Severity {
    if issue.contains("exposed") || issue.contains("risk") {
        Severity::High
    } else if issue.contains("unusual") || issue.contains("misconfigured") {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Email posture score, 0-100. SPF, DKIM, and DMARC each contribute roughly
/// a third.
pub fn email_security_score(config: &EmailConfig) -> u8 {
    let mut score = 0.0f64;
    if config.has_spf {
        score += 33.33;
    }
    if config.has_dkim {
        score += 33.33;
    }
    if config.has_dmarc {
        score += 33.34;
    }
    score.round() as u8
}
