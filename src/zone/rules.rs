//! Classification rule tables.
//!
//! Both classification steps are expressed as ordered `(predicate, label)`
//! tables rather than branching chains, so each rule can be tested in
//! isolation and the evaluation order is explicit:
//!
//! * `CATEGORY_RULES` - first match wins, falling back to the raw type token
//! * `FINDING_RULES` - every matching rule appends its label independently

use std::net::IpAddr;

use ipnetwork::IpNetwork;
use lazy_static::lazy_static;

/// Borrowed view of a record's raw fields, handed to finding predicates.
#[derive(Clone, Copy)]
pub struct RecordView<'a> {
    pub name: &'a str,
    pub ttl: i64,
    pub rtype: &'a str,
    pub value: &'a str,
}

/// A first-match-wins category rule.
pub struct CategoryRule {
    pub label: &'static str,
    pub applies: fn(rtype: &str, name: &str, value: &str) -> bool,
}

/// An independently evaluated finding rule.
pub struct FindingRule {
    pub label: &'static str,
    pub applies: fn(RecordView<'_>) -> bool,
}

lazy_static! {
    /// Address space treated as internal when it shows up in public records:
    /// the RFC 1918 ranges plus IPv6 unique local addresses.
    static ref PRIVATE_RANGES: Vec<IpNetwork> = vec![
        "10.0.0.0/8".parse().unwrap(),
        "172.16.0.0/12".parse().unwrap(),
        "192.168.0.0/16".parse().unwrap(),
        "fc00::/7".parse().unwrap(),
    ];
}

/// True if `value` parses as an IP address inside a private range.
///
/// Values that are not addresses (e.g. `192.168.0.1.evil.com`) never match.
pub fn is_private_address(value: &str) -> bool {
    value
        .parse::<IpAddr>()
        .map(|ip| PRIVATE_RANGES.iter().any(|net| net.contains(ip)))
        .unwrap_or(false)
}

fn is_host_type(rtype: &str) -> bool {
    rtype == "A" || rtype == "AAAA"
}

fn mx_priority(value: &str) -> Option<i64> {
    value.split_whitespace().next()?.parse().ok()
}

/// Category rules, evaluated in order; the first match names the record.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        label: "Google Workspace",
        applies: |rtype, _, value| rtype == "MX" && value.contains("google"),
    },
    CategoryRule {
        label: "Amazon SES",
        applies: |rtype, _, value| rtype == "MX" && value.contains("amazonses"),
    },
    CategoryRule {
        label: "Email",
        applies: |rtype, _, _| rtype == "MX",
    },
    CategoryRule {
        label: "DMARC",
        applies: |_, name, _| name.contains("_dmarc"),
    },
    CategoryRule {
        label: "DKIM",
        applies: |_, name, _| name.contains("_domainkey"),
    },
    CategoryRule {
        label: "SPF",
        applies: |rtype, _, value| rtype == "TXT" && value.contains("v=spf1"),
    },
    CategoryRule {
        label: "QA Host",
        applies: |rtype, name, _| is_host_type(rtype) && name.contains("qa"),
    },
    CategoryRule {
        label: "Staging Host",
        applies: |rtype, name, _| is_host_type(rtype) && name.contains("staging"),
    },
    CategoryRule {
        label: "Production Host",
        applies: |rtype, name, _| is_host_type(rtype) && name.contains("prod"),
    },
    CategoryRule {
        label: "Host",
        applies: |rtype, _, _| is_host_type(rtype),
    },
    CategoryRule {
        label: "AWS Alias",
        applies: |rtype, _, value| rtype == "CNAME" && value.contains("amazonaws.com"),
    },
    CategoryRule {
        label: "Azure Alias",
        applies: |rtype, _, value| rtype == "CNAME" && value.contains("azure.com"),
    },
    CategoryRule {
        label: "Google Cloud Alias",
        applies: |rtype, _, value| rtype == "CNAME" && value.contains("googleusercontent"),
    },
    CategoryRule {
        label: "Alias",
        applies: |rtype, _, _| rtype == "CNAME",
    },
    CategoryRule {
        label: "Nameserver",
        applies: |rtype, _, _| rtype == "NS",
    },
];

/// Finding rules; a record accumulates every label whose predicate holds.
pub const FINDING_RULES: &[FindingRule] = &[
    FindingRule {
        label: "Very low TTL - Consider increasing",
        applies: |r| r.ttl < 300,
    },
    FindingRule {
        label: "Non-standard TTL value",
        applies: |r| r.ttl == 666,
    },
    FindingRule {
        label: "Unusually high TTL",
        applies: |r| r.ttl > 86400,
    },
    FindingRule {
        label: "Google Workspace",
        applies: |r| r.rtype == "MX" && r.value.contains("google"),
    },
    FindingRule {
        label: "Amazon SES",
        applies: |r| r.rtype == "MX" && r.value.contains("amazonses"),
    },
    FindingRule {
        label: "Primary MX",
        applies: |r| r.rtype == "MX" && mx_priority(r.value) == Some(0),
    },
    FindingRule {
        label: "Wildcard record - Security risk",
        applies: |r| r.name.contains('*'),
    },
    FindingRule {
        label: "SPF Record",
        applies: |r| r.rtype == "TXT" && r.value.contains("v=spf1"),
    },
    FindingRule {
        label: "DMARC Record",
        applies: |r| r.rtype == "TXT" && r.value.contains("v=DMARC1"),
    },
    FindingRule {
        label: "DKIM Record",
        applies: |r| r.name.contains("_domainkey"),
    },
    FindingRule {
        label: "QA Environment",
        applies: |r| r.name.contains("qa"),
    },
    FindingRule {
        label: "Staging Environment",
        applies: |r| r.name.contains("staging"),
    },
    FindingRule {
        label: "Production Environment",
        applies: |r| r.name.contains("prod"),
    },
    FindingRule {
        label: "AWS Service",
        applies: |r| r.value.contains("amazonaws.com"),
    },
    FindingRule {
        label: "Azure Service",
        applies: |r| r.value.contains("azure.com"),
    },
    FindingRule {
        label: "Google Cloud",
        applies: |r| r.value.contains("googleusercontent"),
    },
    FindingRule {
        label: "CloudFront CDN",
        applies: |r| r.value.contains("cloudfront.net"),
    },
    FindingRule {
        label: "Internal IP exposed",
        applies: |r| is_host_type(r.rtype) && is_private_address(r.value),
    },
];

/// Name the record's apparent role. Total: unknown types fall back to the
/// raw type token.
pub fn categorize(rtype: &str, name: &str, value: &str) -> String {
    for rule in CATEGORY_RULES {
        if (rule.applies)(rtype, name, value) {
            return rule.label.to_string();
        }
    }
    rtype.to_string()
}

/// Collect every finding label that applies to the record's raw fields.
pub fn record_findings(name: &str, ttl: i64, rtype: &str, value: &str) -> Vec<String> {
    let view = RecordView {
        name,
        ttl,
        rtype,
        value,
    };

    FINDING_RULES
        .iter()
        .filter(|rule| (rule.applies)(view))
        .map(|rule| rule.label.to_string())
        .collect()
}
