//! Example of analyzing a zone file and working with the report.
//!
//! Run with: cargo run --example zone_report

use std::time::Instant;

use zonelint::zone::analyzer;
use zonelint::zone::export;
use zonelint::zone::inspect;
use zonelint::zone::telemetry::{self, TracingSink};

fn main() {
    println!("Zone Report Example");
    println!("===================\n");

    // Example zone file content
    let zone_content = r#"
; Example DNS zone snapshot
@ 3600 IN MX 0 aspmx.l.google.com.
@ 3600 IN MX 10 alt1.aspmx.l.google.com.
www 3600 IN A 93.184.216.34
*.dev 3600 IN A 192.0.2.100
qa-portal 100 IN A 10.20.30.40
app 666 IN CNAME app-lb.us-east-1.elb.amazonaws.com.
cdn 3600 IN CNAME d1234.cloudfront.net.
@ 3600 IN TXT "v=spf1 include:_spf.google.com ~all"
_dmarc 3600 IN TXT "v=DMARC1; p=quarantine"
mail._domainkey 3600 IN TXT "v=DKIM1; k=rsa; p=MIGf"
@ 86400 IN NS ns1.provider.net.
this line will not parse
"#;

    let started = Instant::now();
    let report = analyzer::analyze(zone_content);
    let duration = started.elapsed();

    println!("Parsed {} records, {} parse errors", report.records.len(), report.parse_errors.len());
    for error in &report.parse_errors {
        println!("  ⚠ {}", error);
    }

    println!("\nPer-record classification");
    println!("-------------------------");
    for record in &report.records {
        let status = inspect::security_status_of(record);
        let flag = if status.is_safe() {
            "safe".to_string()
        } else {
            format!("risk: {}", status.severity)
        };
        println!("  {:<18} {:<6} {:<18} [{}]", record.name, record.rtype, record.category, flag);
        for finding in &record.findings {
            println!("      - {}", finding);
        }
    }

    println!("\nAggregate results");
    println!("-----------------");
    println!("  Security issues:  {:?}", report.security_issues);
    println!("  Environments:     {:?}", report.environments);
    println!("  Cloud services:   {:?}", report.cloud_services);
    println!("  Unusual TTLs:     {:?}", report.unusual_ttls);
    println!(
        "  Email posture:    SPF={} DKIM={} DMARC={} (score {}/100)",
        report.email_config.has_spf,
        report.email_config.has_dkim,
        report.email_config.has_dmarc,
        inspect::email_security_score(&report.email_config)
    );
    println!("  Recommendations:");
    for recommendation in &report.recommendations {
        println!("    - {}", recommendation);
    }

    println!("\nCSV export");
    println!("----------");
    let csv = export::to_csv(&report);
    for line in csv.lines().take(4) {
        println!("  {}", line);
    }
    println!("  ... {} rows total", csv.lines().count());

    // Telemetry is decoupled: events are derived from the finished report.
    tracing_subscriber::fmt().init();
    telemetry::emit_report_events(&TracingSink, &report, duration);

    println!("\n✓ Zone report example completed");
}
