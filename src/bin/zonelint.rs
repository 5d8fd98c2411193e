//! Zonelint CLI
//!
//! Terminal front end for the zone analysis engine: reads a zone file from a
//! path or stdin, runs the analyzer, and renders the report as tables, JSON,
//! or CSV.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use colored::*;
use comfy_table::Table;
use tracing_subscriber::EnvFilter;

use zonelint::zone::analyzer::{self, Report};
use zonelint::zone::export;
use zonelint::zone::inspect;
use zonelint::zone::telemetry::{self, AnalysisEvent, EventSink, NullSink, TracingSink};

/// Zonelint - DNS zone file security auditor
#[derive(Parser)]
#[command(name = "zonelint")]
#[command(version)]
#[command(about = "Analyze a DNS zone file for security and configuration issues", long_about = None)]
struct Cli {
    /// Zone file to analyze (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Write the rendered report to a file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Maximum accepted zone file size in lines
    #[arg(long, env = "ZONELINT_MAX_LINES", default_value_t = 100_000)]
    max_lines: usize,

    /// Only print parse errors, security issues, and TTL anomalies
    #[arg(long)]
    errors_only: bool,

    /// Enable structured logging and telemetry events on stderr
    #[arg(short, long)]
    verbose: bool,

    /// No color output
    #[arg(long)]
    no_color: bool,
}

#[derive(ValueEnum, Clone, Copy)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(io::stderr)
            .init();
    }

    if let Err(message) = run(&cli) {
        eprintln!("{} {}", "✗".red().bold(), message);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let text = read_input(cli)?;

    // Input size is bounded here, not in the engine.
    let line_count = text.lines().count();
    if line_count > cli.max_lines {
        return Err(format!(
            "zone file has {} lines, limit is {} (raise with --max-lines)",
            line_count, cli.max_lines
        ));
    }

    let started = Instant::now();
    let report = analyzer::analyze(&text);
    let duration = started.elapsed();

    let sink: Box<dyn EventSink> = if cli.verbose {
        Box::new(TracingSink)
    } else {
        Box::new(NullSink)
    };
    telemetry::emit_report_events(sink.as_ref(), &report, duration);

    match cli.format {
        OutputFormat::Table => print_report(&report, cli.errors_only),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("failed to serialize report: {}", e))?;
            write_output(cli, &json)?;
        }
        OutputFormat::Csv => {
            let csv = export::to_csv(&report);
            write_output(cli, &csv)?;
            telemetry::emit_event(
                sink.as_ref(),
                AnalysisEvent::ReportExported {
                    format: "csv".to_string(),
                    record_count: report.records.len(),
                    byte_size: csv.len(),
                },
            );
        }
    }

    Ok(())
}

fn read_input(cli: &Cli) -> Result<String, String> {
    match &cli.file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e)),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("cannot read stdin: {}", e))?;
            Ok(text)
        }
    }
}

fn write_output(cli: &Cli, rendered: &str) -> Result<(), String> {
    match &cli.output {
        Some(path) => {
            fs::write(path, rendered)
                .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
            println!(
                "{} report written to {}",
                "✓".green().bold(),
                path.display()
            );
            Ok(())
        }
        None => {
            println!("{}", rendered);
            Ok(())
        }
    }
}

fn print_report(report: &Report, errors_only: bool) {
    print_parse_errors(report);
    print_security(report);
    print_unusual_ttls(report);

    if errors_only {
        return;
    }

    print_overview(report);
    print_records(report);
    print_email(report);
    print_cloud(report);
    print_recommendations(report);
}

fn print_parse_errors(report: &Report) {
    if report.parse_errors.is_empty() {
        return;
    }

    println!("\n{}", "Parse Errors".bold());
    for error in &report.parse_errors {
        println!("  {} {}", "⚠".yellow().bold(), error);
    }
}

fn print_overview(report: &Report) {
    println!("\n{}", "Overview".bold());

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec![
        "Total Records".to_string(),
        report.records.len().to_string(),
    ]);
    table.add_row(vec![
        "Record Types".to_string(),
        report.record_counts.len().to_string(),
    ]);
    table.add_row(vec![
        "Security Issues".to_string(),
        report.security_issues.len().to_string(),
    ]);
    table.add_row(vec![
        "Cloud Services".to_string(),
        report.cloud_services.len().to_string(),
    ]);
    table.add_row(vec![
        "Parse Errors".to_string(),
        report.parse_errors.len().to_string(),
    ]);
    println!("{}", table);

    if !report.environments.is_empty() {
        println!("\n{}", "Environments".bold());
        for environment in &report.environments {
            println!("  {} {}", "ℹ".blue().bold(), environment);
        }
    }

    let mut counts: Vec<(&String, &usize)> = report.record_counts.iter().collect();
    counts.sort();

    if !counts.is_empty() {
        println!("\n{}", "Record Types".bold());
        let mut table = Table::new();
        table.set_header(vec!["Type", "Count"]);
        for (rtype, count) in counts {
            table.add_row(vec![rtype.clone(), count.to_string()]);
        }
        println!("{}", table);
    }
}

fn print_records(report: &Report) {
    if report.records.is_empty() {
        return;
    }

    println!("\n{}", "Records".bold());
    let mut table = Table::new();
    table.set_header(vec![
        "Name", "TTL", "Type", "Value", "Category", "Security", "Findings",
    ]);

    for record in &report.records {
        let status = inspect::security_status_of(record);
        let security = if status.is_safe() {
            "Safe".to_string()
        } else {
            format!("Risk: {}", status.severity)
        };

        table.add_row(vec![
            record.name.clone(),
            record.ttl.to_string(),
            record.rtype.clone(),
            record.value.clone(),
            record.category.clone(),
            security,
            record.findings.join("; "),
        ]);
    }
    println!("{}", table);
}

fn print_security(report: &Report) {
    if report.security_issues.is_empty() {
        return;
    }

    println!("\n{}", "Security Issues".bold());
    for issue in &report.security_issues {
        let severity = inspect::severity_of_issue(issue);
        let glyph = match severity {
            inspect::Severity::High => "✗".red().bold(),
            inspect::Severity::Medium => "⚠".yellow().bold(),
            inspect::Severity::Low => "ℹ".blue().bold(),
        };
        println!("  {} {} [{}]", glyph, issue, severity);
    }
}

fn print_unusual_ttls(report: &Report) {
    if report.unusual_ttls.is_empty() {
        return;
    }

    println!("\n{}", "Unusual TTL Values".bold());
    for message in &report.unusual_ttls {
        println!("  {} {}", "⚠".yellow().bold(), message);
    }
}

fn print_email(report: &Report) {
    println!("\n{}", "Email Configuration".bold());

    let checks = [
        ("SPF Record", report.email_config.has_spf),
        ("DKIM Records", report.email_config.has_dkim),
        ("DMARC Record", report.email_config.has_dmarc),
    ];
    for (label, present) in &checks {
        if *present {
            println!("  {} {} Present", "✓".green().bold(), label);
        } else {
            println!("  {} {} Missing", "✗".red().bold(), label);
        }
    }
    println!(
        "  Email security score: {}/100",
        inspect::email_security_score(&report.email_config)
    );

    if !report.email_config.mx_records.is_empty() {
        println!("\n{}", "MX Records".bold());
        for mx in &report.email_config.mx_records {
            println!("  {}", mx);
        }
    }
}

fn print_cloud(report: &Report) {
    if !report.cloud_services.is_empty() {
        println!("\n{}", "Cloud Services".bold());
        for service in &report.cloud_services {
            println!("  {} {}", "ℹ".blue().bold(), service);
        }
    }

    if !report.service_mapping.is_empty() {
        println!("\n{}", "Service Mapping".bold());
        let mut table = Table::new();
        table.set_header(vec!["Name", "Type", "Target"]);
        for mapping in &report.service_mapping {
            table.add_row(vec![
                mapping.name.clone(),
                mapping.rtype.clone(),
                mapping.target.clone(),
            ]);
        }
        println!("{}", table);
    }
}

fn print_recommendations(report: &Report) {
    println!("\n{}", "Recommendations".bold());
    for recommendation in &report.recommendations {
        println!("  {} {}", "ℹ".blue().bold(), recommendation);
    }
}
