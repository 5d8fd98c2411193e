//! Performance benchmarks for zone file parsing and analysis.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use zonelint::zone::{analyzer, parser};

/// Build a synthetic zone with a realistic mix of record shapes.
fn synthetic_zone(lines: usize) -> String {
    let mut zone = String::from("; synthetic benchmark zone\n");
    for i in 0..lines {
        match i % 6 {
            0 => zone.push_str(&format!("host-{} 3600 IN A 203.0.113.{}\n", i, i % 250)),
            1 => zone.push_str(&format!(
                "svc-{} 300 IN CNAME lb-{}.elb.amazonaws.com.\n",
                i, i
            )),
            2 => zone.push_str(&format!("@ 3600 IN MX {} mx-{}.example.net.\n", i % 20, i)),
            3 => zone.push_str(&format!(
                "@ 3600 IN TXT \"v=spf1 include:_spf{}.example.net ~all\"\n",
                i
            )),
            4 => zone.push_str(&format!("qa-{} 100 IN A 10.0.{}.{}\n", i, i % 250, i % 250)),
            _ => zone.push_str(&format!("ns-{} 86400 IN NS ns{}.provider.net.\n", i, i % 4)),
        }
    }
    zone
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for &lines in &[100usize, 1_000, 10_000] {
        let zone = synthetic_zone(lines);
        group.throughput(Throughput::Bytes(zone.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &zone, |b, zone| {
            b.iter(|| parser::parse(black_box(zone)))
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    for &lines in &[100usize, 1_000, 10_000] {
        let zone = synthetic_zone(lines);
        group.throughput(Throughput::Bytes(zone.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &zone, |b, zone| {
            b.iter(|| analyzer::analyze(black_box(zone)))
        });
    }
    group.finish();
}

fn bench_csv_export(c: &mut Criterion) {
    let report = analyzer::analyze(&synthetic_zone(1_000));
    c.bench_function("csv_export_1k", |b| {
        b.iter(|| zonelint::zone::export::to_csv(black_box(&report)))
    });
}

criterion_group!(benches, bench_parse, bench_analyze, bench_csv_export);
criterion_main!(benches);
