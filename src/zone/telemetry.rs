//! Analysis lifecycle events.
//!
//! The engine returns a pure `Report`; telemetry is a separate observer that
//! walks a finished report and emits events through an `EventSink`. Nothing
//! here is interleaved with analysis logic, and sinks are fire-and-forget:
//! a sink that drops events changes no behavior.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::zone::analyzer::Report;
use crate::zone::inspect::{self, Severity};

/// One analysis lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnalysisEvent {
    AnalysisStarted {
        record_count: usize,
        error_count: usize,
    },
    RecordsParsed {
        success: bool,
        record_count: usize,
        errors: Vec<String>,
    },
    RecordTypeDetected {
        rtype: String,
        count: usize,
    },
    SecurityIssueDetected {
        issue: String,
        severity: Severity,
    },
    EmailConfigAnalyzed {
        has_spf: bool,
        has_dkim: bool,
        has_dmarc: bool,
        mx_record_count: usize,
        security_score: u8,
    },
    CloudServiceDetected {
        provider: String,
    },
    AnalysisCompleted {
        record_count: usize,
        security_issue_count: usize,
        cloud_service_count: usize,
        environment_count: usize,
        duration_ms: u64,
    },
    ReportExported {
        format: String,
        record_count: usize,
        byte_size: usize,
    },
}

/// Event plus run correlation and wall-clock context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub correlation_id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: AnalysisEvent,
}

/// Receiver for analysis events.
pub trait EventSink {
    fn emit(&self, event: &EventEnvelope);
}

/// Sink that drops every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &EventEnvelope) {}
}

/// Sink that forwards events to `tracing` as structured records.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &EventEnvelope) {
        match serde_json::to_string(&event.event) {
            Ok(payload) => info!(
                correlation_id = %event.correlation_id,
                timestamp = %event.timestamp.to_rfc3339(),
                %payload,
                "analysis event"
            ),
            Err(e) => warn!(error = %e, "failed to serialize analysis event"),
        }
    }
}

/// Emit a single event under a fresh correlation ID.
pub fn emit_event(sink: &dyn EventSink, event: AnalysisEvent) -> Uuid {
    let correlation_id = Uuid::new_v4();
    sink.emit(&EventEnvelope {
        correlation_id,
        timestamp: Utc::now(),
        event,
    });
    correlation_id
}

/// Walk a finished report and emit its lifecycle events in order, all under
/// one correlation ID (returned for follow-up events).
pub fn emit_report_events(sink: &dyn EventSink, report: &Report, duration: Duration) -> Uuid {
    let correlation_id = Uuid::new_v4();
    let send = |event: AnalysisEvent| {
        sink.emit(&EventEnvelope {
            correlation_id,
            timestamp: Utc::now(),
            event,
        });
    };

    send(AnalysisEvent::AnalysisStarted {
        record_count: report.records.len(),
        error_count: report.parse_errors.len(),
    });

    send(AnalysisEvent::RecordsParsed {
        success: report.parse_errors.is_empty(),
        record_count: report.records.len(),
        errors: report.parse_errors.clone(),
    });

    for (rtype, count) in &report.record_counts {
        send(AnalysisEvent::RecordTypeDetected {
            rtype: rtype.clone(),
            count: *count,
        });
    }

    for issue in &report.security_issues {
        send(AnalysisEvent::SecurityIssueDetected {
            issue: issue.clone(),
            severity: inspect::severity_of_issue(issue),
        });
    }

    send(AnalysisEvent::EmailConfigAnalyzed {
        has_spf: report.email_config.has_spf,
        has_dkim: report.email_config.has_dkim,
        has_dmarc: report.email_config.has_dmarc,
        mx_record_count: report.email_config.mx_records.len(),
        security_score: inspect::email_security_score(&report.email_config),
    });

    for provider in &report.cloud_services {
        send(AnalysisEvent::CloudServiceDetected {
            provider: provider.clone(),
        });
    }

    send(AnalysisEvent::AnalysisCompleted {
        record_count: report.records.len(),
        security_issue_count: report.security_issues.len(),
        cloud_service_count: report.cloud_services.len(),
        environment_count: report.environments.len(),
        duration_ms: duration.as_millis() as u64,
    });

    correlation_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::analyzer;
    use std::sync::Mutex;

    /// Test sink that records every envelope it sees.
    struct CollectSink {
        events: Mutex<Vec<EventEnvelope>>,
    }

    impl CollectSink {
        fn new() -> Self {
            CollectSink {
                events: Mutex::new(Vec::new()),
            }
        }

        fn drain(&self) -> Vec<EventEnvelope> {
            self.events.lock().unwrap().drain(..).collect()
        }
    }

    impl EventSink for CollectSink {
        fn emit(&self, event: &EventEnvelope) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn test_event_stream_shape() {
        let text = "\
www 3600 IN A 203.0.113.1
*.dev 3600 IN A 203.0.113.2
cdn 3600 IN CNAME d1.cloudfront.net.
broken line
";
        let report = analyzer::analyze(text);
        let sink = CollectSink::new();
        emit_report_events(&sink, &report, Duration::from_millis(5));
        let events = sink.drain();

        assert!(matches!(
            events[0].event,
            AnalysisEvent::AnalysisStarted {
                record_count: 3,
                error_count: 1
            }
        ));
        assert!(matches!(
            events[1].event,
            AnalysisEvent::RecordsParsed { success: false, .. }
        ));
        assert!(matches!(
            events.last().unwrap().event,
            AnalysisEvent::AnalysisCompleted { .. }
        ));

        let type_events = events
            .iter()
            .filter(|e| matches!(e.event, AnalysisEvent::RecordTypeDetected { .. }))
            .count();
        assert_eq!(type_events, 2, "one event per distinct record type");

        let issue_events = events
            .iter()
            .filter(|e| matches!(e.event, AnalysisEvent::SecurityIssueDetected { .. }))
            .count();
        assert_eq!(issue_events, report.security_issues.len());
    }

    #[test]
    fn test_one_correlation_id_per_run() {
        let report = analyzer::analyze("www 3600 IN A 203.0.113.1");
        let sink = CollectSink::new();
        let id = emit_report_events(&sink, &report, Duration::from_millis(1));
        let events = sink.drain();

        assert!(!events.is_empty());
        assert!(events.iter().all(|e| e.correlation_id == id));
    }

    #[test]
    fn test_issue_events_carry_severity() {
        let report = analyzer::analyze("api 3600 IN CNAME internal-lb.example.net.");
        let sink = CollectSink::new();
        emit_report_events(&sink, &report, Duration::from_millis(1));

        let severities: Vec<Severity> = sink
            .drain()
            .into_iter()
            .filter_map(|e| match e.event {
                AnalysisEvent::SecurityIssueDetected { severity, .. } => Some(severity),
                _ => None,
            })
            .collect();
        assert_eq!(severities, vec![Severity::High]);
    }

    #[test]
    fn test_emit_event_returns_fresh_id() {
        let sink = CollectSink::new();
        let first = emit_event(
            &sink,
            AnalysisEvent::ReportExported {
                format: "csv".to_string(),
                record_count: 1,
                byte_size: 64,
            },
        );
        let second = emit_event(
            &sink,
            AnalysisEvent::ReportExported {
                format: "csv".to_string(),
                record_count: 1,
                byte_size: 64,
            },
        );

        assert_ne!(first, second);
        assert_eq!(sink.drain().len(), 2);
    }
}
