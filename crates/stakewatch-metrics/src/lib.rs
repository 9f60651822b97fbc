use std::sync::Arc;

use opentelemetry::{KeyValue, global, metrics::Counter};

#[derive(Debug)]
pub struct MetricsRegistry {
    pub ingest: Arc<IngestMetrics>,
}

impl MetricsRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            ingest: IngestMetrics::new(),
        })
    }
}

#[derive(Debug)]
pub struct IngestMetrics {
    runs: Counter<u64>,
    rows_written: Counter<u64>,
    rows_rejected: Counter<u64>,
    upstream_retries: Counter<u64>,
}

impl IngestMetrics {
    fn new() -> Arc<Self> {
        let meter = global::meter("stakewatch-api");
        let runs = meter
            .u64_counter("ingest_runs_total")
            .with_description("Number of ingestion runs, by outcome")
            .with_unit("count")
            .init();

        let rows_written = meter
            .u64_counter("ingest_rows_written_total")
            .with_description("Number of metric rows accepted and written")
            .with_unit("count")
            .init();

        let rows_rejected = meter
            .u64_counter("ingest_rows_rejected_total")
            .with_description("Number of metric rows dropped by validation")
            .with_unit("count")
            .init();

        let upstream_retries = meter
            .u64_counter("ingest_upstream_retries_total")
            .with_description("Number of upstream fetch attempts that had to be retried")
            .with_unit("count")
            .init();

        Arc::new(Self {
            runs,
            rows_written,
            rows_rejected,
            upstream_retries,
        })
    }

    pub fn record_run(&self, outcome: RunOutcome) {
        self.runs
            .add(1, &[KeyValue::new("outcome", outcome.as_str().to_string())]);
    }

    pub fn record_rows_written(&self, chain: &str, count: u64) {
        self.rows_written
            .add(count, &[KeyValue::new("chain", chain.to_string())]);
    }

    pub fn record_rows_rejected(&self, chain: &str, count: u64) {
        self.rows_rejected
            .add(count, &[KeyValue::new("chain", chain.to_string())]);
    }

    pub fn record_upstream_retry(&self, endpoint: &str) {
        self.upstream_retries
            .add(1, &[KeyValue::new("endpoint", endpoint.to_string())]);
    }
}

#[derive(Clone, Copy, Debug)]
pub enum RunOutcome {
    Completed,
    NoOp,
    Failed,
}

impl RunOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::NoOp => "no_op",
            Self::Failed => "failed",
        }
    }
}
