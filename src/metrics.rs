use std::sync::atomic::{AtomicU64, Ordering};

use crate::processing::RunReport;

/// Thread-safe counters describing pipeline activity since startup.
#[derive(Default)]
pub struct RunMetrics {
    runs_completed: AtomicU64,
    files_summarized: AtomicU64,
    files_failed: AtomicU64,
    entries_skipped: AtomicU64,
}

impl RunMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the outcome of a completed run into the counters.
    pub fn record_run(&self, report: &RunReport) {
        self.runs_completed.fetch_add(1, Ordering::Relaxed);
        self.files_summarized
            .fetch_add(report.processed.len() as u64, Ordering::Relaxed);
        self.files_failed
            .fetch_add(report.failed.len() as u64, Ordering::Relaxed);
        self.entries_skipped
            .fetch_add(report.skipped as u64, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            runs_completed: self.runs_completed.load(Ordering::Relaxed),
            files_summarized: self.files_summarized.load(Ordering::Relaxed),
            files_failed: self.files_failed.load(Ordering::Relaxed),
            entries_skipped: self.entries_skipped.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of pipeline counters used for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Runs that passed pre-flight validation and finished.
    pub runs_completed: u64,
    /// Files summarized and written across all runs.
    pub files_summarized: u64,
    /// Files that failed extraction, summarization, or writing.
    pub files_failed: u64,
    /// Entries ignored for lack of a registered parser.
    pub entries_skipped: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::ProcessedSet;

    #[test]
    fn records_runs_and_file_counts() {
        let metrics = RunMetrics::new();
        let mut report = RunReport {
            processed: ProcessedSet::from(["a.txt".to_string(), "b.pdf".to_string()]),
            skipped: 3,
            ..RunReport::default()
        };
        report.failed.insert("c.txt".into(), "boom".into());
        metrics.record_run(&report);
        metrics.record_run(&RunReport::default());

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.runs_completed, 2);
        assert_eq!(snapshot.files_summarized, 2);
        assert_eq!(snapshot.files_failed, 1);
        assert_eq!(snapshot.entries_skipped, 3);
    }

    #[test]
    fn snapshot_starts_empty() {
        assert_eq!(RunMetrics::new().snapshot(), MetricsSnapshot::default());
    }
}
