//! Batch triage: filter → classify → rank.

use tracing::{debug, info};

use crate::pipeline::filter::SupportFilter;
use crate::pipeline::signals::TextSignals;
use crate::pipeline::types::{EmailRecord, TriagedEmail};

/// Orchestrates the support filter and classifier over a batch of records.
///
/// Synchronous and in-memory — sized for a manual triage workflow, not a
/// high-throughput queue. Each invocation is self-contained; the pipeline
/// holds no state between calls.
pub struct TriagePipeline {
    filter: SupportFilter,
    signals: TextSignals,
}

impl TriagePipeline {
    pub fn new(filter: SupportFilter, signals: TextSignals) -> Self {
        Self { filter, signals }
    }

    /// Pipeline with stock filter terms and classifier vocabulary.
    pub fn with_defaults() -> Self {
        Self::new(SupportFilter::with_defaults(), TextSignals::with_defaults())
    }

    /// Triage a batch:
    /// 1. drop records whose subject is not support-relevant (order kept)
    /// 2. classify each survivor over `subject + "\n" + body`
    /// 3. stable-sort urgent-first, then newest-first; undated records last
    ///
    /// Total over its input — a malformed record classifies to safe defaults
    /// rather than failing the batch.
    pub fn triage(&self, records: Vec<EmailRecord>) -> Vec<TriagedEmail> {
        let total = records.len();

        let mut triaged: Vec<TriagedEmail> = records
            .into_iter()
            .filter(|record| {
                let keep = self.filter.matches(record);
                if !keep {
                    debug!(subject = %record.subject, "dropped: not a support subject");
                }
                keep
            })
            .map(|record| {
                let text = format!("{}\n{}", record.subject, record.body);
                let signals = self.signals.classify(&text);
                debug!(
                    subject = %record.subject,
                    priority = signals.priority.label(),
                    sentiment = signals.sentiment.label(),
                    "classified"
                );
                TriagedEmail { record, signals }
            })
            .collect();

        // Stable sort: priority rank ascending, then timestamp descending.
        // `None < Some(_)` for Options, so reversed comparison puts undated
        // records after every dated one.
        triaged.sort_by(|a, b| {
            a.signals
                .priority
                .rank()
                .cmp(&b.signals.priority.rank())
                .then_with(|| b.record.timestamp.cmp(&a.record.timestamp))
        });

        info!(
            total,
            kept = triaged.len(),
            urgent = triaged
                .iter()
                .filter(|t| t.signals.priority.rank() == 0)
                .count(),
            "triage batch complete"
        );

        triaged
    }
}

impl Default for TriagePipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}
