//! Summary statistics over a triaged batch.
//!
//! Pure computation feeding a dashboard or CLI summary line — no rendering
//! here. The 24-hour window only counts records with a parsed timestamp.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::pipeline::types::{Priority, Sentiment, TriagedEmail};

/// Counts derived from one triaged batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    /// All triaged records.
    pub total: usize,
    /// Records received within the trailing 24 hours of `now`.
    pub last_24h: usize,
    /// Urgent records within the trailing 24 hours.
    pub urgent_last_24h: usize,
    /// Whole-batch sentiment breakdown.
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Whole-batch priority breakdown.
    pub urgent: usize,
    pub not_urgent: usize,
}

impl QueueStats {
    /// Compute stats for a batch, with the 24-hour window anchored at `now`.
    pub fn compute(triaged: &[TriagedEmail], now: DateTime<Utc>) -> Self {
        let cutoff = now - Duration::hours(24);
        let mut stats = Self {
            total: triaged.len(),
            ..Self::default()
        };

        for item in triaged {
            match item.signals.sentiment {
                Sentiment::Positive => stats.positive += 1,
                Sentiment::Neutral => stats.neutral += 1,
                Sentiment::Negative => stats.negative += 1,
            }
            match item.signals.priority {
                Priority::Urgent => stats.urgent += 1,
                Priority::NotUrgent => stats.not_urgent += 1,
            }
            if let Some(ts) = item.record.timestamp {
                if ts >= cutoff {
                    stats.last_24h += 1;
                    if item.signals.priority == Priority::Urgent {
                        stats.urgent_last_24h += 1;
                    }
                }
            }
        }

        stats
    }
}
