//! Support email triage pipeline.
//!
//! Inbound records flow through:
//! 1. `SupportFilter` — subject-line gate, non-support mail is dropped
//! 2. `TextSignals` — sentiment, urgency, entity extraction
//! 3. ranking — urgent first, then newest first
//!
//! Knowledge retrieval and reply synthesis happen per selected record, not
//! per batch — see `crate::retrieval` and `crate::reply`.

pub mod filter;
pub mod signals;
pub mod triage;
pub mod types;

pub use filter::SupportFilter;
pub use signals::{SignalVocabulary, TextSignals};
pub use triage::TriagePipeline;
pub use types::{Draft, EmailRecord, EntitySet, Priority, Sentiment, SignalSet, TriagedEmail};
