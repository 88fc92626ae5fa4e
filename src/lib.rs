//! Inbox Triage — rule-based support email triage core.

pub mod config;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod reply;
pub mod retrieval;
pub mod stats;
