//! Shared types for the triage pipeline.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Email record ────────────────────────────────────────────────────

/// A single inbound email, normalized at the ingestion boundary.
///
/// Ingestion adapters (CSV today, a mailbox fetcher tomorrow) convert their
/// native rows into this struct. Everything downstream works on named, typed
/// fields — no loosely-typed rows flow through the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRecord {
    /// Sender address or display string, as received.
    pub sender: String,
    /// Subject line. Empty string when the source had none.
    pub subject: String,
    /// Plain-text body. Empty string when the source had none.
    pub body: String,
    /// Best-effort parsed receive time. `None` when the source value was
    /// missing or unparseable; such records sort after all dated ones.
    pub timestamp: Option<DateTime<Utc>>,
}

// ── Classification signals ──────────────────────────────────────────

/// Sentiment label derived from keyword counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Display label for tables and drafts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

/// Urgency label. Binary — there is no weighting between urgent messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    NotUrgent,
}

impl Priority {
    /// Sort rank: urgent sorts before not-urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::NotUrgent => 1,
        }
    }

    /// Display label for tables and drafts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::NotUrgent => "Not urgent",
        }
    }
}

/// Structured data pulled out of a message body by the pattern matchers.
///
/// Sets, not lists: repeated matches of the same text collapse to one entry
/// and ordering of matches in the input does not affect the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySet {
    /// Email addresses found in the text.
    pub emails: BTreeSet<String>,
    /// Phone numbers found in the text.
    pub phones: BTreeSet<String>,
    /// Order/ticket/case reference identifiers.
    pub reference_ids: BTreeSet<String>,
}

impl EntitySet {
    /// True when no matcher found anything.
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty() && self.reference_ids.is_empty()
    }
}

/// Everything the classifier derives from a message's text.
///
/// Pure function of the input text — recomputed on demand, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    pub sentiment: Sentiment,
    pub priority: Priority,
    pub entities: EntitySet,
}

// ── Triaged output ──────────────────────────────────────────────────

/// A record that passed the support filter, annotated with its signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriagedEmail {
    pub record: EmailRecord,
    pub signals: SignalSet,
}

// ── Draft reply ─────────────────────────────────────────────────────

/// A fully rendered draft reply, handed to a human for review and editing.
/// Never sent automatically — delivery is outside this crate entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub body: String,
}
