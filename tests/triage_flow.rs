//! End-to-end flow: CSV ingestion → triage → retrieval → draft synthesis.

use inbox_triage::ingest::read_records;
use inbox_triage::pipeline::{Priority, Sentiment, TriagePipeline};
use inbox_triage::reply::ReplySynthesizer;
use inbox_triage::retrieval::RetrievalIndex;
use inbox_triage::stats::QueueStats;

const CSV: &str = "\
from,subject,body,date
amy@example.com,Need help ASAP - order not working,My order ID-99887 is not working. Call me at 555-123-4567.,2026-08-29T10:00:00Z
ben@example.com,Query about billing,Where can I see my invoices? Thanks!,2026-08-29T09:00:00Z
carol@example.com,Lunch plans,Pizza on Friday?,2026-08-29T08:00:00Z
dora@example.com,Support: password reset,I cannot login and I am blocked.,2026-08-29T11:00:00Z
";

fn kb_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("account_access.md"),
        "To restore account access, reset your password from the login page.",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("billing.md"),
        "Invoices are available under Settings > Billing for every cycle.",
    )
    .unwrap();
    dir
}

#[test]
fn csv_to_ranked_queue() {
    let records = read_records(CSV.as_bytes()).unwrap();
    assert_eq!(records.len(), 4);

    let triaged = TriagePipeline::with_defaults().triage(records);

    // "Lunch plans" is not a support subject.
    assert_eq!(triaged.len(), 3);
    assert!(triaged.iter().all(|t| t.record.subject != "Lunch plans"));

    // Urgent records first; among them, newest first.
    assert_eq!(triaged[0].record.sender, "dora@example.com"); // urgent, 11:00
    assert_eq!(triaged[1].record.sender, "amy@example.com"); // urgent, 10:00
    assert_eq!(triaged[2].record.sender, "ben@example.com"); // not urgent
    assert_eq!(triaged[0].signals.priority, Priority::Urgent);
    assert_eq!(triaged[2].signals.priority, Priority::NotUrgent);
}

#[test]
fn signals_extract_entities_and_sentiment() {
    let records = read_records(CSV.as_bytes()).unwrap();
    let triaged = TriagePipeline::with_defaults().triage(records);

    let amy = triaged
        .iter()
        .find(|t| t.record.sender == "amy@example.com")
        .unwrap();
    assert_eq!(amy.signals.sentiment, Sentiment::Negative);
    assert!(amy.signals.entities.reference_ids.contains("ID-99887"));
    assert!(amy.signals.entities.phones.iter().any(|p| p.contains("555-123-4567")));

    let ben = triaged
        .iter()
        .find(|t| t.record.sender == "ben@example.com")
        .unwrap();
    assert_eq!(ben.signals.sentiment, Sentiment::Positive);
}

#[test]
fn retrieval_feeds_the_draft() {
    let dir = kb_dir();
    let index = RetrievalIndex::from_dir(dir.path()).unwrap();

    let records = read_records(CSV.as_bytes()).unwrap();
    let triaged = TriagePipeline::with_defaults().triage(records);
    let dora = triaged
        .iter()
        .find(|t| t.record.sender == "dora@example.com")
        .unwrap();

    let hits = index.top_k(&dora.record.body, 1);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document.name, "account_access.md");

    let draft = ReplySynthesizer::new().compose(&dora.record, &dora.signals, &hits);
    assert!(draft.body.contains("Hi dora@example.com,"));
    assert!(draft.body.contains("**Urgent**"));
    assert!(draft.body.contains("reset your password from the login page"));
}

#[test]
fn empty_knowledge_base_still_drafts() {
    let dir = tempfile::tempdir().unwrap();
    let index = RetrievalIndex::from_dir(dir.path()).unwrap();
    assert!(index.is_empty());

    let records = read_records(CSV.as_bytes()).unwrap();
    let triaged = TriagePipeline::with_defaults().triage(records);
    let first = &triaged[0];

    let hits = index.top_k(&first.record.body, 3);
    assert!(hits.is_empty());

    let draft = ReplySynthesizer::new().compose(&first.record, &first.signals, &hits);
    assert!(draft.body.contains("--- Knowledge Base ---"));
    assert!(draft.body.ends_with("--- Knowledge Base ---"));
}

#[test]
fn stats_summarize_the_batch() {
    let records = read_records(CSV.as_bytes()).unwrap();
    let triaged = TriagePipeline::with_defaults().triage(records);
    let now = inbox_triage::ingest::parse_timestamp("2026-08-29T12:00:00Z").unwrap();

    let stats = QueueStats::compute(&triaged, now);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.urgent, 2);
    assert_eq!(stats.last_24h, 3);
    assert_eq!(stats.urgent_last_24h, 2);
}
