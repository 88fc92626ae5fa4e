use std::path::PathBuf;

use anyhow::{Context, bail};

use inbox_triage::config::TriageConfig;
use inbox_triage::ingest::{CsvSource, RecordSource};
use inbox_triage::pipeline::TriagePipeline;
use inbox_triage::reply::ReplySynthesizer;
use inbox_triage::retrieval::RetrievalIndex;
use inbox_triage::stats::QueueStats;

struct Args {
    csv_path: PathBuf,
    kb_dir: Option<PathBuf>,
    top_k: Option<usize>,
    draft: Option<usize>,
    json: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut csv_path = None;
    let mut kb_dir = None;
    let mut top_k = None;
    let mut draft = None;
    let mut json = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--kb" => {
                kb_dir = Some(PathBuf::from(
                    args.next().context("--kb requires a directory")?,
                ));
            }
            "--top-k" => {
                top_k = Some(
                    args.next()
                        .context("--top-k requires a number")?
                        .parse()
                        .context("--top-k must be a non-negative integer")?,
                );
            }
            "--draft" => {
                draft = Some(
                    args.next()
                        .context("--draft requires a record index")?
                        .parse()
                        .context("--draft must be a non-negative integer")?,
                );
            }
            "--json" => json = true,
            other if csv_path.is_none() && !other.starts_with('-') => {
                csv_path = Some(PathBuf::from(other));
            }
            other => bail!("unexpected argument: {other}"),
        }
    }

    let Some(csv_path) = csv_path else {
        bail!("usage: inbox-triage <emails.csv> [--kb DIR] [--top-k N] [--draft INDEX] [--json]");
    };

    Ok(Args {
        csv_path,
        kb_dir,
        top_k,
        draft,
        json,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = parse_args()?;
    let mut config = TriageConfig::from_env();
    if let Some(kb_dir) = args.kb_dir {
        config.kb_dir = kb_dir;
    }
    if let Some(top_k) = args.top_k {
        config.top_k = top_k;
    }

    let source = CsvSource::new(&args.csv_path);
    let records = source
        .fetch()
        .with_context(|| format!("failed to read {}", args.csv_path.display()))?;

    let pipeline = TriagePipeline::with_defaults();
    let triaged = pipeline.triage(records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&triaged)?);
        return Ok(());
    }

    let stats = QueueStats::compute(&triaged, chrono::Utc::now());
    println!(
        "Support queue: {} message(s), {} urgent | last 24h: {} total, {} urgent",
        stats.total, stats.urgent, stats.last_24h, stats.urgent_last_24h
    );
    println!(
        "Sentiment: {} positive / {} neutral / {} negative\n",
        stats.positive, stats.neutral, stats.negative
    );

    println!(
        "{:<4} {:<28} {:<36} {:<11} {:<9} {}",
        "#", "From", "Subject", "Priority", "Sent.", "Date"
    );
    for (i, item) in triaged.iter().enumerate() {
        let date = item
            .record
            .timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<4} {:<28} {:<36} {:<11} {:<9} {}",
            i,
            truncate(&item.record.sender, 27),
            truncate(&item.record.subject, 35),
            item.signals.priority.label(),
            item.signals.sentiment.label(),
            date
        );
    }

    if let Some(idx) = args.draft {
        let Some(item) = triaged.get(idx) else {
            bail!("--draft index {idx} out of range ({} triaged records)", triaged.len());
        };

        let index = if config.kb_dir.is_dir() {
            RetrievalIndex::from_dir(&config.kb_dir)?
        } else {
            tracing::warn!(
                kb_dir = %config.kb_dir.display(),
                "knowledge-base directory not found, drafting without KB context"
            );
            RetrievalIndex::from_documents(Vec::new())
        };

        let hits = index.top_k(&item.record.body, config.top_k);
        let draft = ReplySynthesizer::new().compose(&item.record, &item.signals, &hits);
        println!("\n--- Draft reply (review before sending) ---\n");
        println!("{}", draft.body);
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
