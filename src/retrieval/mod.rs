//! Lexical knowledge-base retrieval.
//!
//! A batch in-memory TF-IDF index, built once over a fixed corpus and then
//! read-only. Queries are projected into the index vocabulary and every
//! document is ranked by cosine similarity. There is no incremental update:
//! rebuilding means constructing a fresh index and swapping the reference —
//! an `Arc<RetrievalIndex>` can therefore be read from any number of threads.

pub mod stopwords;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CorpusError;

pub use stopwords::ENGLISH_STOP_WORDS;

/// One knowledge-base document. Identity is the file name when loaded from
/// disk; callers building in-memory corpora pick their own names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    pub name: String,
    pub text: String,
}

/// A ranked query result. Scores are cosine similarities — non-negative for
/// term-frequency vectors, 1.0 for an exact textual copy of the query.
#[derive(Debug, Clone)]
pub struct RetrievalHit<'a> {
    pub document: &'a KnowledgeDocument,
    pub score: f32,
}

/// TF-IDF index over a document corpus.
///
/// Vocabulary and inverse-document-frequency weights are fixed at build
/// time. Query tokens outside the vocabulary are silently ignored.
pub struct RetrievalIndex {
    docs: Vec<KnowledgeDocument>,
    token_to_idx: HashMap<String, usize>,
    idf: Vec<f32>,
    doc_vectors: Vec<Vec<f32>>,
    stop_words: HashSet<String>,
}

impl RetrievalIndex {
    /// Build an index with the stock English stop-word list.
    pub fn from_documents(docs: Vec<KnowledgeDocument>) -> Self {
        Self::with_stop_words(docs, ENGLISH_STOP_WORDS)
    }

    /// Build an index with a custom stop-word list.
    pub fn with_stop_words(docs: Vec<KnowledgeDocument>, stop_words: &[&str]) -> Self {
        let stop_words: HashSet<String> = stop_words.iter().map(|w| w.to_lowercase()).collect();

        // Document frequency per token, counting each token once per doc.
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in &docs {
            let unique: HashSet<String> = tokenize(&doc.text, &stop_words).into_iter().collect();
            for token in unique {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        // Alphabetical vocabulary order keeps vector indices deterministic
        // across rebuilds of the same corpus.
        let mut vocab: Vec<(String, usize)> = doc_freq.into_iter().collect();
        vocab.sort_by(|a, b| a.0.cmp(&b.0));

        let num_docs = docs.len().max(1);
        let mut token_to_idx = HashMap::with_capacity(vocab.len());
        let mut idf = Vec::with_capacity(vocab.len());
        for (idx, (token, freq)) in vocab.into_iter().enumerate() {
            token_to_idx.insert(token, idx);
            // log(N / df) + 1 — the +1 keeps corpus-wide terms from zeroing out.
            idf.push(((num_docs as f32) / (freq as f32)).ln() + 1.0);
        }

        let doc_vectors = docs
            .iter()
            .map(|doc| weigh(&doc.text, &token_to_idx, &idf, &stop_words))
            .collect();

        info!(
            documents = docs.len(),
            vocabulary = token_to_idx.len(),
            "retrieval index built"
        );

        Self {
            docs,
            token_to_idx,
            idf,
            doc_vectors,
            stop_words,
        }
    }

    /// Build an index from a directory of plain-text documents.
    ///
    /// Loads every `.md` and `.txt` file, sorted by file name so corpus
    /// insertion order (and therefore tie-breaking) is reproducible. An
    /// empty directory yields a valid empty index.
    pub fn from_dir(dir: &Path) -> Result<Self, CorpusError> {
        let entries = std::fs::read_dir(dir).map_err(|source| CorpusError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths: Vec<_> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| {
                matches!(
                    p.extension().and_then(|e| e.to_str()),
                    Some("md") | Some("txt")
                )
            })
            .collect();
        paths.sort();

        let mut docs = Vec::with_capacity(paths.len());
        for path in paths {
            let text = std::fs::read_to_string(&path).map_err(|source| {
                CorpusError::ReadDocument {
                    path: path.clone(),
                    source,
                }
            })?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            docs.push(KnowledgeDocument { name, text });
        }

        Ok(Self::from_documents(docs))
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// True when the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Rank all documents against `query` and return the best `k`.
    ///
    /// Descending by cosine similarity; ties keep corpus insertion order
    /// (stable sort). Empty corpus or `k == 0` returns an empty vec —
    /// never an error. `k` beyond the corpus size returns the whole corpus.
    pub fn top_k(&self, query: &str, k: usize) -> Vec<RetrievalHit<'_>> {
        if k == 0 || self.docs.is_empty() {
            return Vec::new();
        }

        let query_vec = weigh(query, &self.token_to_idx, &self.idf, &self.stop_words);

        let mut ranked: Vec<(usize, f32)> = self
            .doc_vectors
            .iter()
            .enumerate()
            .map(|(idx, doc_vec)| (idx, cosine_similarity(&query_vec, doc_vec)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(k);

        ranked
            .into_iter()
            .map(|(idx, score)| RetrievalHit {
                document: &self.docs[idx],
                score,
            })
            .collect()
    }
}

/// Lowercase, split on non-alphanumeric, keep tokens of length ≥ 2 that are
/// not stop words.
fn tokenize(text: &str, stop_words: &HashSet<String>) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 2 && !stop_words.contains(*t))
        .map(str::to_string)
        .collect()
}

/// Project text into the vocabulary space: term frequency times IDF per
/// vocabulary slot. Tokens outside the vocabulary are dropped.
fn weigh(
    text: &str,
    token_to_idx: &HashMap<String, usize>,
    idf: &[f32],
    stop_words: &HashSet<String>,
) -> Vec<f32> {
    let mut vector = vec![0.0f32; idf.len()];
    for token in tokenize(text, stop_words) {
        if let Some(&idx) = token_to_idx.get(&token) {
            vector[idx] += idf[idx];
        }
    }
    vector
}

/// Cosine of the angle between two equal-length vectors. 0.0 when either
/// has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0f32;
    let mut mag_a = 0.0f32;
    let mut mag_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom == 0.0 { 0.0 } else { dot / denom }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str, text: &str) -> KnowledgeDocument {
        KnowledgeDocument {
            name: name.into(),
            text: text.into(),
        }
    }

    fn corpus() -> Vec<KnowledgeDocument> {
        vec![
            doc("login.md", "Reset your password from the login page to restore account access"),
            doc("billing.md", "Invoices and billing cycles are managed in the billing tab"),
            doc("shipping.md", "Track your shipment with the order number from your confirmation"),
        ]
    }

    #[test]
    fn top_k_zero_returns_empty() {
        let index = RetrievalIndex::from_documents(corpus());
        assert!(index.top_k("password", 0).is_empty());
    }

    #[test]
    fn empty_corpus_returns_empty_for_any_query() {
        let index = RetrievalIndex::from_documents(Vec::new());
        assert!(index.is_empty());
        assert!(index.top_k("anything at all", 5).is_empty());
    }

    #[test]
    fn k_beyond_corpus_returns_whole_corpus() {
        let index = RetrievalIndex::from_documents(corpus());
        assert_eq!(index.top_k("password", 100).len(), 3);
    }

    #[test]
    fn most_relevant_document_ranks_first() {
        let index = RetrievalIndex::from_documents(corpus());
        let hits = index.top_k("I cannot reset my password", 2);
        assert_eq!(hits[0].document.name, "login.md");
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn exact_copy_of_query_scores_one() {
        let text = "Track your shipment with the order number from your confirmation";
        let index = RetrievalIndex::from_documents(corpus());
        let hits = index.top_k(text, 1);
        assert_eq!(hits[0].document.name, "shipping.md");
        assert!((hits[0].score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn duplicate_documents_tie_in_insertion_order() {
        let index = RetrievalIndex::from_documents(vec![
            doc("first.md", "identical text about password resets"),
            doc("second.md", "identical text about password resets"),
        ]);
        let hits = index.top_k("password resets", 2);
        assert_eq!(hits[0].document.name, "first.md");
        assert_eq!(hits[1].document.name, "second.md");
        assert!((hits[0].score - hits[1].score).abs() < 1e-6);
    }

    #[test]
    fn out_of_vocabulary_query_is_not_an_error() {
        let index = RetrievalIndex::from_documents(corpus());
        let hits = index.top_k("zzzz qqqq xyzzy", 2);
        // Nothing matches — all scores are zero but ranking still happens.
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].score, 0.0);
    }

    #[test]
    fn stop_words_are_excluded_from_vocabulary() {
        let index = RetrievalIndex::from_documents(vec![doc("a.md", "the and of with billing")]);
        // A pure stop-word query projects to a zero vector.
        let hits = index.top_k("the and of with", 1);
        assert_eq!(hits[0].score, 0.0);
        // A content word still matches.
        let hits = index.top_k("billing", 1);
        assert!(hits[0].score > 0.0);
    }

    #[test]
    fn custom_stop_words_are_honored() {
        let index = RetrievalIndex::with_stop_words(
            vec![doc("a.md", "facture paiement"), doc("b.md", "livraison colis")],
            &["facture"],
        );
        // "facture" was stopped out, so only "paiement" can match a.md.
        assert_eq!(index.top_k("facture", 1)[0].score, 0.0);
        assert!(index.top_k("paiement", 1)[0].score > 0.0);
    }

    #[test]
    fn from_dir_loads_markdown_and_text_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("faq.md"), "password reset steps").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "billing cycle details").unwrap();
        std::fs::write(dir.path().join("image.png"), [0u8, 1, 2]).unwrap();

        let index = RetrievalIndex::from_dir(dir.path()).unwrap();
        assert_eq!(index.len(), 2);
        let hits = index.top_k("password", 1);
        assert_eq!(hits[0].document.name, "faq.md");
    }

    #[test]
    fn from_dir_empty_directory_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let index = RetrievalIndex::from_dir(dir.path()).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn from_dir_missing_directory_is_an_error() {
        let result = RetrievalIndex::from_dir(Path::new("/nonexistent/kb-dir"));
        assert!(matches!(result, Err(CorpusError::ReadDir { .. })));
    }

    #[test]
    fn index_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RetrievalIndex>();
    }
}
