//! Keyword and regex classifier for inbound support text.
//!
//! Three independent signals, all pure functions of the input text:
//! - sentiment — distinct positive vs. negative keyword counts
//! - priority — binary urgency keyword match
//! - entities — email/phone/reference-ID pattern extraction
//!
//! No stemming, no negation handling: "not working" counts as both negative
//! sentiment and urgency evidence. The overlap is intentional — urgent mail
//! tends to be unhappy mail.

use regex::Regex;

use crate::pipeline::types::{EntitySet, Priority, Sentiment, SignalSet};

/// Keyword tables driving sentiment and urgency classification.
///
/// Injected rather than hard-wired so tests (and non-English deployments)
/// can substitute their own vocabulary. `default_vocabulary()` carries the
/// stock English tables.
#[derive(Debug, Clone)]
pub struct SignalVocabulary {
    /// Keywords counting toward positive sentiment.
    pub positive: Vec<String>,
    /// Keywords counting toward negative sentiment.
    pub negative: Vec<String>,
    /// Phrases that mark a message urgent when present anywhere.
    pub urgency: Vec<String>,
}

impl SignalVocabulary {
    /// The stock keyword tables.
    pub fn default_vocabulary() -> Self {
        let to_vec = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        Self {
            positive: to_vec(&[
                "great",
                "thanks",
                "thank you",
                "love",
                "awesome",
                "amazing",
                "perfect",
                "good",
                "appreciate",
            ]),
            negative: to_vec(&[
                "angry",
                "frustrated",
                "upset",
                "bad",
                "terrible",
                "horrible",
                "disappointed",
                "issue",
                "problem",
                "not working",
                "broken",
                "worst",
            ]),
            urgency: to_vec(&[
                "urgent",
                "immediately",
                "asap",
                "as soon as possible",
                "critical",
                "cannot login",
                "can't login",
                "down",
                "not working",
                "escalate",
                "priority 1",
                "p1",
                "outage",
                "blocked",
                "fail",
                "failed",
                "failure",
            ]),
        }
    }

    /// Empty tables (for testing).
    pub fn empty() -> Self {
        Self {
            positive: Vec::new(),
            negative: Vec::new(),
            urgency: Vec::new(),
        }
    }
}

/// The text classifier. Built once, then `classify` any number of times —
/// it holds only the vocabulary and compiled entity patterns.
pub struct TextSignals {
    vocab: SignalVocabulary,
    email_re: Regex,
    phone_re: Regex,
    reference_re: Regex,
}

impl TextSignals {
    /// Build a classifier over the given vocabulary.
    pub fn new(vocab: SignalVocabulary) -> Self {
        Self {
            vocab,
            // local@domain.tld
            email_re: Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap(),
            // Optional country code, then 3-3-4 digits with flexible separators.
            phone_re: Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?(?:\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4})")
                .unwrap(),
            // "order"/"ticket"/"case"/"id", optional punctuation, then the token.
            reference_re: Regex::new(r"(?i)\b(?:order|ticket|case|id)[:\s#-]*([A-Za-z0-9-]{5,})")
                .unwrap(),
        }
    }

    /// Classifier with the stock vocabulary.
    pub fn with_defaults() -> Self {
        Self::new(SignalVocabulary::default_vocabulary())
    }

    /// Derive the full signal set for a piece of text.
    ///
    /// Total over all inputs: empty text yields Neutral, NotUrgent, and
    /// empty entity sets.
    pub fn classify(&self, text: &str) -> SignalSet {
        SignalSet {
            sentiment: self.sentiment(text),
            priority: self.priority(text),
            entities: self.extract_entities(text),
        }
    }

    /// Signed sentiment score: distinct positive keywords minus distinct
    /// negative keywords. Each keyword contributes at most 1 no matter how
    /// often it repeats.
    pub fn sentiment_score(&self, text: &str) -> i32 {
        let lower = text.to_lowercase();
        let hits = |words: &[String]| words.iter().filter(|w| lower.contains(w.as_str())).count();
        hits(&self.vocab.positive) as i32 - hits(&self.vocab.negative) as i32
    }

    /// Sentiment label from the signed score. Ties go to Neutral.
    pub fn sentiment(&self, text: &str) -> Sentiment {
        match self.sentiment_score(text) {
            s if s > 0 => Sentiment::Positive,
            s if s < 0 => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    /// Urgent iff any urgency phrase appears as a substring of the
    /// lower-cased text. No weighting.
    pub fn priority(&self, text: &str) -> Priority {
        let lower = text.to_lowercase();
        if self.vocab.urgency.iter().any(|k| lower.contains(k.as_str())) {
            Priority::Urgent
        } else {
            Priority::NotUrgent
        }
    }

    /// Run the three entity matchers over the raw (case-preserved) text.
    /// Identical matches collapse; ordering in the input is irrelevant.
    pub fn extract_entities(&self, text: &str) -> EntitySet {
        let mut entities = EntitySet::default();
        for m in self.email_re.find_iter(text) {
            entities.emails.insert(m.as_str().trim().to_string());
        }
        for m in self.phone_re.find_iter(text) {
            entities.phones.insert(m.as_str().trim().to_string());
        }
        for caps in self.reference_re.captures_iter(text) {
            if let Some(id) = caps.get(1) {
                entities.reference_ids.insert(id.as_str().trim().to_string());
            }
        }
        entities
    }
}

impl Default for TextSignals {
    fn default() -> Self {
        Self::with_defaults()
    }
}
