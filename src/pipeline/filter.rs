//! Support-queue gate: does a subject line belong in the triage queue?

use crate::pipeline::types::EmailRecord;

/// Subject-line filter deciding queue membership.
///
/// A message is support-relevant iff its lower-cased subject contains at
/// least one of the configured terms. Terms are injected so deployments can
/// tune the vocabulary without code edits.
#[derive(Debug, Clone)]
pub struct SupportFilter {
    terms: Vec<String>,
}

impl SupportFilter {
    /// Filter with the stock term vocabulary.
    pub fn with_defaults() -> Self {
        Self::with_terms(&["support", "query", "request", "help"])
    }

    /// Filter with a custom term vocabulary.
    pub fn with_terms(terms: &[&str]) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// True iff the subject contains any support term. Empty subject is
    /// never support-relevant.
    pub fn is_support_subject(&self, subject: &str) -> bool {
        let lower = subject.to_lowercase();
        self.terms.iter().any(|t| lower.contains(t.as_str()))
    }

    /// Convenience for whole records.
    pub fn matches(&self, record: &EmailRecord) -> bool {
        self.is_support_subject(&record.subject)
    }
}

impl Default for SupportFilter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_support_terms() {
        let filter = SupportFilter::with_defaults();
        assert!(filter.is_support_subject("Support needed for login"));
        assert!(filter.is_support_subject("Query about invoice"));
        assert!(filter.is_support_subject("REQUEST: account upgrade"));
        assert!(filter.is_support_subject("Need help ASAP"));
    }

    #[test]
    fn rejects_unrelated_subjects() {
        let filter = SupportFilter::with_defaults();
        assert!(!filter.is_support_subject("Weekly newsletter"));
        assert!(!filter.is_support_subject("Lunch on Friday?"));
    }

    #[test]
    fn empty_subject_is_rejected() {
        let filter = SupportFilter::with_defaults();
        assert!(!filter.is_support_subject(""));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let filter = SupportFilter::with_defaults();
        assert!(filter.is_support_subject("HELP! nothing loads"));
    }

    #[test]
    fn custom_terms_replace_defaults() {
        let filter = SupportFilter::with_terms(&["soporte"]);
        assert!(filter.is_support_subject("Necesito soporte"));
        assert!(!filter.is_support_subject("Need help"));
    }
}
