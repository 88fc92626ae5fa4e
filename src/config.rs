//! Runtime configuration.

use std::path::PathBuf;

/// Settings for the triage binary and index build.
#[derive(Debug, Clone)]
pub struct TriageConfig {
    /// Directory of knowledge-base documents (one document per file).
    pub kb_dir: PathBuf,
    /// How many knowledge snippets to retrieve per draft.
    pub top_k: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            kb_dir: PathBuf::from("kb"),
            top_k: 2,
        }
    }
}

impl TriageConfig {
    /// Read configuration from the environment, falling back to defaults.
    ///
    /// - `INBOX_TRIAGE_KB_DIR` — knowledge-base directory
    /// - `INBOX_TRIAGE_TOP_K` — snippets per draft
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            kb_dir: std::env::var("INBOX_TRIAGE_KB_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.kb_dir),
            top_k: std::env::var("INBOX_TRIAGE_TOP_K")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.top_k),
        }
    }
}
