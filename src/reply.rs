//! Draft reply synthesis.
//!
//! Deterministic template fill — no generative model. The only conditional
//! content is the empathy opener (keyed by sentiment) and the Knowledge Base
//! section (populated from retrieval hits). Drafts are always reviewed and
//! edited by a human before anything is sent; sending is out of scope here.

use crate::pipeline::types::{Draft, EmailRecord, Sentiment, SignalSet};
use crate::retrieval::RetrievalHit;

/// Composes classifier output and retrieved snippets into a draft reply.
#[derive(Debug, Clone, Default)]
pub struct ReplySynthesizer;

impl ReplySynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Render the draft for one record.
    ///
    /// Pure string construction. Retrieved documents are appended verbatim
    /// in ranking order; names and scores are internal and never shown to
    /// the recipient. An empty `hits` slice yields an empty Knowledge Base
    /// section, not an error.
    pub fn compose(
        &self,
        record: &EmailRecord,
        signals: &SignalSet,
        hits: &[RetrievalHit<'_>],
    ) -> Draft {
        let empathy = match signals.sentiment {
            Sentiment::Positive => "Thanks for reaching out and for the positive note!",
            Sentiment::Neutral => "Thanks for reaching out.",
            Sentiment::Negative => {
                "I'm sorry for the trouble you're facing, and I appreciate your patience."
            }
        };

        let sender = if record.sender.is_empty() {
            "customer"
        } else {
            record.sender.as_str()
        };
        let subject = if record.subject.is_empty() {
            "(no subject)"
        } else {
            record.subject.as_str()
        };

        let snippets: Vec<&str> = hits.iter().map(|h| h.document.text.as_str()).collect();

        let body = format!(
            "Hi {sender},\n\
             \n\
             {empathy} I'm here to help.\n\
             \n\
             Regarding **{subject}**:\n\
             - I've reviewed your message and captured the details below.\n\
             - Priority assessed: **{priority}**\n\
             - Sentiment detected: **{sentiment}**\n\
             \n\
             Here's what you can try right away:\n\
             1) If this is about account access or activation, please try the steps in the KB below.\n\
             2) If it's a product issue, let me know your order/ticket ID and any error messages so I can investigate faster.\n\
             3) If this is urgent (service down or blocked), I've flagged it and will escalate immediately.\n\
             \n\
             Once you confirm a few details (screenshots, order/ticket ID, and the steps you tried), I'll proceed with the next action or arrange a quick call.\n\
             \n\
             Best regards,\n\
             Support Team\n\
             \n\
             --- Knowledge Base ---\n\
             {kb}",
            priority = signals.priority.label(),
            sentiment = signals.sentiment.label(),
            kb = snippets.join("\n\n"),
        );

        Draft {
            body: body.trim().to_string(),
        }
    }
}
