//! Isolates the JSON object in free-form model output.
//!
//! Models wrap answers in markdown fences, lead-in prose or stray
//! whitespace. Strategies are tried in a fixed order and the first match
//! wins; when none matches the trimmed text is returned as-is and JSON
//! parsing reports the problem.

use regex::Regex;
use std::sync::OnceLock;

static FENCED_BLOCK: OnceLock<Regex> = OnceLock::new();
static WHOLE_OBJECT: OnceLock<Regex> = OnceLock::new();

fn fenced_block() -> &'static Regex {
    FENCED_BLOCK.get_or_init(|| {
        Regex::new(r"(?s)```[A-Za-z0-9_+\-]*\s*(\{.*?\})\s*```").expect("valid fenced block pattern")
    })
}

fn whole_object() -> &'static Regex {
    WHOLE_OBJECT
        .get_or_init(|| Regex::new(r"(?s)^\s*(\{.*\})\s*$").expect("valid whole object pattern"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// A fenced code block, optionally tagged with a language, around an object.
    FencedBlock,
    /// The whole trimmed text is one brace-delimited object.
    WholeObject,
}

impl ExtractionStrategy {
    pub const ORDERED: [ExtractionStrategy; 2] = [
        ExtractionStrategy::FencedBlock,
        ExtractionStrategy::WholeObject,
    ];

    pub fn apply(self, text: &str) -> Option<&str> {
        let pattern = match self {
            ExtractionStrategy::FencedBlock => fenced_block(),
            ExtractionStrategy::WholeObject => whole_object(),
        };

        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Best-effort JSON object extraction. Never fails.
pub fn extract_json(raw: &str) -> String {
    for strategy in ExtractionStrategy::ORDERED {
        if let Some(found) = strategy.apply(raw) {
            tracing::trace!(?strategy, "Extracted JSON from model output");
            return found.to_string();
        }
    }

    raw.trim().to_string()
}
