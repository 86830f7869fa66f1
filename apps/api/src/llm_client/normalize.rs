//! Response normalization: turns raw model text into a JSON value or a diagnosable failure.
//!
//! The model is asked for bare JSON but frequently wraps it in a Markdown code fence.
//! One leading fence marker and one trailing marker are removed, nothing in between.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

lazy_static! {
    static ref LEADING_FENCE: Regex = Regex::new(r"\A```(?:json)?").unwrap();
    static ref TRAILING_FENCE: Regex = Regex::new(r"```\z").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MalformedJson,
}

/// Normalization failure. `cleaned` is the exact text the parser saw.
#[derive(Debug, Clone, Error)]
#[error("{kind:?}: {reason}")]
pub struct ParseFailure {
    pub kind: FailureKind,
    pub cleaned: String,
    pub reason: String,
}

/// Strips the outer code fence (if any) and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();
    let text = match LEADING_FENCE.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    let text = match TRAILING_FENCE.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    };
    text.trim()
}

/// Cleans `raw` and parses it strictly. No repair is attempted.
pub fn normalize(raw: &str) -> Result<Value, ParseFailure> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(cleaned).map_err(|e| ParseFailure {
        kind: FailureKind::MalformedJson,
        cleaned: cleaned.to_string(),
        reason: e.to_string(),
    })
}
