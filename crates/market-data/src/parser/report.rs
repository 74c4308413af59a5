//! Per-element diagnostics collected while parsing a quote batch.

use std::fmt;

use crate::models::QuoteRecord;

const EXCERPT_CHARS: usize = 64;

/// Why an element of the batch was left out of the result.
#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    /// The element does not split into exactly `prefix=payload`.
    MissingSeparator { parts: usize },

    /// Nothing follows the last underscore of the prefix.
    MissingPrefix,

    /// The market+code token is not 8 bytes long.
    BadTokenLength { len: usize },

    /// The token cannot be split into a 2-char market and a code.
    BadToken,

    /// The payload ends before `index`, or a numeric slot there is blank.
    MissingField { index: usize },

    /// A numeric slot holds something that is not a number.
    MalformedField { index: usize, value: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator { parts } => {
                write!(f, "expected prefix=payload, got {} part(s)", parts)
            }
            Self::MissingPrefix => write!(f, "no market token after last '_'"),
            Self::BadTokenLength { len } => write!(f, "market token length {} != 8", len),
            Self::BadToken => write!(f, "market token is not splittable"),
            Self::MissingField { index } => write!(f, "slot {} is missing", index),
            Self::MalformedField { index, value } => {
                write!(f, "slot {} is not a number: {:?}", index, value)
            }
        }
    }
}

/// An element that was dropped from the batch.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedElement {
    /// Position of the element in the `;`-split input
    pub index: usize,
    /// Leading characters of the element
    pub excerpt: String,
    pub reason: SkipReason,
}

/// Parsed records plus what was dropped or degraded on the way.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseReport {
    pub records: Vec<QuoteRecord>,
    pub skipped: Vec<SkippedElement>,
    /// Records whose timestamp fell back to the parse-time clock
    pub degraded_timestamps: usize,
}

impl ParseReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, record: QuoteRecord) {
        if record.timestamp_degraded {
            self.degraded_timestamps += 1;
        }
        self.records.push(record);
    }

    pub fn record_skip(&mut self, index: usize, element: &str, reason: SkipReason) {
        self.skipped.push(SkippedElement {
            index,
            excerpt: excerpt(element),
            reason,
        });
    }

    /// True when nothing was skipped and every timestamp came from the feed.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.degraded_timestamps == 0
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        format!(
            "parsed={} skipped={} degraded_timestamps={}",
            self.records.len(),
            self.skipped.len(),
            self.degraded_timestamps
        )
    }
}

pub(crate) fn excerpt(element: &str) -> String {
    let mut out: String = element.chars().take(EXCERPT_CHARS).collect();
    if element.chars().nth(EXCERPT_CHARS).is_some() {
        out.push_str("...");
    }
    out
}
