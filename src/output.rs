//! Output types: per-reference outcomes and the aggregate conversion report.
//!
//! A conversion pass never aborts on a bad reference, so the interesting
//! result is not success/failure but the *per-reference ledger*: exactly one
//! [`Outcome`] per matched reference, in document order. The host shell
//! renders [`ConversionReport::log_lines`] directly as a multi-line report;
//! programmatic callers match on the [`Outcome`] variants instead of parsing
//! the text.

use serde::Serialize;
use std::fmt;

/// What happened to one image reference during a conversion pass.
///
/// Exactly one outcome is produced per matched reference, in the order the
/// references appear in the document. The `target` fields hold the raw
/// target string as written (angle brackets stripped), so a failed entry
/// points at the literal text the author must fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Target already carries a `data:image` payload; left untouched.
    SkippedAlreadyInline { alt: String },
    /// Target is an `http://` or `https://` URL; never dereferenced.
    SkippedRemote { target: String },
    /// The resolved candidate path does not exist on disk.
    FailedNotFound { target: String },
    /// The file exists but its extension is not a supported image format.
    FailedUnsupportedFormat { target: String },
    /// Decoding or re-encoding the image failed.
    FailedEncoding { target: String, detail: String },
    /// The reference was replaced with an inline data URI.
    Converted { target: String },
}

impl Outcome {
    /// True for the two skip variants (reference intentionally untouched).
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            Outcome::SkippedAlreadyInline { .. } | Outcome::SkippedRemote { .. }
        )
    }

    /// True for the three failure variants (reference untouched, needs fixing).
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Outcome::FailedNotFound { .. }
                | Outcome::FailedUnsupportedFormat { .. }
                | Outcome::FailedEncoding { .. }
        )
    }

    /// True when the reference was rewritten to an inline payload.
    pub fn is_converted(&self) -> bool {
        matches!(self, Outcome::Converted { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::SkippedAlreadyInline { alt } => {
                write!(f, "skipped, already inline: {alt}")
            }
            Outcome::SkippedRemote { target } => write!(f, "skipped, remote link: {target}"),
            Outcome::FailedNotFound { target } => write!(f, "failed, file not found: {target}"),
            Outcome::FailedUnsupportedFormat { target } => {
                write!(f, "failed, unsupported format: {target}")
            }
            Outcome::FailedEncoding { target, detail } => {
                write!(f, "failed, could not encode: {target} ({detail})")
            }
            Outcome::Converted { target } => write!(f, "converted: {target}"),
        }
    }
}

/// Tallies over one conversion pass, derived from the outcome list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    /// Total references matched.
    pub total: usize,
    /// References rewritten to inline payloads.
    pub converted: usize,
    /// References intentionally left untouched (already inline, remote).
    pub skipped: usize,
    /// References left untouched because of an error.
    pub failed: usize,
}

impl ConversionStats {
    /// Tally a slice of outcomes.
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let mut stats = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        for o in outcomes {
            if o.is_converted() {
                stats.converted += 1;
            } else if o.is_skipped() {
                stats.skipped += 1;
            } else {
                stats.failed += 1;
            }
        }
        stats
    }
}

/// Result of one conversion pass.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// The transformed document text. Unconverted references are
    /// byte-identical to the input.
    pub markdown: String,
    /// One entry per matched reference, in document order.
    pub outcomes: Vec<Outcome>,
    /// Tallies derived from `outcomes`.
    pub stats: ConversionStats,
}

impl ConversionReport {
    /// Render the outcome list as human-readable lines, one per reference,
    /// suitable for direct display.
    pub fn log_lines(&self) -> Vec<String> {
        self.outcomes.iter().map(|o| o.to_string()).collect()
    }
}

/// Reference counts by classification, as reported by [`crate::count`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceCounts {
    /// All references matching the grammar.
    pub total: usize,
    /// Targets already carrying a `data:image` payload.
    pub already_inline: usize,
    /// `http://` / `https://` targets.
    pub remote: usize,
    /// Everything else — candidates for embedding.
    pub local: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_display_lines() {
        let o = Outcome::FailedNotFound {
            target: "./missing.png".into(),
        };
        assert_eq!(o.to_string(), "failed, file not found: ./missing.png");

        let o = Outcome::Converted {
            target: "assets/logo.png".into(),
        };
        assert_eq!(o.to_string(), "converted: assets/logo.png");

        let o = Outcome::FailedEncoding {
            target: "a.png".into(),
            detail: "bad header".into(),
        };
        let line = o.to_string();
        assert!(line.contains("a.png"));
        assert!(line.contains("bad header"));
    }

    #[test]
    fn stats_tally_by_kind() {
        let outcomes = vec![
            Outcome::Converted {
                target: "a.png".into(),
            },
            Outcome::SkippedRemote {
                target: "https://x/a.png".into(),
            },
            Outcome::SkippedAlreadyInline { alt: "logo".into() },
            Outcome::FailedNotFound {
                target: "b.png".into(),
            },
        ];
        let stats = ConversionStats::from_outcomes(&outcomes);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.converted, 1);
        assert_eq!(stats.skipped, 2);
        assert_eq!(stats.failed, 1);
    }
}
