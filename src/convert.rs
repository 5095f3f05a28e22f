//! Conversion entry points.
//!
//! [`convert`] drives the pipeline stages left-to-right over every reference
//! in a single pass: scan finds and classifies a match, resolve turns a
//! local target into a candidate path, encode produces the payload, and the
//! match span is rewritten in place. Any per-reference problem leaves that
//! span byte-identical to the input and records an outcome — one bad
//! reference never affects its siblings, and the function itself cannot
//! fail.
//!
//! Each call starts from a fresh outcome accumulator; the library holds no
//! state between calls.

use crate::config::ConversionConfig;
use crate::error::EmbedError;
use crate::output::{ConversionReport, ConversionStats, Outcome, ReferenceCounts};
use crate::pipeline::resolve::{PathProbe, RealFs};
use crate::pipeline::{encode, resolve, scan};
use regex::Captures;
use std::path::Path;
use tracing::{info, warn};

/// Convert image references in `document_text` to inline base64 data URIs.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `document_text` — the Markdown body to transform
/// * `document_path` — the document's absolute location; its containing
///   directory anchors relative-target resolution
/// * `config` — conversion configuration
///
/// # Returns
/// A [`ConversionReport`] with the transformed text and one [`Outcome`] per
/// matched reference, in document order. References that could not be
/// converted (missing file, unsupported format, encode failure) are left
/// unchanged in the text and recorded as failures — they never abort the
/// pass.
pub fn convert(
    document_text: &str,
    document_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> ConversionReport {
    let document_path = document_path.as_ref();
    info!("embedding images for {}", document_path.display());

    let probe = RealFs;
    let mut outcomes: Vec<Outcome> = Vec::new();

    let markdown = scan::pattern(config.convert_wiki_links)
        .replace_all(document_text, |caps: &Captures<'_>| {
            let r = scan::parse(caps);
            match r.kind {
                scan::RefKind::AlreadyInline => {
                    outcomes.push(Outcome::SkippedAlreadyInline {
                        alt: r.alt.to_string(),
                    });
                    caps[0].to_string()
                }
                scan::RefKind::Remote => {
                    outcomes.push(Outcome::SkippedRemote {
                        target: r.target.to_string(),
                    });
                    caps[0].to_string()
                }
                scan::RefKind::Local => {
                    convert_local(&r, &caps[0], document_path, &probe, config, &mut outcomes)
                }
            }
        })
        .into_owned();

    let stats = ConversionStats::from_outcomes(&outcomes);
    info!(
        "embedding pass complete: {} converted, {} skipped, {} failed of {} references",
        stats.converted, stats.skipped, stats.failed, stats.total
    );

    ConversionReport {
        markdown,
        outcomes,
        stats,
    }
}

/// Read a Markdown document from disk and run [`convert`] on its contents.
///
/// The document's on-disk location becomes the resolution anchor, so a
/// relative `document_path` is canonicalised first.
///
/// # Errors
/// Fails only when the document itself cannot be read; per-reference
/// problems are reported through the returned [`ConversionReport`].
pub fn convert_path(
    document_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionReport, EmbedError> {
    let path = document_path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => EmbedError::DocumentNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => EmbedError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => EmbedError::DocumentRead {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let anchor = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    Ok(convert(&text, anchor, config))
}

/// Count image references by classification. Read-only: no resolution, no
/// filesystem access.
pub fn count(document_text: &str) -> ReferenceCounts {
    scan::count_references(document_text)
}

/// Handle one local reference: resolve, validate, encode, substitute.
///
/// Returns the replacement text for the match span — either the inline
/// rewrite or the original span verbatim.
fn convert_local(
    r: &scan::DocumentRef<'_>,
    original: &str,
    document_path: &Path,
    probe: &dyn PathProbe,
    config: &ConversionConfig,
    outcomes: &mut Vec<Outcome>,
) -> String {
    let candidate = resolve::resolve_target(r.target, document_path, probe, config.max_upward_levels);

    if !probe.exists(&candidate) {
        warn!(
            "image not found: {} (resolved to {})",
            r.target,
            candidate.display()
        );
        outcomes.push(Outcome::FailedNotFound {
            target: r.target.to_string(),
        });
        return original.to_string();
    }

    if !encode::is_supported(&candidate) {
        warn!("unsupported image format: {}", r.target);
        outcomes.push(Outcome::FailedUnsupportedFormat {
            target: r.target.to_string(),
        });
        return original.to_string();
    }

    match encode::encode_file(&candidate, config.jpeg_quality) {
        Ok(payload) => {
            outcomes.push(Outcome::Converted {
                target: r.target.to_string(),
            });
            format!(
                "![{}](data:{};base64,{})",
                r.alt,
                encode::media_type_for(&candidate),
                payload
            )
        }
        Err(e) => {
            warn!("encoding failed for {}: {}", r.target, e);
            outcomes.push(Outcome::FailedEncoding {
                target: r.target.to_string(),
                detail: e.to_string(),
            });
            original.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_matches_returns_input_unchanged() {
        let text = "plain paragraph, a [link](a.png), and `code`";
        let report = convert(text, "/tmp/doc.md", &ConversionConfig::default());
        assert_eq!(report.markdown, text);
        assert!(report.outcomes.is_empty());
        assert_eq!(report.stats, ConversionStats::default());
    }

    #[test]
    fn inline_and_remote_spans_are_byte_identical() {
        let text = "\
before ![a](data:image/png;base64,AAAA) middle \
![b](https://example.com/b.png \"site\") after";
        let report = convert(text, "/tmp/doc.md", &ConversionConfig::default());
        assert_eq!(report.markdown, text);
        assert_eq!(report.outcomes.len(), 2);
        assert!(report.outcomes[0].is_skipped());
        assert!(report.outcomes[1].is_skipped());
    }

    #[test]
    fn missing_file_leaves_span_and_logs_raw_target() {
        let text = "![a](./definitely-missing.png)";
        let report = convert(text, "/tmp/nonexistent-dir/doc.md", &ConversionConfig::default());
        assert_eq!(report.markdown, text);
        assert_eq!(
            report.outcomes,
            vec![Outcome::FailedNotFound {
                target: "./definitely-missing.png".into()
            }]
        );
        assert_eq!(report.stats.failed, 1);
    }

    #[test]
    fn outcomes_follow_document_order() {
        let text = "\
![one](data:image/png;base64,AAAA)
![two](https://example.com/x.png)
![three](./missing.png)";
        let report = convert(text, "/tmp/doc.md", &ConversionConfig::default());
        let lines = report.log_lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("skipped, already inline"));
        assert!(lines[1].starts_with("skipped, remote link"));
        assert!(lines[2].starts_with("failed, file not found"));
    }

    #[test]
    fn count_performs_no_io() {
        let counts = count("![a](/no/such/dir/x.png) ![b](https://e.com/y.png)");
        assert_eq!(counts.total, 2);
        assert_eq!(counts.remote, 1);
        assert_eq!(counts.local, 1);
    }

    #[test]
    fn convert_path_reports_missing_document() {
        let err = convert_path("/no/such/doc.md", &ConversionConfig::default()).unwrap_err();
        assert!(matches!(err, EmbedError::DocumentNotFound { .. }));
    }
}
