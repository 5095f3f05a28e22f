//! Reference scanning: locate and classify image references in a document.
//!
//! The grammar is deliberately tolerant — real-world Markdown contains
//! angle-bracket-wrapped targets, trailing `"title"` strings, and
//! Obsidian-style `![[wiki]]` embeds, and authors expect all of them to be
//! picked up. The pattern pins down exactly which characters may appear in
//! each sub-token:
//!
//! * alt text: any run excluding `]`
//! * bare target: any run excluding `)`, `"`, whitespace, `>`
//! * angle-bracketed target: any run excluding `)`, `"`, `>` — whitespace is
//!   allowed, which is the entire point of the bracket syntax
//! * optional trailing `"title"` after whitespace: consumed by the match so
//!   substitution replaces the whole reference, but never reproduced in a
//!   converted reference
//!
//! Matching is non-overlapping and left-to-right; classification never
//! touches the filesystem, so [`count_references`] is pure.

use crate::output::ReferenceCounts;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Standard Markdown image reference: `![alt](target)`, `![alt](<target>)`,
/// optional trailing `"title"`.
///
/// Group 1: alt text. Group 2: angle-bracketed target (brackets stripped).
/// Group 3: bare target. Exactly one of groups 2/3 participates per match.
static RE_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"!\[([^\]]*)\]\((?:<([^)">]+)>|([^)"\s>]+))(?:\s+"[^"]*")?\)"#).unwrap()
});

/// Same grammar plus the Obsidian wiki embed `![[name.ext]]` as group 4,
/// restricted to names ending in a supported image extension.
static RE_IMAGE_WIKI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"!\[([^\]]*)\]\((?:<([^)">]+)>|([^)"\s>]+))(?:\s+"[^"]*")?\)|!\[\[([^\]]+\.(?i:png|jpg|jpeg|gif|webp|svg|bmp))\]\]"#,
    )
    .unwrap()
});

/// Classification of a reference target, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// Target already starts with `data:image`.
    AlreadyInline,
    /// Target starts with `http://` or `https://`.
    Remote,
    /// Anything else — a candidate for on-disk resolution.
    Local,
}

/// Classify a raw target string. Priority: inline payload, then remote URL,
/// then local.
pub fn classify(target: &str) -> RefKind {
    if target.starts_with("data:image") {
        RefKind::AlreadyInline
    } else if target.starts_with("http://") || target.starts_with("https://") {
        RefKind::Remote
    } else {
        RefKind::Local
    }
}

/// One parsed reference, borrowed from the document text.
///
/// For wiki embeds the embedded name doubles as both alt text and target,
/// which is exactly what the rewritten `![name](data:...)` form needs.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRef<'a> {
    pub alt: &'a str,
    pub target: &'a str,
    pub kind: RefKind,
}

/// Select the match pattern for a conversion pass.
pub fn pattern(convert_wiki_links: bool) -> &'static Regex {
    if convert_wiki_links {
        &RE_IMAGE_WIKI
    } else {
        &RE_IMAGE
    }
}

/// Parse one regex capture into a [`DocumentRef`].
///
/// Angle brackets around the target have already been excluded from the
/// capture group, so `target` never carries them.
pub fn parse<'a>(caps: &Captures<'a>) -> DocumentRef<'a> {
    if let Some(name) = caps.get(4) {
        let name = name.as_str();
        return DocumentRef {
            alt: name,
            target: name,
            kind: classify(name),
        };
    }
    let alt = caps.get(1).map(|m| m.as_str()).unwrap_or("");
    let target = caps
        .get(2)
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
        .unwrap_or("");
    DocumentRef {
        alt,
        target,
        kind: classify(target),
    }
}

/// Count references by classification without resolving or touching disk.
pub fn count_references(text: &str) -> ReferenceCounts {
    let mut counts = ReferenceCounts::default();
    for caps in RE_IMAGE.captures_iter(text) {
        let r = parse(&caps);
        counts.total += 1;
        match r.kind {
            RefKind::AlreadyInline => counts.already_inline += 1,
            RefKind::Remote => counts.remote += 1,
            RefKind::Local => counts.local += 1,
        }
    }
    counts
}
