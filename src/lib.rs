//! # mdembed
//!
//! Embed local images referenced in Markdown as base64 `data:` URIs.
//!
//! ## Why this crate?
//!
//! A Markdown document that references images by path stops rendering the
//! moment it leaves its directory — pasted into a chat, mailed, or published
//! through a tool that only sees the text. Inlining each local image as a
//! self-contained `data:<media type>;base64,<payload>` URI produces a single
//! portable document that renders anywhere, with no sidecar files. Remote
//! (`http`/`https`) references and references that are already inlined are
//! left untouched.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown text
//!  │
//!  ├─ 1. Scan     find ![alt](target) references, classify each
//!  ├─ 2. Resolve  target + document location → candidate path
//!  │              (bounded upward search for vault-rooted /targets)
//!  ├─ 3. Encode   decode → flatten alpha for JPEG → re-encode → base64
//!  └─ 4. Report   transformed text + one outcome line per reference
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdembed::{convert, ConversionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let text = std::fs::read_to_string("/notes/post.md")?;
//!     let report = convert(&text, "/notes/post.md", &ConversionConfig::default());
//!     println!("{}", report.markdown);
//!     for line in report.log_lines() {
//!         eprintln!("{line}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Guarantees
//!
//! * [`convert`] never fails: per-reference problems (missing file,
//!   unsupported format, corrupt image) leave that reference byte-identical
//!   to the input and are reported in the outcome log.
//! * Exactly one outcome per matched reference, in document order.
//! * Converting the output of a successful conversion again is a no-op —
//!   every inlined reference is classified `data:image` and skipped.
//! * The only I/O is reading candidate image files (and, for
//!   [`convert_path`], the document itself). Nothing is ever written and no
//!   network request is ever made.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_path, count};
pub use error::{EmbedError, EncodeError};
pub use output::{ConversionReport, ConversionStats, Outcome, ReferenceCounts};
