//! Error types for the mdembed library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`EmbedError`] — **Fatal**: the conversion cannot start at all
//!   (document file unreadable, invalid configuration). Returned as
//!   `Err(EmbedError)` from [`crate::convert::convert_path`] and the config
//!   builder.
//!
//! * [`EncodeError`] — **Non-fatal**: a single image reference failed
//!   (unreadable file, corrupt pixel data, re-encode failure). Recovered
//!   into a [`crate::output::Outcome::FailedEncoding`] entry so the
//!   reference is left untouched while every sibling reference still
//!   converts.
//!
//! The separation means [`crate::convert::convert`] itself is infallible:
//! every per-reference problem is absorbed into the outcome log rather than
//! raised past the conversion boundary.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the mdembed library.
///
/// Per-reference failures use [`EncodeError`] and surface as outcome log
/// entries rather than propagating here.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// Document file was not found at the given path.
    #[error("Markdown document not found: '{path}'\nCheck the path exists and is readable.")]
    DocumentNotFound { path: PathBuf },

    /// Process does not have read permission on the document.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The document exists but reading it failed for another reason
    /// (not valid UTF-8, hardware error, ...).
    #[error("Failed to read document '{path}': {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single image reference.
///
/// Produced by [`crate::pipeline::encode`] when a resolved file cannot be
/// turned into an inline payload. The conversion pass continues with the
/// next reference.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The resolved file could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file's bytes could not be decoded as an image.
    #[error("failed to decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Re-encoding the decoded image into the output buffer failed.
    #[error("failed to re-encode '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
