//! Configuration types for Markdown image embedding.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The defaults reproduce the behaviour
//! most callers want — standard Markdown syntax only, JPEG quality 95, a
//! five-level upward search for vault-rooted paths — so most callers can use
//! [`ConversionConfig::default()`] and never touch the builder.
//!
//! # Design choice: builder over constructor
//! The builder lets callers set only what they care about and rely on
//! well-documented defaults for the rest, and gives validation a single
//! place to live.

use crate::error::EmbedError;
use serde::{Deserialize, Serialize};

/// Configuration for a Markdown image-embedding pass.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use mdembed::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .jpeg_quality(85)
///     .convert_wiki_links(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// JPEG re-encode quality. Range: 1–100. Default: 95.
    ///
    /// 95 keeps re-encoded JPEGs visually indistinguishable from the source
    /// while still shrinking files that were saved at quality 100. Lower it
    /// when the embedding document must stay small; raising it past 95 grows
    /// the payload with no visible gain.
    pub jpeg_quality: u8,

    /// Maximum number of ancestor directories probed when a target looks
    /// vault-rooted (single leading `/`). Default: 5.
    ///
    /// Authoring tools such as Obsidian write `/attachments/x.png` meaning
    /// "relative to the vault root", but the vault root's location is not
    /// recorded in the document. Walking up a bounded number of ancestors
    /// recovers the intended file without the caller having to supply the
    /// root. Past five levels the hit rate is effectively zero and the probe
    /// cost is pure waste.
    pub max_upward_levels: usize,

    /// Also convert Obsidian-style `![[image.png]]` wiki embeds. Default: false.
    ///
    /// When enabled, wiki embeds whose name ends in a supported image
    /// extension are rewritten to standard `![name](data:...)` Markdown in
    /// the same left-to-right pass as regular references. Off by default so
    /// that documents using only standard syntax round-trip byte-identically.
    pub convert_wiki_links: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 95,
            max_upward_levels: 5,
            convert_wiki_links: false,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn jpeg_quality(mut self, q: u8) -> Self {
        self.config.jpeg_quality = q.clamp(1, 100);
        self
    }

    pub fn max_upward_levels(mut self, n: usize) -> Self {
        self.config.max_upward_levels = n;
        self
    }

    pub fn convert_wiki_links(mut self, v: bool) -> Self {
        self.config.convert_wiki_links = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, EmbedError> {
        let c = &self.config;
        if c.jpeg_quality == 0 || c.jpeg_quality > 100 {
            return Err(EmbedError::InvalidConfig(format!(
                "JPEG quality must be 1-100, got {}",
                c.jpeg_quality
            )));
        }
        Ok(self.config)
    }
}
