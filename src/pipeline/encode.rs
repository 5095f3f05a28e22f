//! Image encoding: candidate file → base64 payload for a `data:` URI.
//!
//! SVG is the odd one out: it is a text format that browsers and Markdown
//! renderers accept verbatim inside a data URI, so its bytes are passed
//! through untouched — re-rasterising would destroy its scalability. Every
//! raster format is decoded and re-encoded in the format detected from the
//! file's bytes, which also normalises files whose extension lies about
//! their content.
//!
//! ## The JPEG transparency case
//!
//! JPEG has no alpha channel. When a file with transparent pixels is to be
//! re-encoded as JPEG (extension `.jpg`/`.jpeg`), the encoder would either
//! fail or drop the channel and produce black backgrounds. Instead the image
//! is flattened onto an opaque white canvas first, using alpha as the blend
//! mask — the same result a browser shows for a transparent image on a white
//! page.

use crate::error::EncodeError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// The seven accepted image file extensions (compared case-insensitively).
pub const SUPPORTED_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "svg", "bmp"];

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
}

/// Whether the file's extension is in the supported set.
pub fn is_supported(path: &Path) -> bool {
    extension_lowercase(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Media type for a resolved file, derived solely from its extension.
///
/// Must agree with what [`encode_file`] produces: the substitution step
/// pairs this with the payload to form `data:<media type>;base64,<payload>`.
/// Unrecognised extensions fall back to `image/png`.
pub fn media_type_for(path: &Path) -> &'static str {
    match extension_lowercase(path).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "image/png",
    }
}

/// Encode the file at `path` as a base64 payload.
///
/// `jpeg_quality` applies only when the re-encode target is JPEG; every
/// other format uses its default encoder settings.
pub fn encode_file(path: &Path, jpeg_quality: u8) -> Result<String, EncodeError> {
    let bytes = std::fs::read(path).map_err(|source| EncodeError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let ext = extension_lowercase(path);

    // SVG is opaque text, never re-rasterised.
    if ext.as_deref() == Some("svg") {
        return Ok(STANDARD.encode(&bytes));
    }

    let format = image::guess_format(&bytes).unwrap_or(ImageFormat::Png);
    let mut img = image::load_from_memory(&bytes).map_err(|source| EncodeError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let jpeg_target = matches!(ext.as_deref(), Some("jpg") | Some("jpeg"));
    if jpeg_target && img.color().has_alpha() {
        img = flatten_onto_white(&img);
    }

    let mut buf = Vec::new();
    let mut cursor = Cursor::new(&mut buf);
    let write_result = if format == ImageFormat::Jpeg {
        img.write_with_encoder(JpegEncoder::new_with_quality(&mut cursor, jpeg_quality))
    } else {
        img.write_to(&mut cursor, format)
    };
    write_result.map_err(|source| EncodeError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    let b64 = STANDARD.encode(&buf);
    debug!(
        "encoded {} → {} bytes base64 ({:?})",
        path.display(),
        b64.len(),
        format
    );
    Ok(b64)
}

/// Flatten an image with transparency onto an opaque white background of
/// identical dimensions, using the alpha channel as the blend mask.
fn flatten_onto_white(img: &DynamicImage) -> DynamicImage {
    let rgba = img.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (src, dst) in rgba.pixels().zip(out.pixels_mut()) {
        let a = src[3] as u32;
        for c in 0..3 {
            dst[c] = ((src[c] as u32 * a + 255 * (255 - a)) / 255) as u8;
        }
    }
    DynamicImage::ImageRgb8(out)
}
