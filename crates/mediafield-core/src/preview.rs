//! Preview pipeline: raw file to self-contained data URI.
//!
//! The encode is synchronous and pure; the browser layer awaits the
//! file read and yields to the event loop before calling
//! [`generate_preview`], so the UI stays responsive while a large file
//! is read.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::types::{PreviewSource, RawFile};

/// MIME type used when a file carries none.
const FALLBACK_MIME: &str = "application/octet-stream";

/// Encode a file's full content as a `data:` URI.
///
/// Never validates size or content. Empty or corrupt files still
/// produce a (possibly unusable) non-empty string.
#[must_use]
pub fn generate_preview(file: &RawFile) -> PreviewSource {
    let mime = display_mime(file);
    let prefix = format!("data:{mime};base64,");
    let mut out = String::with_capacity(prefix.len() + file.len().div_ceil(3) * 4);
    out.push_str(&prefix);
    STANDARD.encode_string(&file.bytes, &mut out);
    tracing::debug!(name = %file.name, %mime, bytes = file.len(), "generated preview");
    out
}

/// Pick the MIME type to embed in the data URI.
///
/// Images are content-sniffed so a mislabeled file (a `.jpg` holding
/// PNG data) gets its real subtype. Everything else uses the MIME the
/// file was accepted under.
fn display_mime(file: &RawFile) -> &str {
    if file.mime.starts_with("image/")
        && let Ok(format) = image::guess_format(&file.bytes)
    {
        return format.to_mime_type();
    }
    if file.mime.is_empty() {
        FALLBACK_MIME
    } else {
        &file.mime
    }
}
