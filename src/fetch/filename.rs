//! Filename resolution for fetched images.
//!
//! Names come from the URL's last path segment, then from a
//! `Content-Disposition` header, and otherwise from a generated substitute
//! (`image_<secs>_<hex>.<ext>`). The chosen name is then disambiguated against
//! the destination directory with a `(n)` suffix so nothing is overwritten.

use std::path::{Component, Path};

use rand::Rng;
use reqwest::header::{CONTENT_DISPOSITION, HeaderMap};
use tracing::debug;
use url::Url;

use super::constants::{MAX_DISAMBIGUATOR, MAX_FILENAME_BYTES, SUBSTITUTE_PREFIX};
use super::validator::ImageFormat;

/// Resolves the filename an image will be written under inside `dir`.
///
/// The returned value is a single path component that does not yet exist in
/// `dir` at the time of the call.
#[must_use]
pub fn resolve_filename(url: &Url, headers: &HeaderMap, format: ImageFormat, dir: &Path) -> String {
    let candidate = candidate_filename(url, headers, format);
    disambiguate(dir, &candidate)
}

/// Picks a base filename without looking at the directory.
pub(crate) fn candidate_filename(url: &Url, headers: &HeaderMap, format: ImageFormat) -> String {
    if let Some(name) = filename_from_url(url) {
        return name;
    }

    if let Some(name) = headers
        .get(CONTENT_DISPOSITION)
        .and_then(|cd| cd.to_str().ok())
        .and_then(parse_content_disposition)
        .and_then(|name| usable_filename(&name))
    {
        debug!(filename = %name, "using Content-Disposition filename");
        return name;
    }

    let generated = substitute_filename(format);
    debug!(filename = %generated, "generated substitute filename");
    generated
}

/// Usable filename from the URL's last path segment, percent-decoded.
pub(crate) fn filename_from_url(url: &Url) -> Option<String> {
    let last = url.path_segments()?.next_back()?;
    if last.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(last).unwrap_or_else(|e| {
        debug!(
            segment = %last,
            error = %e,
            "URL decoding failed, using raw segment"
        );
        last.into()
    });
    usable_filename(&decoded)
}

/// Returns the name with reserved characters replaced, or `None` if it cannot
/// be used as-is (empty, no extension, separators or control characters, dot
/// segment, too long).
pub(crate) fn usable_filename(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() || name.len() > MAX_FILENAME_BYTES {
        return None;
    }
    if name.chars().any(|c| c == '/' || c == '\\' || c.is_control()) {
        return None;
    }
    if !is_safe_filename_segment(name) || !has_extension(name) {
        return None;
    }
    Some(replace_reserved_chars(name))
}

/// Generates `image_<unix secs>_<6 hex digits><ext>`.
pub(crate) fn substitute_filename(format: ImageFormat) -> String {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let token: u32 = rand::thread_rng().gen_range(0..0x0100_0000);
    format!(
        "{SUBSTITUTE_PREFIX}{timestamp}_{token:06x}{}",
        format.extension()
    )
}

/// Returns `name` if unused in `dir`, else the first free `stem(n).ext`.
pub(crate) fn disambiguate(dir: &Path, name: &str) -> String {
    if !is_taken(&dir.join(name)) {
        return name.to_string();
    }

    let (stem, ext) = split_extension(name);
    for i in 1..=MAX_DISAMBIGUATOR {
        let candidate = format!("{stem}({i}){ext}");
        if !is_taken(&dir.join(&candidate)) {
            return candidate;
        }
    }

    // Fallback (extremely unlikely): a fresh random token keeps the extension.
    let token: u32 = rand::thread_rng().gen_range(0..=u32::MAX);
    format!("{stem}_{token:08x}{ext}")
}

/// Whether anything, including a dangling symlink, occupies `path`.
fn is_taken(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Parses Content-Disposition header to extract filename.
///
/// Handles both:
/// - `attachment; filename="example.png"`
/// - `attachment; filename=example.png`
/// - `attachment; filename*=UTF-8''example.png` (RFC 5987)
pub(crate) fn parse_content_disposition(header: &str) -> Option<String> {
    // Try filename*= first (RFC 5987 encoded)
    if let Some(pos) = header.find("filename*=") {
        let value = header[pos + 10..].trim();
        // Format: charset'language'encoded_value
        if let Some(quote_pos) = value.find("''") {
            let encoded = &value[quote_pos + 2..];
            let end = encoded.find(';').unwrap_or(encoded.len());
            if let Ok(decoded) = urlencoding::decode(encoded[..end].trim()) {
                return Some(decoded.into_owned());
            }
        }
    }

    let pos = header.find("filename=")?;
    let value = header[pos + 9..].trim();

    if let Some(stripped) = value.strip_prefix('"') {
        let end = stripped.find('"')?;
        return Some(stripped[..end].to_string());
    }

    // Unquoted - take until ; or end
    let end = value.find(';').unwrap_or(value.len());
    let filename = value[..end].trim();
    (!filename.is_empty()).then(|| filename.to_string())
}

fn replace_reserved_chars(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

fn has_extension(name: &str) -> bool {
    name.rfind('.')
        .is_some_and(|pos| pos > 0 && pos + 1 < name.len())
}

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(pos) if pos > 0 => (&name[..pos], &name[pos..]),
        _ => (name, ""),
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
