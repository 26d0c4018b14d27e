//! Content validation: decides from response headers whether a payload is an
//! acceptable image within the size ceiling.
//!
//! The declared `Content-Length` check here is only a cheap pre-check. The
//! streaming byte count in the client is the authoritative backstop when the
//! header is absent or understated.

use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap};

use super::config::ValidationPolicy;
use super::error::Rejection;

/// Image formats the fetcher can accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
    Bmp,
    Svg,
}

impl ImageFormat {
    /// Every supported format, in allow-list order.
    pub const ALL: [Self; 6] = [
        Self::Jpeg,
        Self::Png,
        Self::Gif,
        Self::Webp,
        Self::Bmp,
        Self::Svg,
    ];

    /// Parses a `Content-Type` value, ignoring case and parameters.
    ///
    /// `image/jpg` is accepted as a common misspelling of `image/jpeg`.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match mime_essence(content_type).as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            "image/bmp" => Some(Self::Bmp),
            "image/svg+xml" => Some(Self::Svg),
            _ => None,
        }
    }

    /// Canonical MIME type.
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Bmp => "image/bmp",
            Self::Svg => "image/svg+xml",
        }
    }

    /// File extension including the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => ".jpg",
            Self::Png => ".png",
            Self::Gif => ".gif",
            Self::Webp => ".webp",
            Self::Bmp => ".bmp",
            Self::Svg => ".svg",
        }
    }
}

/// Validates the headers of a full GET response.
///
/// # Errors
///
/// Returns a [`Rejection`] if the content type is missing or not allowed, or if
/// the declared length exceeds `policy.max_bytes`.
pub fn validate(headers: &HeaderMap, policy: &ValidationPolicy) -> Result<ImageFormat, Rejection> {
    let Some(content_type) = content_type(headers) else {
        return Err(Rejection::MissingContentType);
    };
    let format = check_content_type(&content_type, policy)?;
    check_declared_length(headers, policy)?;
    Ok(format)
}

/// Validates the headers of a HEAD probe.
///
/// Same rules as [`validate`], except that a missing content type is
/// inconclusive (`Ok(None)`) since many servers trim HEAD responses.
///
/// # Errors
///
/// Returns a [`Rejection`] for a declared disallowed type or oversize length.
pub fn validate_probe(
    headers: &HeaderMap,
    policy: &ValidationPolicy,
) -> Result<Option<ImageFormat>, Rejection> {
    check_declared_length(headers, policy)?;
    content_type(headers)
        .map(|value| check_content_type(&value, policy))
        .transpose()
}

/// Parsed `Content-Length`, if present and numeric.
pub(crate) fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

fn content_type(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_TYPE)?;
    let text = String::from_utf8_lossy(value.as_bytes()).trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn check_content_type(content_type: &str, policy: &ValidationPolicy) -> Result<ImageFormat, Rejection> {
    ImageFormat::from_content_type(content_type)
        .filter(|format| policy.allows(*format))
        .ok_or_else(|| Rejection::UnsupportedContentType(content_type.to_string()))
}

fn check_declared_length(headers: &HeaderMap, policy: &ValidationPolicy) -> Result<(), Rejection> {
    match declared_length(headers) {
        Some(declared) if declared > policy.max_bytes => Err(Rejection::DeclaredSizeExceedsLimit {
            declared,
            limit: policy.max_bytes,
        }),
        _ => Ok(()),
    }
}

fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}
