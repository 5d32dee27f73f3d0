//! Content-type sniffing for response bodies written without one

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const TEXT_HTML: &str = "text/html; charset=utf-8";
const OCTET_STREAM: &str = "application/octet-stream";

// Binary signatures checked against the start of the body.
const SIGNATURES: &[(&[u8], &str)] = &[
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"\xFF\xD8\xFF", "image/jpeg"),
    (b"%PDF-", "application/pdf"),
    (b"\x1F\x8B\x08", "application/x-gzip"),
    (b"PK\x03\x04", "application/zip"),
];

const HTML_PREFIXES: &[&[u8]] = &[b"<!doctype html", b"<html", b"<head", b"<body"];

/// Guesses a content type from the leading bytes of a body.
///
/// Empty and UTF-8 bodies are plain text unless they open with an HTML tag;
/// anything unrecognised is `application/octet-stream`.
#[must_use]
pub fn detect_content_type(body: &[u8]) -> &'static str {
    if let Some((_, mime)) = SIGNATURES.iter().find(|(sig, _)| body.starts_with(sig)) {
        return *mime;
    }

    let start = body
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(body.len());
    let trimmed = &body[start..];
    if HTML_PREFIXES.iter().any(|prefix| starts_with_ignore_case(trimmed, prefix)) {
        return TEXT_HTML;
    }

    if std::str::from_utf8(body).is_ok() {
        TEXT_PLAIN
    } else {
        OCTET_STREAM
    }
}

fn starts_with_ignore_case(haystack: &[u8], prefix: &[u8]) -> bool {
    haystack.len() >= prefix.len() && haystack[..prefix.len()].eq_ignore_ascii_case(prefix)
}
