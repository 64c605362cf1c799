//! Public URL construction.
//!
//! Bucket ids and bucket paths are stored decoded. They are encoded only
//! here, one `/`-delimited segment at a time, so separators survive while
//! every reserved character inside a segment is escaped.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Escaped inside a segment: everything except ALPHA / DIGIT / `-` `.` `_` `~`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a single path segment (`/` is escaped too).
#[inline]
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Percent-encode a `/`-separated path segment by segment.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

/// Build `{base}/{bucket}/{path}` with the bucket id and every path segment
/// encoded independently.
///
/// # Example
/// ```ignore
/// build_public_url("https://x.supabase.co/storage/v1/object/public", "Tours", "Open Tours/photo 1.jpg")
///     -> "https://x.supabase.co/storage/v1/object/public/Tours/Open%20Tours/photo%201.jpg"
/// ```
pub fn build_public_url(base: &str, bucket: &str, bucket_path: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        encode_segment(bucket),
        encode_path(bucket_path)
    )
}
