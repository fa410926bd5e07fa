//! File-name slugs derived from original URLs.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::utils::text::truncate_chars;

/// Runs of characters not allowed in a slug.
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_-]+").unwrap());

const MAX_SLUG_CHARS: usize = 40;
const FALLBACK_SLUG: &str = "qrcode";

/// Builds a file-system safe slug from the last non-empty path segment of `original`.
///
/// Falls back to the host when the path is empty and to `"qrcode"` when
/// nothing usable remains.
pub fn slug_from_url(original: &str) -> String {
    let candidate = Url::parse(original.trim())
        .ok()
        .and_then(|url| {
            let segment = url
                .path_segments()
                .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
                .map(|s| {
                    urlencoding::decode(s)
                        .map(|decoded| decoded.into_owned())
                        .unwrap_or_else(|_| s.to_string())
                });
            segment.or_else(|| url.host_str().map(str::to_string))
        })
        .unwrap_or_default();

    let lowered = candidate.to_lowercase();
    let replaced = DISALLOWED.replace_all(&lowered, "-");
    let trimmed = replaced.trim_matches('-');
    let slug = truncate_chars(trimmed, MAX_SLUG_CHARS);
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}
