//! Small string helpers shared by the reason and export code paths.

/// Returns at most `max` characters of `input`, never splitting a code point.
pub fn truncate_chars(input: &str, max: usize) -> String {
    match input.char_indices().nth(max) {
        Some((byte_idx, _)) => input[..byte_idx].to_string(),
        None => input.to_string(),
    }
}

/// Trims every item and drops the ones that end up empty.
///
/// Order is preserved, so ordinals assigned afterwards are not shifted by
/// skipped blanks.
pub fn non_blank<S: AsRef<str>>(items: &[S]) -> Vec<&str> {
    items
        .iter()
        .map(|item| item.as_ref().trim())
        .filter(|item| !item.is_empty())
        .collect()
}
