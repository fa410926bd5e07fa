//! Short-link address handling.

/// Extracts the provider address from a short-link reference.
///
/// When the reference contains the provider domain followed by a slash
/// (`https://sv.link/xyz`, `sv.link/xyz`), the text after the last `/` is the
/// address. Anything else is treated as a bare address already.
///
/// # Examples
///
/// ```
/// use sv_link_batch::utils::address::extract_address;
///
/// assert_eq!(extract_address("https://sv.link/xyz", "sv.link"), "xyz");
/// assert_eq!(extract_address("xyz", "sv.link"), "xyz");
/// ```
pub fn extract_address<'a>(reference: &'a str, domain: &str) -> &'a str {
    let reference = reference.trim();
    let marker = format!("{}/", domain.trim_end_matches('/'));

    if !reference.contains(&marker) {
        return reference;
    }

    reference
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(reference)
}

/// Prefixes `https://` to a provider-returned link that carries no scheme.
pub fn ensure_scheme(link: &str) -> String {
    let has_scheme = ["http://", "https://"].iter().any(|scheme| {
        link.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });
    if has_scheme {
        link.to_string()
    } else {
        format!("https://{}", link.trim_start_matches('/'))
    }
}
