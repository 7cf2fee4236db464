//! Reference string utilities for mirror rewriting
//!
//! Image references here are `/`-delimited: a registry domain (optionally
//! `host:port`) followed by repository path segments, where the last segment
//! may carry a `:tag` or `@digest`. All functions are total over arbitrary
//! input strings.

/// Remove a leading `<scheme>://` (e.g. `https://`, `docker://`) if present.
///
/// Only a well-formed scheme at the very start is removed; a `://` further
/// into the reference is left alone.
///
/// # Examples
///
/// ```
/// use registry_mirrors::path::strip_scheme;
///
/// assert_eq!(strip_scheme("docker://quay.io/org"), "quay.io/org");
/// assert_eq!(strip_scheme("quay.io/a://b"), "quay.io/a://b");
/// ```
pub fn strip_scheme(reference: &str) -> &str {
    match reference.split_once("://") {
        Some((scheme, rest)) if is_scheme(scheme) => rest,
        _ => reference,
    }
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// The registry domain of a reference: its first `/`-delimited segment.
///
/// Expects a reference without a scheme; see [`strip_scheme`].
pub fn registry_domain(reference: &str) -> &str {
    reference.split('/').next().unwrap_or(reference)
}

/// Compute the minimal mirror-side prefix that replaces the source's
/// domain/namespace while the shared trailing path stays untouched.
///
/// Segments are compared from the end for exact equality, so `name:tag` only
/// matches when the tag matches too. When every mirror segment matches the
/// source's trailing path the mirror needs no rewrite and the result is
/// empty; otherwise the mirror's leading, unmatched segments are returned.
///
/// # Examples
///
/// ```
/// use registry_mirrors::path::rewrite_mirror_prefix;
///
/// assert_eq!(
///     rewrite_mirror_prefix("example.com/path/to/resource", "example.org/path/to/resource"),
///     "example.org"
/// );
/// assert_eq!(rewrite_mirror_prefix("a/b/c", "a/b/c"), "");
/// ```
pub fn rewrite_mirror_prefix(source: &str, mirror: &str) -> String {
    let source_segments: Vec<&str> = source.split('/').collect();
    let mirror_segments: Vec<&str> = mirror.split('/').collect();

    let matched = source_segments
        .iter()
        .rev()
        .zip(mirror_segments.iter().rev())
        .take_while(|(s, m)| s == m)
        .count();

    if matched == mirror_segments.len() {
        return String::new();
    }

    mirror_segments[..mirror_segments.len() - matched].join("/")
}

/// Everything after the registry domain, or an empty string if the
/// reference has no repository path.
///
/// # Examples
///
/// ```
/// use registry_mirrors::path::org_path;
///
/// assert_eq!(org_path("registry.local/org/sub_org"), "org/sub_org");
/// assert_eq!(org_path("registry.local"), "");
/// ```
pub fn org_path(reference: &str) -> &str {
    match reference.split_once('/') {
        Some((_, rest)) => rest,
        None => "",
    }
}
