//! Rule normalization
//!
//! Turns each raw mirror rule into a [`MirrorSet`] keyed by its bare source
//! domain. Rules are not merged here; one set is produced per input rule,
//! digest rules first, then tag rules.

use log::debug;

use super::{Mirror, MirrorSet};
use crate::config::MirrorRule;
use crate::path::{registry_domain, rewrite_mirror_prefix, strip_scheme};

/// Normalize digest rules followed by tag rules.
///
/// Mirrors from tag rules are marked with `resolve_tags`.
pub fn normalize_rules(digest_rules: &[MirrorRule], tag_rules: &[MirrorRule]) -> Vec<MirrorSet> {
    digest_rules
        .iter()
        .map(|rule| normalize_rule(rule, false))
        .chain(tag_rules.iter().map(|rule| normalize_rule(rule, true)))
        .collect()
}

/// Normalize a single rule.
pub fn normalize_rule(rule: &MirrorRule, resolve_tags: bool) -> MirrorSet {
    let source = strip_scheme(&rule.source);

    let mirrors = rule
        .mirrors
        .iter()
        .map(|mirror| {
            let mirror = strip_scheme(mirror);
            let prefix = rewrite_mirror_prefix(source, mirror);
            // an exact match keeps the literal mirror
            let host = if prefix.is_empty() {
                mirror.to_string()
            } else {
                prefix
            };
            Mirror::new(host, resolve_tags)
        })
        .collect::<Vec<_>>();

    debug!(
        "Normalized {} rule '{}' to {} mirror(s) for '{}'",
        if resolve_tags { "tag" } else { "digest" },
        rule.source,
        mirrors.len(),
        registry_domain(source)
    );

    MirrorSet::new(registry_domain(source), mirrors, rule.mirror_source_policy)
}
