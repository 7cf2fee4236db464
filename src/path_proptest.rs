//! Property-based tests for reference rewriting.
//!
//! These tests use proptest to generate random references and verify that
//! the rewrite invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{org_path, registry_domain, rewrite_mirror_prefix, strip_scheme};
    use proptest::prelude::*;

    /// References built from a tiny alphabet so that shared suffixes are common.
    fn reference() -> impl Strategy<Value = String> {
        prop::collection::vec("[ab]{1,2}", 1..5).prop_map(|segments| segments.join("/"))
    }

    proptest! {
        /// Property: a reference never needs a rewrite onto itself
        #[test]
        fn rewrite_of_identical_references_is_empty(reference in reference()) {
            prop_assert_eq!(rewrite_mirror_prefix(&reference, &reference), "");
        }

        /// Property: prefix joined with the matched trailing segments rebuilds the mirror
        #[test]
        fn rewrite_prefix_reconstructs_mirror(source in reference(), mirror in reference()) {
            let prefix = rewrite_mirror_prefix(&source, &mirror);
            if prefix.is_empty() {
                prop_assert!(
                    source == mirror || source.ends_with(&format!("/{}", mirror)),
                    "empty rewrite requires '{}' to be a trailing path of '{}'",
                    mirror,
                    source
                );
            } else {
                let mirror_segments: Vec<&str> = mirror.split('/').collect();
                let prefix_len = prefix.split('/').count();
                let trailing = mirror_segments[prefix_len..].join("/");
                let rebuilt = if trailing.is_empty() {
                    prefix.clone()
                } else {
                    format!("{}/{}", prefix, trailing)
                };
                prop_assert_eq!(rebuilt, mirror);
            }
        }

        /// Property: the rewrite never ends with a segment shared with the source
        #[test]
        fn rewrite_prefix_excludes_matched_suffix(source in reference(), mirror in reference()) {
            let prefix = rewrite_mirror_prefix(&source, &mirror);
            if !prefix.is_empty() && prefix != mirror {
                let last_prefix = prefix.rsplit('/').next().unwrap();
                let source_segments: Vec<&str> = source.split('/').collect();
                let mirror_segments: Vec<&str> = mirror.split('/').collect();
                let matched = mirror_segments.len() - prefix.split('/').count();
                prop_assert!(matched >= 1);
                // walk stopped on a mismatch unless the source ran out first
                if source_segments.len() > matched {
                    prop_assert_ne!(source_segments[source_segments.len() - matched - 1], last_prefix);
                }
            }
        }

        /// Property: domain and org path together rebuild the reference
        #[test]
        fn domain_and_org_path_rebuild_reference(reference in reference()) {
            let domain = registry_domain(&reference);
            let rest = org_path(&reference);
            let rebuilt = if rest.is_empty() {
                domain.to_string()
            } else {
                format!("{}/{}", domain, rest)
            };
            prop_assert_eq!(rebuilt, reference);
        }

        /// Property: scheme stripping is idempotent on scheme-less references
        #[test]
        fn strip_scheme_is_idempotent(reference in reference()) {
            let with_scheme = format!("docker://{}", reference);
            prop_assert_eq!(strip_scheme(&with_scheme), reference.as_str());
            prop_assert_eq!(strip_scheme(strip_scheme(&with_scheme)), reference.as_str());
        }
    }
}
