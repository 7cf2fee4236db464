//! Property-based tests for mirror set merging.
//!
//! Sources and hosts are drawn from small pools so that generated inputs
//! overlap heavily and exercise the grouping and deduplication paths.

#[cfg(test)]
mod proptest_tests {
    use crate::config::MirrorSourcePolicy;
    use crate::mirrors::{merge_mirror_sets, merge_mirrors, Mirror, MirrorSet};
    use proptest::prelude::*;

    fn policy() -> impl Strategy<Value = MirrorSourcePolicy> {
        prop_oneof![
            Just(MirrorSourcePolicy::AllowContactingSource),
            Just(MirrorSourcePolicy::NeverContactSource),
        ]
    }

    fn mirror() -> impl Strategy<Value = Mirror> {
        ("[a-d]\\.io(/[xy])?", any::<bool>()).prop_map(|(host, resolve_tags)| Mirror::new(host, resolve_tags))
    }

    fn mirror_set() -> impl Strategy<Value = MirrorSet> {
        ("(quay|mcr|k8s)\\.io", prop::collection::vec(mirror(), 0..4), policy())
            .prop_map(|(source, mirrors, policy)| MirrorSet::new(source, mirrors, policy))
    }

    fn mirror_sets() -> impl Strategy<Value = Vec<MirrorSet>> {
        prop::collection::vec(mirror_set(), 0..8)
    }

    proptest! {
        /// Property: merging is idempotent
        #[test]
        fn merge_is_idempotent(sets in mirror_sets()) {
            let once = merge_mirror_sets(sets);
            let twice = merge_mirror_sets(once.clone());
            prop_assert_eq!(once, twice);
        }

        /// Property: output is sorted by source, mirrors sorted by host, both unique
        #[test]
        fn merge_output_is_sorted_and_unique(sets in mirror_sets()) {
            let merged = merge_mirror_sets(sets);
            for pair in merged.windows(2) {
                prop_assert!(pair[0].source < pair[1].source);
            }
            for set in &merged {
                for pair in set.mirrors.windows(2) {
                    prop_assert!(pair[0].host < pair[1].host);
                }
            }
        }

        /// Property: a single NeverContactSource member forces the merged policy
        #[test]
        fn merge_policy_is_most_restrictive(mut sets in mirror_sets(), position in any::<prop::sample::Index>()) {
            let forced = MirrorSet::new("quay.io", vec![], MirrorSourcePolicy::NeverContactSource);
            let at = position.index(sets.len() + 1);
            sets.insert(at, forced);

            let merged = merge_mirror_sets(sets);
            let quay = merged.iter().find(|s| s.source == "quay.io").unwrap();
            prop_assert_eq!(quay.mirror_source_policy, MirrorSourcePolicy::NeverContactSource);
        }

        /// Property: merging is insensitive to input order
        #[test]
        fn merge_ignores_input_order(sets in mirror_sets()) {
            let mut reversed = sets.clone();
            reversed.reverse();
            prop_assert_eq!(merge_mirror_sets(sets), merge_mirror_sets(reversed));
        }

        /// Property: a host carries resolve_tags after merge iff some input occurrence did
        #[test]
        fn merge_mirrors_ors_resolve_tags(
            a in prop::collection::vec(mirror(), 0..6),
            b in prop::collection::vec(mirror(), 0..6),
        ) {
            let merged = merge_mirrors(&a, &b);
            for mirror in &merged {
                let expected = a.iter().chain(&b).any(|m| m.host == mirror.host && m.resolve_tags);
                prop_assert_eq!(mirror.resolve_tags, expected);
            }
            for m in a.iter().chain(&b) {
                prop_assert_eq!(merged.iter().filter(|x| x.host == m.host).count(), 1);
            }
        }
    }
}
