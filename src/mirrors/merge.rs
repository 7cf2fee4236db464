//! Mirror set merging
//!
//! Folds normalized sets that share a source domain into one. The result is
//! deterministic and idempotent: sets are ordered by `source`, each set's
//! mirrors by `host`, and merging an already merged list is a no-op.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use super::{Mirror, MirrorSet};

/// Union two mirror lists by host.
///
/// First-seen order is kept. A host present in both lists keeps tag
/// resolution if either occurrence has it.
pub fn merge_mirrors(a: &[Mirror], b: &[Mirror]) -> Vec<Mirror> {
    let mut merged: Vec<Mirror> = Vec::with_capacity(a.len() + b.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for mirror in a.iter().chain(b) {
        match index.get(&mirror.host) {
            Some(&position) => merged[position].resolve_tags |= mirror.resolve_tags,
            None => {
                index.insert(mirror.host.clone(), merged.len());
                merged.push(mirror.clone());
            }
        }
    }

    merged
}

/// Merge sets by exact `source`, then sort.
///
/// The merged policy is the most restrictive of the group's policies.
pub fn merge_mirror_sets(sets: Vec<MirrorSet>) -> Vec<MirrorSet> {
    let mut groups: BTreeMap<String, MirrorSet> = BTreeMap::new();

    for set in sets {
        match groups.get_mut(&set.source) {
            Some(group) => {
                group.mirror_source_policy = group
                    .mirror_source_policy
                    .most_restrictive(set.mirror_source_policy);
                group.mirrors = merge_mirrors(&group.mirrors, &set.mirrors);
            }
            None => {
                // fold against an empty list so duplicates within one set collapse too
                let mirrors = merge_mirrors(&[], &set.mirrors);
                groups.insert(
                    set.source.clone(),
                    MirrorSet::new(set.source, mirrors, set.mirror_source_policy),
                );
            }
        }
    }

    groups
        .into_values()
        .map(|mut set| {
            set.mirrors.sort_by(|a, b| a.host.cmp(&b.host));
            debug!(
                "Merged {} mirror(s) for '{}' ({})",
                set.mirrors.len(),
                set.source,
                set.mirror_source_policy
            );
            set
        })
        .collect()
}
