//! # Mirror Sets
//!
//! Digest and tag mirror rules arrive in heterogeneous shapes: sources may
//! carry a scheme or a repository path, several rules may target the same
//! registry, and the same mirror may be granted different capabilities by
//! different rules. This module reduces them to one [`MirrorSet`] per registry
//! domain.
//!
//! ## Pipeline
//!
//! 1.  **Normalize** ([`normalize`]): each rule becomes a `MirrorSet` keyed by
//!     the bare source domain, with every mirror reduced to the minimal prefix
//!     that differs from the source path.
//! 2.  **Merge** ([`merge`]): sets sharing a domain are folded together; the
//!     most restrictive policy wins and duplicate mirrors keep tag resolution
//!     if any rule granted it. Output is sorted by domain and by mirror host.
//!
//! Every step is a pure function of its input; identical input always yields
//! identical, identically ordered output.

pub mod merge;
pub mod normalize;

use serde::Serialize;

use crate::config::{MirrorRule, MirrorSourcePolicy};

pub use merge::{merge_mirror_sets, merge_mirrors};
pub use normalize::normalize_rules;

/// A single mirror location for a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mirror {
    /// Domain, optionally followed by the repository path that replaces the
    /// source's namespace. Never carries a scheme.
    pub host: String,
    /// Set for mirrors derived from tag rules: they may resolve tags as well
    /// as serve pulls.
    pub resolve_tags: bool,
}

impl Mirror {
    pub fn new<S: Into<String>>(host: S, resolve_tags: bool) -> Self {
        Self {
            host: host.into(),
            resolve_tags,
        }
    }
}

/// All mirrors configured for one source registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorSet {
    /// Bare registry domain after normalization.
    pub source: String,
    pub mirrors: Vec<Mirror>,
    pub mirror_source_policy: MirrorSourcePolicy,
}

impl MirrorSet {
    pub fn new<S: Into<String>>(
        source: S,
        mirrors: Vec<Mirror>,
        mirror_source_policy: MirrorSourcePolicy,
    ) -> Self {
        Self {
            source: source.into(),
            mirrors,
            mirror_source_policy,
        }
    }
}

/// Normalize digest and tag rules and merge them into one sorted set per
/// registry domain.
///
/// # Examples
///
/// ```
/// use registry_mirrors::config::{MirrorRule, MirrorSourcePolicy};
/// use registry_mirrors::mirrors::merged_mirror_sets;
///
/// let digest = vec![MirrorRule::new(
///     "registry.k8s.io/sig-storage/csi-provisioner",
///     &["mirror.local:5000/sig-storage/csi-provisioner"],
///     MirrorSourcePolicy::AllowContactingSource,
/// )];
/// let sets = merged_mirror_sets(&digest, &[]);
/// assert_eq!(sets[0].source, "registry.k8s.io");
/// assert_eq!(sets[0].mirrors[0].host, "mirror.local:5000");
/// ```
pub fn merged_mirror_sets(digest_rules: &[MirrorRule], tag_rules: &[MirrorRule]) -> Vec<MirrorSet> {
    merge_mirror_sets(normalize_rules(digest_rules, tag_rules))
}
