//! # Mirror Policy Schema and Parsing
//!
//! This module defines the input side of the pipeline: the digest- and
//! tag-scoped mirror rules exported from a cluster, and the logic for reading
//! them from YAML or JSON files.
//!
//! ## Accepted Documents
//!
//! A policy file is a YAML stream (JSON is accepted as YAML). Each document
//! may be:
//!
//! 1.  **A cluster object**: `kind: ImageDigestMirrorSet` with
//!     `spec.imageDigestMirrors`, or `kind: ImageTagMirrorSet` with
//!     `spec.imageTagMirrors`.
//!
//! 2.  **A list**: `kind: List` (or any `*List` kind) whose `items` are
//!     cluster objects, as produced by `kubectl get -o yaml`.
//!
//! 3.  **A plain policy**: a mapping without `kind`, carrying top-level
//!     `imageDigestMirrors` and/or `imageTagMirrors` arrays.
//!
//! Objects of any other kind are skipped with a warning so that mixed
//! manifests can be fed in directly.

use crate::error::{Error, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::path::Path;

/// Whether the origin registry may still be contacted when mirrors fail.
///
/// Variants are declared from least to most restrictive; the derived `Ord`
/// follows that order so merging can keep the maximum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MirrorSourcePolicy {
    /// Fall back to the source registry after the mirrors.
    #[default]
    AllowContactingSource,
    /// Only ever pull from the mirrors.
    NeverContactSource,
}

impl MirrorSourcePolicy {
    /// The more restrictive of two policies.
    pub fn most_restrictive(self, other: Self) -> Self {
        self.max(other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MirrorSourcePolicy::AllowContactingSource => "AllowContactingSource",
            MirrorSourcePolicy::NeverContactSource => "NeverContactSource",
        }
    }
}

impl fmt::Display for MirrorSourcePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source registry (or repository) and the mirrors that serve it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorRule {
    /// The reference being mirrored, e.g. `registry.access.redhat.com/ubi9`.
    pub source: String,
    /// Mirror references, in preference order.
    #[serde(default)]
    pub mirrors: Vec<String>,
    /// Absent means the source may be contacted.
    #[serde(default)]
    pub mirror_source_policy: MirrorSourcePolicy,
}

impl MirrorRule {
    pub fn new<S: Into<String>>(source: S, mirrors: &[&str], policy: MirrorSourcePolicy) -> Self {
        Self {
            source: source.into(),
            mirrors: mirrors.iter().map(|m| m.to_string()).collect(),
            mirror_source_policy: policy,
        }
    }
}

/// All mirror rules collected from one or more policy documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MirrorPolicy {
    /// Rules that apply to digest references only.
    #[serde(default)]
    pub image_digest_mirrors: Vec<MirrorRule>,
    /// Rules that also apply to tag references.
    #[serde(default)]
    pub image_tag_mirrors: Vec<MirrorRule>,
}

impl MirrorPolicy {
    pub fn is_empty(&self) -> bool {
        self.image_digest_mirrors.is_empty() && self.image_tag_mirrors.is_empty()
    }

    /// Append another policy's rules after this one's.
    pub fn extend(&mut self, other: MirrorPolicy) {
        self.image_digest_mirrors.extend(other.image_digest_mirrors);
        self.image_tag_mirrors.extend(other.image_tag_mirrors);
    }
}

const DIGEST_MIRROR_SET_KIND: &str = "ImageDigestMirrorSet";
const TAG_MIRROR_SET_KIND: &str = "ImageTagMirrorSet";

/// Parse a YAML (or JSON) policy stream.
pub fn parse(content: &str) -> Result<MirrorPolicy> {
    let mut policy = MirrorPolicy::default();

    for document in serde_yaml::Deserializer::from_str(content) {
        let value = Value::deserialize(document)?;
        collect_document(value, &mut policy)?;
    }

    Ok(policy)
}

fn collect_document(value: Value, policy: &mut MirrorPolicy) -> Result<()> {
    match value {
        Value::Null => Ok(()),
        Value::Mapping(map) => match map.get("kind").and_then(Value::as_str).map(str::to_string) {
            Some(kind) => collect_object(&kind, map, policy),
            None => {
                let plain: MirrorPolicy = serde_yaml::from_value(Value::Mapping(map))?;
                debug!(
                    "Read plain policy with {} digest and {} tag rules",
                    plain.image_digest_mirrors.len(),
                    plain.image_tag_mirrors.len()
                );
                policy.extend(plain);
                Ok(())
            }
        },
        _ => Err(Error::ConfigParse {
            message: "Expected a YAML mapping for each policy document".to_string(),
            hint: Some(
                "Use an ImageDigestMirrorSet/ImageTagMirrorSet object or a mapping with 'imageDigestMirrors'"
                    .to_string(),
            ),
        }),
    }
}

fn collect_object(kind: &str, mut map: Mapping, policy: &mut MirrorPolicy) -> Result<()> {
    match kind {
        DIGEST_MIRROR_SET_KIND => {
            let rules = spec_rules(&mut map, kind, "imageDigestMirrors")?;
            debug!("Read {} with {} rules", kind, rules.len());
            policy.image_digest_mirrors.extend(rules);
            Ok(())
        }
        TAG_MIRROR_SET_KIND => {
            let rules = spec_rules(&mut map, kind, "imageTagMirrors")?;
            debug!("Read {} with {} rules", kind, rules.len());
            policy.image_tag_mirrors.extend(rules);
            Ok(())
        }
        list if list.ends_with("List") => {
            let items = match map.remove("items") {
                Some(Value::Sequence(items)) => items,
                Some(Value::Null) | None => Vec::new(),
                Some(_) => {
                    return Err(Error::ConfigParse {
                        message: format!("'items' of {} must be a sequence", list),
                        hint: None,
                    })
                }
            };
            for item in items {
                collect_document(item, policy)?;
            }
            Ok(())
        }
        other => {
            warn!("Skipping object of unsupported kind '{}'", other);
            Ok(())
        }
    }
}

fn spec_rules(map: &mut Mapping, kind: &str, field: &str) -> Result<Vec<MirrorRule>> {
    let spec = match map.remove("spec") {
        Some(Value::Mapping(spec)) => spec,
        Some(Value::Null) | None => return Ok(Vec::new()),
        Some(_) => {
            return Err(Error::ConfigParse {
                message: format!("'spec' of {} must be a mapping", kind),
                hint: None,
            })
        }
    };

    match spec.get(field) {
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(rules) => serde_yaml::from_value(rules.clone()).map_err(|e| Error::ConfigParse {
            message: format!("Invalid 'spec.{}' in {}: {}", field, kind, e),
            hint: Some("Each rule needs a 'source' and a list of 'mirrors'".to_string()),
        }),
    }
}

/// Read and parse a single policy file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<MirrorPolicy> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Read several policy files, concatenating their rules in order.
pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<MirrorPolicy> {
    let mut policy = MirrorPolicy::default();
    for path in paths {
        policy.extend(from_file(path)?);
    }
    Ok(policy)
}
