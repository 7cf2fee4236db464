//! # Registry Mirrors Library
//!
//! This library turns cluster image mirroring policy into per-registry
//! `hosts.toml` files for containerd. It is used by the `registry-mirrors`
//! command-line tool but the pipeline is plain data in, text out, and can be
//! embedded anywhere that already holds the policy and pull secret in memory.
//!
//! ## Quick Example
//!
//! ```
//! use registry_mirrors::{config, credentials, mirrors, render};
//!
//! let policy = config::parse(r#"
//! kind: ImageDigestMirrorSet
//! spec:
//!   imageDigestMirrors:
//!     - source: registry.access.redhat.com/ubi9
//!       mirrors: [mirror.example.com/redhat/ubi9]
//! "#).unwrap();
//!
//! let creds = credentials::parse_docker_config(
//!     r#"{"auths":{"mirror.example.com":{"auth":"dXNlcjpwYXNz"}}}"#,
//! ).unwrap();
//!
//! let sets = mirrors::merged_mirror_sets(&policy.image_digest_mirrors, &policy.image_tag_mirrors);
//! let configs = render::render_all(&sets, &creds);
//!
//! let hosts = configs.get("registry.access.redhat.com").unwrap();
//! assert!(hosts.contains(r#"[host."https://mirror.example.com/v2/redhat"]"#));
//! assert!(hosts.contains(r#"authorization = "Basic dXNlcjpwYXNz""#));
//! ```
//!
//! ## Core Concepts
//!
//! - **Policy (`config`)**: digest and tag mirror rules, read from cluster
//!   objects or plain YAML/JSON documents.
//! - **References (`path`)**: scheme stripping, domain extraction, and the
//!   minimal-prefix rewrite that maps a source path onto a mirror.
//! - **Mirror sets (`mirrors`)**: normalization of rules and deterministic
//!   merging into one set per registry domain.
//! - **Rendering (`render`)**: byte-exact `hosts.toml` text per registry,
//!   with credentials from the pull secret (`credentials`).
//! - **Output (`write`)**: the per-registry directory layout on disk.
//!
//! ## Execution Flow
//!
//! 1.  **Parse**: read mirror rules and the pull secret.
//! 2.  **Normalize**: one mirror set per rule, keyed by bare source domain.
//! 3.  **Merge**: one sorted, deduplicated set per domain.
//! 4.  **Render**: one `hosts.toml` stanza per set with mirrors.
//! 5.  **Write**: stage the stanzas to `<dir>/<domain>/hosts.toml`.
//!
//! Steps 2 to 4 perform no I/O and cannot fail.

pub mod config;
pub mod credentials;
pub mod defaults;
pub mod error;
pub mod mirrors;
pub mod path;
pub mod platform;
pub mod render;
pub mod write;

#[cfg(test)]
mod mirrors_proptest;
#[cfg(test)]
mod path_proptest;
