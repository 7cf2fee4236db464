//! # Hosts Configuration Rendering
//!
//! Serializes a merged [`MirrorSet`] into the `hosts.toml` format read by
//! containerd's registry host resolution. The layout is fixed: a top-level
//! `server`, a top-level `override_path`, then one `[host."<url>"]` block per
//! mirror in sorted order, each optionally followed by a nested `.header`
//! table carrying the mirror's basic-auth credentials.
//!
//! ```text
//! server = "https://registry.access.redhat.com/v2"
//!
//! override_path = true
//!
//! [host."https://mirror.example.com/v2/redhat"]
//!   capabilities = ["pull"]
//!   override_path = true
//!   [host."https://mirror.example.com/v2/redhat".header]
//!     authorization = "Basic dXNlcjpwYXNz"
//! ```
//!
//! The text is built by hand rather than through a TOML serializer because
//! the consumer's expected indentation and table order must be reproduced
//! byte for byte.

use std::collections::BTreeMap;

use crate::config::MirrorSourcePolicy;
use crate::credentials::Credentials;
use crate::mirrors::{Mirror, MirrorSet};
use crate::path::{org_path, registry_domain};

/// Rendered configuration keyed by source registry domain.
///
/// Entries are kept sorted by domain; empty renders are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryConfigs {
    configs: BTreeMap<String, String>,
}

impl RegistryConfigs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a rendered config. Empty content is ignored.
    pub fn insert<S: Into<String>>(&mut self, domain: S, content: String) {
        if !content.is_empty() {
            self.configs.insert(domain.into(), content);
        }
    }

    pub fn get(&self, domain: &str) -> Option<&str> {
        self.configs.get(domain).map(String::as_str)
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.configs.contains_key(domain)
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.configs.iter().map(|(d, c)| (d.as_str(), c.as_str()))
    }
}

/// The `/v2` endpoint URL for a mirror host.
///
/// # Examples
///
/// ```
/// use registry_mirrors::render::mirror_url;
///
/// assert_eq!(mirror_url("example.io/example"), "https://example.io/v2/example");
/// assert_eq!(mirror_url("mirror.example.net"), "https://mirror.example.net/v2");
/// ```
pub fn mirror_url(host: &str) -> String {
    let domain = registry_domain(host);
    match org_path(host) {
        "" if !host.contains('/') => format!("https://{}/v2", domain),
        path => format!("https://{}/v2/{}", domain, path),
    }
}

fn capabilities(mirror: &Mirror) -> &'static str {
    if mirror.resolve_tags {
        r#"["pull", "resolve"]"#
    } else {
        r#"["pull"]"#
    }
}

/// Render one merged set. Returns an empty string when there are no mirrors.
///
/// With [`MirrorSourcePolicy::NeverContactSource`] the first mirror stands in
/// as the default server; it is still emitted as its own host block.
pub fn render_hosts_config(set: &MirrorSet, credentials: &Credentials) -> String {
    let Some(first) = set.mirrors.first() else {
        return String::new();
    };

    let server = match set.mirror_source_policy {
        MirrorSourcePolicy::AllowContactingSource => format!("https://{}/v2", set.source),
        MirrorSourcePolicy::NeverContactSource => mirror_url(&first.host),
    };

    let mut out = String::new();
    out.push_str(&format!("server = \"{}\"\n", server));
    out.push('\n');
    out.push_str("override_path = true\n");

    for mirror in &set.mirrors {
        let url = mirror_url(&mirror.host);
        out.push('\n');
        out.push_str(&format!("[host.\"{}\"]\n", url));
        out.push_str(&format!("  capabilities = {}\n", capabilities(mirror)));
        out.push_str("  override_path = true\n");

        if let Some(token) = credentials.get(registry_domain(&mirror.host)) {
            out.push_str(&format!("  [host.\"{}\".header]\n", url));
            out.push_str(&format!("    authorization = \"Basic {}\"\n", token));
        }
    }

    out
}

/// Render every set, skipping the ones with nothing to configure.
pub fn render_all(sets: &[MirrorSet], credentials: &Credentials) -> RegistryConfigs {
    let mut configs = RegistryConfigs::new();
    for set in sets {
        configs.insert(set.source.as_str(), render_hosts_config(set, credentials));
    }
    configs
}
