//! # Registry Credentials
//!
//! Reads registry credentials from a pull secret and reduces them to a map
//! from bare registry domain to a pre-encoded basic-auth token, which is what
//! the renderer looks mirrors up in.
//!
//! Two input shapes are accepted:
//!
//! - A registry-credentials document: `{"auths": {"<registry>": {"auth": "<base64>"}}}`.
//! - A `kubernetes.io/dockerconfigjson` Secret manifest (YAML or JSON) with the
//!   document base64-encoded under `data[".dockerconfigjson"]`, or in plain
//!   text under `stringData[".dockerconfigjson"]`.

use std::collections::BTreeMap;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, warn};
use serde::Deserialize;
use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::path::{registry_domain, strip_scheme};

/// Bare registry domain → basic-auth token.
pub type Credentials = BTreeMap<String, String>;

/// Key under which a Secret stores the credentials document.
pub const DOCKER_CONFIG_JSON_KEY: &str = ".dockerconfigjson";

#[derive(Debug, Deserialize)]
struct DockerConfigJson {
    #[serde(default)]
    auths: BTreeMap<String, DockerConfigEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct DockerConfigEntry {
    #[serde(default)]
    auth: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl DockerConfigEntry {
    fn token(&self) -> Option<String> {
        match (&self.auth, &self.username, &self.password) {
            (Some(auth), _, _) if !auth.is_empty() => Some(auth.clone()),
            (_, Some(username), Some(password)) => {
                Some(STANDARD.encode(format!("{}:{}", username, password)))
            }
            _ => None,
        }
    }
}

/// Parse a registry-credentials JSON document.
///
/// Keys are reduced to bare domains. URL keys (`https://index.docker.io/v1/`)
/// name a registry endpoint and reduce to their host. Repository-scoped keys
/// (`quay.io/org`) are skipped: their token only holds for that repository and
/// must not be sent to every mirror on the same domain. A key that already is
/// a bare domain takes precedence over a URL key for the same host.
///
/// # Examples
///
/// ```
/// use registry_mirrors::credentials::parse_docker_config;
///
/// let creds = parse_docker_config(r#"{"auths":{"mirror.example.com":{"auth":"dXNlcjpwYXNz"}}}"#).unwrap();
/// assert_eq!(creds["mirror.example.com"], "dXNlcjpwYXNz");
/// ```
pub fn parse_docker_config(json: &str) -> Result<Credentials> {
    let config: DockerConfigJson = serde_json::from_str(json)?;
    let mut credentials = Credentials::new();
    let mut derived: Vec<(String, String)> = Vec::new();

    for (key, entry) in &config.auths {
        let Some(token) = entry.token() else {
            warn!("Skipping credentials for '{}': no auth or username/password", key);
            continue;
        };

        let Some(domain) = credential_domain(key) else {
            debug!("Skipping repository-scoped credentials for '{}'", key);
            continue;
        };
        let domain = domain.to_string();
        if domain == key.as_str() {
            credentials.insert(domain, token);
        } else {
            derived.push((domain, token));
        }
    }

    for (domain, token) in derived {
        credentials.entry(domain).or_insert(token);
    }

    debug!("Loaded credentials for {} registries", credentials.len());
    Ok(credentials)
}

/// The registry domain a credential key applies to, or `None` for a key
/// scoped to a repository path.
fn credential_domain(key: &str) -> Option<&str> {
    let unschemed = strip_scheme(key);
    if unschemed.len() != key.len() {
        return Some(registry_domain(unschemed));
    }
    let trimmed = key.trim_end_matches('/');
    if trimmed.contains('/') {
        None
    } else {
        Some(trimmed)
    }
}

/// Parse either a credentials document or a Secret manifest wrapping one.
pub fn parse_pull_secret(content: &str) -> Result<Credentials> {
    let value: Value = serde_yaml::from_str(content)?;

    if value.get("auths").is_some() {
        return parse_docker_config(&serde_json::to_string(&value)?);
    }

    if let Some(encoded) = value
        .get("data")
        .and_then(|data| data.get(DOCKER_CONFIG_JSON_KEY))
        .and_then(Value::as_str)
    {
        let decoded = STANDARD.decode(encoded.trim())?;
        let json = String::from_utf8(decoded).map_err(|e| Error::PullSecret {
            message: format!("{} is not valid UTF-8: {}", DOCKER_CONFIG_JSON_KEY, e),
        })?;
        return parse_docker_config(&json);
    }

    if let Some(json) = value
        .get("stringData")
        .and_then(|data| data.get(DOCKER_CONFIG_JSON_KEY))
        .and_then(Value::as_str)
    {
        return parse_docker_config(json);
    }

    Err(Error::PullSecret {
        message: format!(
            "expected an 'auths' document or a Secret with a '{}' key",
            DOCKER_CONFIG_JSON_KEY
        ),
    })
}

/// Read and parse a pull secret file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Credentials> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse_pull_secret(&content)
}
