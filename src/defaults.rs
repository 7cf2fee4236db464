//! Default values for registry-mirrors.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Name of the file written in each per-registry directory.
pub const HOSTS_FILE_NAME: &str = "hosts.toml";

/// Returns the directory containerd reads per-registry host configuration from.
///
/// - Windows: `C:\k\containerd\registries`
/// - elsewhere: `/etc/containerd/certs.d`
///
/// This can be overridden by the `--output` CLI flag or the
/// `REGISTRY_MIRRORS_OUTPUT` environment variable.
pub fn default_hosts_dir() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(r"C:\k\containerd\registries")
    } else {
        PathBuf::from("/etc/containerd/certs.d")
    }
}

/// Whether `host:port` directories are written as `host_port_` by default.
pub fn default_escape_port() -> bool {
    cfg!(windows)
}
