//! Writing to Disk
//!
//! Persists rendered [`RegistryConfigs`] into the directory layout containerd
//! expects: one directory per source registry holding a `hosts.toml`.
//!
//! ## Process
//!
//! 1.  **Create Directories**: For each registry, creates
//!     `<output>/<host_directory(domain)>` recursively.
//!
//!     Domains that cannot name a single directory (empty, `.`, `..`, or
//!     containing a path separator) are skipped with a warning so nothing is
//!     written outside `<output>`.
//!
//! 2.  **Write Content**: Writes the rendered stanza to `hosts.toml`.
//!
//! 3.  **Prune** (optional): Removes registry directories left over from a
//!     previous run. Only directories that contain a `hosts.toml` are
//!     candidates; anything else in the output directory is left alone.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::defaults::HOSTS_FILE_NAME;
use crate::error::{Error, Result};
use crate::render::RegistryConfigs;

/// Controls how configuration is laid out and cleaned up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Remove registry directories that are no longer configured.
    pub prune: bool,
    /// Write `host:port` registries to `host_port_` directories.
    pub escape_port: bool,
}

/// What a write pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: Vec<PathBuf>,
    pub pruned: Vec<PathBuf>,
    /// Domains left unwritten because they are not a usable directory name.
    pub skipped: Vec<String>,
}

/// Directory name for a registry domain.
///
/// With `escape_port`, the last `:port` becomes `_port_`, the fallback form
/// containerd accepts where `:` is not allowed in file names.
///
/// # Examples
///
/// ```
/// use registry_mirrors::write::host_directory;
///
/// assert_eq!(host_directory("source1.local:5000", true), "source1.local_5000_");
/// assert_eq!(host_directory("source1.local:5000", false), "source1.local:5000");
/// assert_eq!(host_directory("quay.io", true), "quay.io");
/// ```
pub fn host_directory(domain: &str, escape_port: bool) -> String {
    if escape_port {
        if let Some((host, port)) = domain.rsplit_once(':') {
            if !host.is_empty() {
                return format!("{}_{}_", host, port);
            }
        }
    }
    domain.to_string()
}

/// Whether `name` is exactly one normal path component.
fn is_single_component(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Write every rendered config under `output_path`.
pub fn write_configs(
    configs: &RegistryConfigs,
    output_path: &Path,
    options: WriteOptions,
) -> Result<WriteSummary> {
    let mut summary = WriteSummary::default();
    let mut expected = BTreeSet::new();

    for (domain, content) in configs.iter() {
        let dir_name = host_directory(domain, options.escape_port);
        if !is_single_component(&dir_name) {
            warn!(
                "Skipping mirror configuration for '{}': not a valid registry directory name",
                domain
            );
            summary.skipped.push(domain.to_string());
            continue;
        }
        let dir = output_path.join(&dir_name);
        expected.insert(dir_name);

        fs::create_dir_all(&dir).map_err(|e| Error::Filesystem {
            message: format!("Failed to create directory '{}': {}", dir.display(), e),
        })?;

        let file_path = dir.join(HOSTS_FILE_NAME);
        fs::write(&file_path, content).map_err(|e| Error::Filesystem {
            message: format!("Failed to write file '{}': {}", file_path.display(), e),
        })?;

        info!("Wrote mirror configuration for '{}' to {}", domain, file_path.display());
        summary.written.push(file_path);
    }

    if options.prune {
        summary.pruned = prune_stale(output_path, &expected)?;
    }

    Ok(summary)
}

fn prune_stale(output_path: &Path, expected: &BTreeSet<String>) -> Result<Vec<PathBuf>> {
    let mut pruned = Vec::new();

    let entries = match fs::read_dir(output_path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(pruned),
        Err(e) => {
            return Err(Error::Filesystem {
                message: format!("Failed to read directory '{}': {}", output_path.display(), e),
            })
        }
    };

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        if !path.is_dir() || expected.contains(&name) {
            continue;
        }
        if !path.join(HOSTS_FILE_NAME).is_file() {
            debug!("Leaving {} in place: no {}", path.display(), HOSTS_FILE_NAME);
            continue;
        }

        fs::remove_dir_all(&path).map_err(|e| Error::Filesystem {
            message: format!("Failed to remove directory '{}': {}", path.display(), e),
        })?;
        info!("Removed stale mirror configuration {}", path.display());
        pruned.push(path);
    }

    pruned.sort();
    Ok(pruned)
}
