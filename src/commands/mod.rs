//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `registry-mirrors` command-line tool. Each subcommand is defined in its own
//! file to keep the logic separated and maintainable.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.
//!
//! The `execute` function is the main entry point for the command and is
//! responsible for orchestrating the necessary operations, calling into the
//! `registry_mirrors` library to perform the core logic.

pub mod completions;
pub mod generate;
pub mod hostname;
pub mod mirrors;

use anyhow::Result;
use std::path::PathBuf;

use registry_mirrors::config::{self, MirrorPolicy};

/// Check that every policy file exists, then read them all.
pub(crate) fn load_policy(paths: &[PathBuf]) -> Result<MirrorPolicy> {
    if paths.is_empty() {
        anyhow::bail!("No policy files given; pass at least one --policy <FILE>");
    }
    for path in paths {
        if !path.exists() {
            anyhow::bail!("Policy file not found: {}", path.display());
        }
    }
    Ok(config::from_files(paths)?)
}
