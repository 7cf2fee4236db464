//! Generate command implementation
//!
//! The generate command runs the whole pipeline:
//! 1. Reading digest and tag mirror rules from the policy files
//! 2. Reading registry credentials from the pull secret (optional)
//! 3. Normalizing and merging rules into one mirror set per registry
//! 4. Rendering a hosts.toml stanza per registry
//! 5. Writing the stanzas to disk, or printing them with `--dry-run`

use anyhow::Result;
use clap::Args;
use log::info;
use std::path::PathBuf;

use registry_mirrors::credentials::{self, Credentials};
use registry_mirrors::defaults::{default_escape_port, default_hosts_dir};
use registry_mirrors::mirrors::merged_mirror_sets;
use registry_mirrors::render::{render_all, RegistryConfigs};
use registry_mirrors::write::{write_configs, WriteOptions};

use super::load_policy;

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Mirror policy file (ImageDigestMirrorSet, ImageTagMirrorSet, List, or plain policy)
    #[arg(
        short,
        long = "policy",
        value_name = "FILE",
        env = "REGISTRY_MIRRORS_POLICY",
        value_delimiter = ',',
        required = true
    )]
    pub policies: Vec<PathBuf>,

    /// Pull secret with registry credentials (auths document or Secret manifest)
    #[arg(long, value_name = "FILE", env = "REGISTRY_MIRRORS_PULL_SECRET")]
    pub pull_secret: Option<PathBuf>,

    /// Directory to write per-registry hosts.toml files into
    #[arg(short, long, value_name = "DIR", env = "REGISTRY_MIRRORS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Print the rendered configuration instead of writing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Remove registry directories that are no longer configured
    #[arg(long)]
    pub prune: bool,

    /// Write host:port registries to host_port_ directories
    #[arg(long)]
    pub escape_port: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the generate command
pub fn execute(args: GenerateArgs) -> Result<()> {
    let policy = load_policy(&args.policies)?;

    let creds = match &args.pull_secret {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Pull secret not found: {}", path.display());
            }
            credentials::from_file(path)?
        }
        None => Credentials::new(),
    };

    let sets = merged_mirror_sets(&policy.image_digest_mirrors, &policy.image_tag_mirrors);
    let configs = render_all(&sets, &creds);
    info!(
        "Rendered {} of {} registries from {} digest and {} tag rules",
        configs.len(),
        sets.len(),
        policy.image_digest_mirrors.len(),
        policy.image_tag_mirrors.len()
    );

    if args.dry_run {
        print!("{}", format_dry_run(&configs));
        return Ok(());
    }

    let output_dir = args.output.unwrap_or_else(default_hosts_dir);
    let options = WriteOptions {
        prune: args.prune,
        escape_port: args.escape_port || default_escape_port(),
    };
    let summary = write_configs(&configs, &output_dir, options)?;

    if !args.quiet {
        println!(
            "Wrote {} registry configuration(s) to {}",
            summary.written.len(),
            output_dir.display()
        );
        for path in &summary.pruned {
            println!("Removed stale configuration {}", path.display());
        }
    }

    Ok(())
}

/// Each config under a `# <domain>` header, separated by blank lines.
fn format_dry_run(configs: &RegistryConfigs) -> String {
    configs
        .iter()
        .map(|(domain, content)| format!("# {}\n{}", domain, content))
        .collect::<Vec<_>>()
        .join("\n")
}
