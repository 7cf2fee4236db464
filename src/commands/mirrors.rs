//! # Mirrors Command Implementation
//!
//! Prints the merged mirror sets for a set of policy files, before any
//! credentials or rendering are involved. Useful for checking how overlapping
//! rules were folded together and which mirror a `NeverContactSource`
//! registry will promote to its default server.

use anyhow::Result;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use registry_mirrors::mirrors::{merged_mirror_sets, MirrorSet};

use super::load_policy;

/// Output encodings for merged mirror sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Print the merged mirror sets
#[derive(Args, Debug)]
pub struct MirrorsArgs {
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

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

/// Execute the `mirrors` command.
pub fn execute(args: MirrorsArgs) -> Result<()> {
    let policy = load_policy(&args.policies)?;
    let sets = merged_mirror_sets(&policy.image_digest_mirrors, &policy.image_tag_mirrors);
    print!("{}", format_sets(&sets, args.format)?);
    Ok(())
}

fn format_sets(sets: &[MirrorSet], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Yaml => serde_yaml::to_string(sets)?,
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(sets)?),
    })
}
