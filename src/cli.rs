//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Registry Mirrors - Render image mirror policy as containerd hosts.toml files
#[derive(Parser, Debug)]
#[command(name = "registry-mirrors")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render mirror policy and write one hosts.toml per registry
    Generate(commands::generate::GenerateArgs),

    /// Print the merged mirror sets without rendering them
    Mirrors(commands::mirrors::MirrorsArgs),

    /// Print the hostname lookup command for a platform
    HostnameCommand(commands::hostname::HostnameArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .target(env_logger::Target::Stderr)
            .init();

        match self.command {
            Commands::Generate(args) => commands::generate::execute(args),
            Commands::Mirrors(args) => commands::mirrors::execute(args),
            Commands::HostnameCommand(args) => commands::hostname::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
