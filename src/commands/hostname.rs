//! # Hostname Command Implementation
//!
//! Prints the command a node runs to look up its cloud-assigned hostname.
//! Platforms without one print nothing.

use anyhow::Result;
use clap::Args;
use log::debug;

use registry_mirrors::platform::hostname_command;

/// Print the hostname lookup command for a platform
#[derive(Args, Debug)]
pub struct HostnameArgs {
    /// Platform identifier (e.g. AWS, GCP)
    #[arg(value_name = "PLATFORM")]
    pub platform: String,
}

/// Execute the `hostname-command` command.
pub fn execute(args: HostnameArgs) -> Result<()> {
    let command = hostname_command(&args.platform);
    if command.is_empty() {
        debug!("No hostname command for platform '{}'", args.platform);
    } else {
        println!("{}", command);
    }
    Ok(())
}
