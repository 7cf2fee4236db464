//! Platform-specific hostname lookup commands.

/// Command a Windows node runs to obtain its cloud-assigned hostname.
///
/// Only `AWS` and `GCP` need one; every other platform identifier, including
/// the empty string, yields an empty command.
pub fn hostname_command(platform: &str) -> &'static str {
    match platform {
        "AWS" => "Get-EC2InstanceMetadata -Category LocalHostname",
        "GCP" => r"C:\Temp\gcp-get-hostname.ps1",
        _ => "",
    }
}
