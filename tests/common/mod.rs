//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_policy(policies::DIGEST_AND_TAG);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::policies;
    #[allow(unused_imports)]
    pub use super::PULL_SECRET;
    pub use super::TestFixture;
}

/// Pull secret with credentials for two mirror registries.
#[allow(dead_code)]
pub const PULL_SECRET: &str = r#"{"auths":{"mirror.example.com":{"auth":"dXNlcjpwYXNz"},"mirror.example.net":{"auth":"dXNlcm5hbWU6cGFzc3dvcmQ="}}}"#;

/// Common mirror policy snippets for testing.
#[allow(dead_code)]
pub mod policies {
    /// One digest rule and one overlapping tag rule for the same registry.
    pub const DIGEST_AND_TAG: &str = r#"
apiVersion: v1
kind: List
items:
  - apiVersion: config.openshift.io/v1
    kind: ImageDigestMirrorSet
    metadata:
      name: ubi
    spec:
      imageDigestMirrors:
        - source: registry.access.redhat.com/ubi9/ubi-minimal
          mirrors:
            - mirror.example.com/redhat/ubi9/ubi-minimal
  - apiVersion: config.openshift.io/v1
    kind: ImageTagMirrorSet
    metadata:
      name: ubi-tags
    spec:
      imageTagMirrors:
        - source: registry.access.redhat.com/ubi8/ubi-minimal
          mirrors:
            - mirror.example.net/ubi8/ubi-minimal
          mirrorSourcePolicy: NeverContactSource
"#;

    /// A registry served by a port-qualified mirror, allowed to fall back.
    pub const PORTED: &str = r#"
kind: ImageDigestMirrorSet
spec:
  imageDigestMirrors:
    - source: https://source1.local:5000/team/app
      mirrors:
        - devcluster.openshift.com:5000/team/app
"#;

    /// A rule with no mirrors: nothing to render.
    pub const NO_MIRRORS: &str = r#"
kind: ImageDigestMirrorSet
spec:
  imageDigestMirrors:
    - source: quay.io/openshift-release-dev/ocp-release
      mirrors: []
"#;

    /// Not a mapping.
    pub const INVALID: &str = "- just\n- a list\n";
}

/// A test fixture that provides a temporary directory with policy inputs.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
    policies: Vec<PathBuf>,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
            policies: Vec::new(),
        }
    }

    /// Add a policy file with the given content.
    pub fn with_policy(mut self, content: &str) -> Self {
        let name = format!("policy-{}.yaml", self.policies.len());
        let child = self.temp_dir.child(&name);
        child.write_str(content).expect("Failed to write policy file");
        self.policies.push(child.path().to_path_buf());
        self
    }

    /// Add the standard pull secret as `pull-secret.json`.
    #[allow(dead_code)]
    pub fn with_pull_secret(self) -> Self {
        self.temp_dir
            .child("pull-secret.json")
            .write_str(PULL_SECRET)
            .expect("Failed to write pull secret");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Paths of the policy files written so far.
    pub fn policy_paths(&self) -> &[PathBuf] {
        &self.policies
    }

    /// Path of the pull secret written by [`with_pull_secret`](Self::with_pull_secret).
    #[allow(dead_code)]
    pub fn pull_secret_path(&self) -> PathBuf {
        self.temp_dir.path().join("pull-secret.json")
    }

    /// Path of the output directory used by [`generate`](Self::generate).
    #[allow(dead_code)]
    pub fn output_path(&self) -> PathBuf {
        self.temp_dir.path().join("registries")
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("registry-mirrors");
        cmd.current_dir(self.path());
        cmd.env_remove("REGISTRY_MIRRORS_POLICY")
            .env_remove("REGISTRY_MIRRORS_PULL_SECRET")
            .env_remove("REGISTRY_MIRRORS_OUTPUT");
        cmd
    }

    /// A `<subcommand> --policy ...` command for every policy file.
    pub fn command_with_policies(&self, subcommand: &str) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg(subcommand);
        for policy in &self.policies {
            cmd.arg("--policy").arg(policy);
        }
        cmd
    }

    /// A `generate` command writing to [`output_path`](Self::output_path).
    #[allow(dead_code)]
    pub fn generate(&self) -> assert_cmd::Command {
        let mut cmd = self.command_with_policies("generate");
        cmd.arg("--output").arg(self.output_path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_policy() {
        let fixture = TestFixture::new()
            .with_policy(policies::PORTED)
            .with_policy(policies::NO_MIRRORS);
        assert_eq!(fixture.policy_paths().len(), 2);
        assert!(fixture.policy_paths().iter().all(|p| p.exists()));
    }

    #[test]
    fn test_policies_are_valid_yaml() {
        for policy in [policies::DIGEST_AND_TAG, policies::PORTED, policies::NO_MIRRORS] {
            serde_yaml::from_str::<serde_yaml::Value>(policy).expect("Policy should be valid YAML");
        }
    }

    #[test]
    fn test_pull_secret_is_valid_json() {
        serde_json::from_str::<serde_json::Value>(PULL_SECRET).expect("Pull secret should be JSON");
    }
}
