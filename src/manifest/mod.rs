mod patcher;

use std::path::{Path, PathBuf};

pub use patcher::{ManifestPatch, ManifestPatcher};

/// The well-known Swift package manifest filename.
pub const DEFAULT_MANIFEST_FILENAME: &str = "Package.swift";

pub const DEFAULT_ORG: &str = "birdmichael";
pub const DEFAULT_PROJECT: &str = "MihomoKit";

/// The manifest fields rewritten during a bump.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum ManifestField {
    /// The `url: "..."` field of the binary target.
    Url,
    /// The `checksum: "..."` field of the binary target.
    Checksum,
}

/// The GitHub project whose releases publish the xcframework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTemplate {
    pub org: String,
    pub project: String,
}

impl Default for ReleaseTemplate {
    fn default() -> Self {
        ReleaseTemplate {
            org: DEFAULT_ORG.to_string(),
            project: DEFAULT_PROJECT.to_string(),
        }
    }
}

impl ReleaseTemplate {
    pub fn new(org: impl Into<String>, project: impl Into<String>) -> Self {
        ReleaseTemplate {
            org: org.into(),
            project: project.into(),
        }
    }

    /// Builds the release asset URL for `version`, which is used verbatim.
    pub fn download_url(&self, version: &str) -> String {
        format!(
            "https://github.com/{org}/{project}/releases/download/{version}/{project}-{version}.xcframework.zip",
            org = self.org,
            project = self.project,
            version = version,
        )
    }

    /// Regex source matching a `url:` field that points at any release of this project.
    pub fn url_field_pattern(&self) -> String {
        format!(
            r#"url: "https://github\.com/{}/{}/releases/download/[^"]+/[^"]+\.xcframework\.zip""#,
            regex::escape(&self.org),
            regex::escape(&self.project),
        )
    }
}

/// Finds the closest manifest at or above `start`.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(DEFAULT_MANIFEST_FILENAME))
        .find(|candidate| candidate.is_file())
}
