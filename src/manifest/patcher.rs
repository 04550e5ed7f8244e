use std::path::Path;

use log::{debug, info};
use regex::{NoExpand, Regex};

use super::{ManifestField, ReleaseTemplate};
use crate::{
    checksum::Checksum,
    error::{BumpError, BumpResult},
};

const CHECKSUM_FIELD_PATTERN: &str = r#"checksum: "[^"]+""#;

/// The result of rewriting a manifest's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPatch {
    pub content: String,
    /// Number of `url:` fields that were replaced.
    pub url_matches: usize,
    /// Number of `checksum:` fields that were replaced.
    pub checksum_matches: usize,
    /// Whether the content differs from the input.
    pub changed: bool,
}

impl ManifestPatch {
    /// The first field the patcher could not find, if any.
    pub fn missing_field(&self) -> Option<ManifestField> {
        if self.url_matches == 0 {
            Some(ManifestField::Url)
        } else if self.checksum_matches == 0 {
            Some(ManifestField::Checksum)
        } else {
            None
        }
    }
}

/// Rewrites the release URL and checksum fields of a Swift package manifest.
///
/// Every match of a field pattern is replaced identically. Text outside the
/// matched fields is left byte-for-byte intact.
pub struct ManifestPatcher {
    url_pattern: Regex,
    checksum_pattern: Regex,
}

impl ManifestPatcher {
    pub fn new(template: &ReleaseTemplate) -> BumpResult<Self> {
        Ok(ManifestPatcher {
            url_pattern: Regex::new(&template.url_field_pattern())?,
            checksum_pattern: Regex::new(CHECKSUM_FIELD_PATTERN)?,
        })
    }

    /// Patches manifest text in memory.
    pub fn patch(&self, content: &str, url: &str, checksum: &Checksum) -> ManifestPatch {
        let url_matches = self.url_pattern.find_iter(content).count();
        let checksum_matches = self.checksum_pattern.find_iter(content).count();
        debug!(
            "Found {} url and {} checksum fields",
            url_matches, checksum_matches
        );

        let url_field = format!(r#"url: "{}""#, url);
        let checksum_field = format!(r#"checksum: "{}""#, checksum);

        let patched = self.url_pattern.replace_all(content, NoExpand(&url_field));
        let patched = self
            .checksum_pattern
            .replace_all(&patched, NoExpand(&checksum_field))
            .into_owned();

        ManifestPatch {
            changed: patched != content,
            content: patched,
            url_matches,
            checksum_matches,
        }
    }

    /// Reads the manifest at `filepath`, patches it and writes it back in full.
    ///
    /// Nothing is written when a field is missing or when `dry_run` is set.
    pub async fn patch_file(
        &self,
        filepath: &Path,
        url: &str,
        checksum: &Checksum,
        dry_run: bool,
    ) -> BumpResult<ManifestPatch> {
        let content = tokio::fs::read_to_string(filepath)
            .await
            .map_err(|err| BumpError::from_read(filepath, err))?;

        let patch = self.patch(&content, url, checksum);
        if let Some(field) = patch.missing_field() {
            return Err(BumpError::PatternNotFound {
                field,
                path: filepath.to_path_buf(),
            });
        }

        if dry_run {
            info!("Dry run, not writing {}", filepath.display());
        } else if patch.changed {
            info!("Writing manifest to {}", filepath.display());
            tokio::fs::write(filepath, &patch.content)
                .await
                .map_err(|err| BumpError::from_write(filepath, err))?;
        } else {
            info!("{} is already up to date", filepath.display());
        }

        Ok(patch)
    }
}
