use std::{fmt::Display, path::PathBuf};

use colored::Colorize;

use crate::{checksum::Checksum, fetch::ArtifactSource};

/// Summary of a completed update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    pub version: String,
    pub url: String,
    pub checksum: Checksum,
    pub size: u64,
    pub manifest: PathBuf,
    pub changed: bool,
    pub dry_run: bool,
}

impl Display for UpdateReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let headline = if self.dry_run {
            format!("{} would be updated (dry run)", self.manifest.display()).yellow()
        } else if self.changed {
            format!("{} updated successfully!", self.manifest.display()).green()
        } else {
            format!("{} already up to date", self.manifest.display()).green()
        };

        writeln!(f, "{}", headline.bold())?;
        writeln!(f, "   Version: {}", self.version)?;
        writeln!(f, "   URL: {}", self.url)?;
        writeln!(f, "   Size: {} bytes", self.size)?;
        write!(f, "   Checksum: {}", self.checksum)
    }
}

pub struct DisplayManager {
    verbosity: u8,
    disabled: bool,
}

impl DisplayManager {
    pub fn new(verbosity: u8, disabled: bool) -> Self {
        Self {
            verbosity,
            disabled,
        }
    }

    pub fn report_start(&self, source: &ArtifactSource) {
        if self.disabled {
            return;
        }

        if source.is_url() {
            println!("Calculating checksum for {}...", source);
        } else {
            println!("Calculating checksum for local file {}...", source);
        }
    }

    pub fn report_checksum(&self, version: &str, checksum: &Checksum, size: u64) {
        if !self.disabled && self.verbosity >= 1 {
            println!(
                "{}",
                format!(
                    "Hashed {} bytes for version {}, checksum: {}...",
                    size,
                    version,
                    checksum.short()
                )
                .dimmed()
            );
        }
    }

    pub fn report_result(&self, report: &UpdateReport) {
        if !self.disabled {
            println!("{}", report);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(changed: bool, dry_run: bool) -> UpdateReport {
        UpdateReport {
            version: "v1.19.13".to_string(),
            url: "https://github.com/birdmichael/MihomoKit/releases/download/v1.19.13/MihomoKit-v1.19.13.xcframework.zip".to_string(),
            checksum: "8f71c304a350d67dd61553cc67059795f20d6610de38687a2b8a9a0915e42e89"
                .parse()
                .unwrap(),
            size: 1024,
            manifest: PathBuf::from("Package.swift"),
            changed,
            dry_run,
        }
    }

    #[test]
    fn report_lists_version_url_and_checksum() {
        colored::control::set_override(false);
        let rendered = report(true, false).to_string();

        assert_eq!(
            rendered,
            "Package.swift updated successfully!\n   Version: v1.19.13\n   URL: https://github.com/birdmichael/MihomoKit/releases/download/v1.19.13/MihomoKit-v1.19.13.xcframework.zip\n   Size: 1024 bytes\n   Checksum: 8f71c304a350d67dd61553cc67059795f20d6610de38687a2b8a9a0915e42e89"
        );
    }

    #[test]
    fn report_headline_reflects_outcome() {
        colored::control::set_override(false);
        assert!(report(false, false).to_string().starts_with("Package.swift already up to date"));
        assert!(report(true, true).to_string().contains("(dry run)"));
    }
}
