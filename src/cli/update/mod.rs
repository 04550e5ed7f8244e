mod display;

use std::path::PathBuf;

use display::{DisplayManager, UpdateReport};
use log::{debug, info};

use crate::{
    error::{BumpError, BumpResult},
    fetch::{ArtifactFetcher, ArtifactSource},
    manifest::{find_manifest, ManifestPatcher, ReleaseTemplate, DEFAULT_MANIFEST_FILENAME},
};

#[derive(Debug)]
/// Options for the update command
pub struct UpdateOptions {
    /// Release version tag
    pub version: String,
    /// Release project the download URL is built from
    pub template: ReleaseTemplate,
    /// Explicit manifest path
    pub manifest: Option<PathBuf>,
    /// Source to hash instead of the constructed release URL
    pub artifact: Option<ArtifactSource>,
    /// Directory the manifest search starts from
    pub working_dir: PathBuf,
    /// Skip writing the manifest
    pub dry_run: bool,
    /// Verbosity level for output
    pub verbosity: u8,
    /// Show status output
    pub show_display: bool,
}

fn resolve_manifest(options: &UpdateOptions) -> BumpResult<PathBuf> {
    match &options.manifest {
        Some(filepath) if filepath.is_file() => Ok(filepath.clone()),
        Some(filepath) => Err(BumpError::FileNotFound(filepath.clone())),
        None => find_manifest(&options.working_dir).ok_or_else(|| {
            BumpError::FileNotFound(options.working_dir.join(DEFAULT_MANIFEST_FILENAME))
        }),
    }
}

/// Builds the release URL, hashes the artifact and patches the manifest.
pub async fn update(
    options: UpdateOptions,
    fetcher: &dyn ArtifactFetcher,
) -> BumpResult<UpdateReport> {
    debug!("{:?}", options);
    let display_manager = DisplayManager::new(options.verbosity, !options.show_display);

    let manifest = resolve_manifest(&options)?;
    let patcher = ManifestPatcher::new(&options.template)?;

    let url = options.template.download_url(&options.version);
    let source = options
        .artifact
        .clone()
        .unwrap_or_else(|| ArtifactSource::Url(url.clone()));

    display_manager.report_start(&source);
    let digest = fetcher.fetch(&source).await?;
    info!("{} has checksum {}", source, digest.checksum);
    display_manager.report_checksum(&options.version, &digest.checksum, digest.size);

    let patch = patcher
        .patch_file(&manifest, &url, &digest.checksum, options.dry_run)
        .await?;

    let report = UpdateReport {
        version: options.version,
        url,
        checksum: digest.checksum,
        size: digest.size,
        manifest,
        changed: patch.changed,
        dry_run: options.dry_run,
    };

    display_manager.report_result(&report);
    Ok(report)
}
