use std::path::Path;

use log::info;

use crate::{
    checksum::{checksum_reader, ArtifactDigest},
    error::{BumpError, BumpResult},
};

/// Calculates the SHA256 checksum of a local file.
pub async fn checksum_file(path: &Path, chunk_size: Option<usize>) -> BumpResult<ArtifactDigest> {
    info!("Reading {}", path.display());
    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|err| BumpError::from_read(path, err))?;

    checksum_reader(&mut file, chunk_size)
        .await
        .map_err(|err| BumpError::from_read(path, err))
}
