use log::{debug, info};

use crate::{
    checksum::{ArtifactDigest, Sha256Digester},
    error::BumpResult,
};

/// Downloads `url` and calculates the SHA256 checksum of the response body.
///
/// Non-success statuses are reported as network errors before any bytes are hashed.
/// No timeout is configured beyond whatever the transport applies.
pub async fn checksum_url(client: &reqwest::Client, url: &str) -> BumpResult<ArtifactDigest> {
    info!("Downloading {}", url);
    let mut response = client.get(url).send().await?.error_for_status()?;
    debug!("{} responded {}", url, response.status());

    let mut digester = Sha256Digester::new();
    while let Some(chunk) = response.chunk().await? {
        digester.update(&chunk);
    }

    Ok(digester.finalize())
}

#[cfg(test)]
mod tests {
    use sha2::{Digest, Sha256};

    use super::*;
    use crate::{error::BumpError, fetch::test_server};

    #[tokio::test]
    async fn checksum_url_hashes_body() {
        let url = test_server::serve_once("200 OK", b"zip bytes".to_vec()).await;

        let digest = checksum_url(&test_server::client(), &url).await.unwrap();
        assert_eq!(
            digest.checksum.as_str(),
            hex::encode(Sha256::digest(b"zip bytes"))
        );
    }

    #[tokio::test]
    async fn checksum_url_rejects_error_status() {
        let url = test_server::serve_once("404 Not Found", b"Not Found".to_vec()).await;

        let result = checksum_url(&test_server::client(), &url).await;
        match result {
            Err(BumpError::Network(err)) => {
                assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND))
            }
            other => panic!("expected a network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn checksum_url_reports_unreachable_host() {
        let url = test_server::refused_url().await;

        let result = checksum_url(&test_server::client(), &url).await;
        assert!(matches!(result, Err(BumpError::Network(_))));
    }
}
