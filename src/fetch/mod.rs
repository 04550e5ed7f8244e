mod http;
mod local;

use std::{convert::Infallible, fmt::Display, path::PathBuf, str::FromStr};

use async_trait::async_trait;
use log::{debug, warn};

use crate::{
    checksum::ArtifactDigest,
    error::BumpResult,
};

pub use http::checksum_url;
pub use local::checksum_file;

/// Where an artifact is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    /// An HTTP(S) URL that is downloaded in full.
    Url(String),
    /// A file on the local filesystem.
    Path(PathBuf),
}

impl ArtifactSource {
    pub fn is_url(&self) -> bool {
        matches!(self, ArtifactSource::Url(_))
    }
}

impl FromStr for ArtifactSource {
    type Err = Infallible;

    /// Anything starting with `http://` or `https://` is a URL, everything else a path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(ArtifactSource::Url(s.to_string()))
        } else {
            Ok(ArtifactSource::Path(PathBuf::from(s)))
        }
    }
}

impl Display for ArtifactSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactSource::Url(url) => write!(f, "{}", url),
            ArtifactSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Retrieves an artifact and computes its SHA-256 checksum.
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    async fn fetch(&self, source: &ArtifactSource) -> BumpResult<ArtifactDigest>;
}

/// Fetches URLs with a shared `reqwest` client and paths from the local filesystem.
pub struct DefaultFetcher {
    client: reqwest::Client,
    chunk_size: Option<usize>,
}

impl DefaultFetcher {
    pub fn new() -> BumpResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::from_client(client))
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            client,
            chunk_size: None,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }
}

#[async_trait]
impl ArtifactFetcher for DefaultFetcher {
    async fn fetch(&self, source: &ArtifactSource) -> BumpResult<ArtifactDigest> {
        debug!("Fetching {:?}", source);
        let digest = match source {
            ArtifactSource::Url(url) => checksum_url(&self.client, url).await?,
            ArtifactSource::Path(path) => checksum_file(path, self.chunk_size).await?,
        };

        if digest.size == 0 {
            warn!("Artifact {} is empty", source);
        }

        Ok(digest)
    }
}

/// A one-shot HTTP server on localhost for exercising the fetcher.
#[cfg(test)]
pub(crate) mod test_server {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    /// Serves a single request with `status` and `body`, returning the URL to request.
    pub async fn serve_once(status: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = stream.read(&mut buffer).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..read]);
            }

            let head = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            stream.write_all(head.as_bytes()).await.unwrap();
            stream.write_all(&body).await.unwrap();
            stream.shutdown().await.unwrap();
        });

        format!("http://{}/artifact.xcframework.zip", addr)
    }

    /// A client that talks to localhost directly regardless of proxy settings.
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    /// A URL on a localhost port nothing listens on.
    pub async fn refused_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/artifact.xcframework.zip", addr)
    }
}
