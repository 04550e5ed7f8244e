mod sha;

use std::{fmt::Display, str::FromStr};

use log::debug;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::BumpError;

pub use sha::Sha256Digester;

/// The default chunk size used to read artifacts.
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Length of a hex-encoded SHA-256 digest.
pub const SHA256_HEX_LEN: usize = 64;

/// A hex-encoded SHA-256 digest, always 64 lowercase hex characters.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct Checksum(String);

impl Checksum {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading eight characters, used in short status lines.
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl FromStr for Checksum {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let is_lower_hex = s
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));

        if s.len() != SHA256_HEX_LEN || !is_lower_hex {
            return Err(BumpError::InvalidChecksum(s.to_string()));
        }

        Ok(Checksum(s.to_string()))
    }
}

impl Display for Checksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The checksum of a retrieved artifact along with the number of bytes hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDigest {
    pub checksum: Checksum,
    pub size: u64,
}

/// Hashes everything `reader` yields, reading `chunk_size` bytes at a time.
///
/// A chunk size of zero falls back to `DEFAULT_CHUNK_SIZE`.
pub async fn checksum_reader<R>(
    reader: &mut R,
    chunk_size: Option<usize>,
) -> Result<ArtifactDigest, std::io::Error>
where
    R: AsyncRead + Unpin,
{
    let chunk_size = chunk_size
        .filter(|&size| size > 0)
        .unwrap_or(DEFAULT_CHUNK_SIZE);
    let mut digester = Sha256Digester::new();
    let mut buffer = vec![0; chunk_size];

    loop {
        let bytes_read = reader.read(&mut buffer).await?;
        if bytes_read == 0 {
            break;
        }

        digester.update(&buffer[..bytes_read]);
    }

    let digest = digester.finalize();
    debug!("Hashed {} bytes", digest.size);
    Ok(digest)
}
