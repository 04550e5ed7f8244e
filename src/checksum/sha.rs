use sha2::Digest as _;

use super::{ArtifactDigest, Checksum};

/// Incremental SHA-256 that also counts the bytes it has seen.
#[derive(Default)]
pub struct Sha256Digester {
    hasher: sha2::Sha256,
    size: u64,
}

impl Sha256Digester {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
        self.size += chunk.len() as u64;
    }

    pub fn finalize(self) -> ArtifactDigest {
        ArtifactDigest {
            checksum: Checksum(hex::encode(self.hasher.finalize())),
            size: self.size,
        }
    }
}
