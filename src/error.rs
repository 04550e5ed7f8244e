use std::{io, path::PathBuf};

use thiserror::Error;

use crate::manifest::ManifestField;

/// Known errors for a release bump.
#[derive(Debug, Error)]
pub enum BumpError {
    /// The artifact could not be retrieved over the network, or the server
    /// answered with a non-success status
    #[error("Network Error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("IO Error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The manifest does not contain the field the patcher was asked to replace
    #[error("No {field} field matching the expected pattern in {}", path.display())]
    PatternNotFound { field: ManifestField, path: PathBuf },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid manifest pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid checksum {0:?}, expected 64 lowercase hex characters")]
    InvalidChecksum(String),
}

impl BumpError {
    /// Classifies an IO error raised while reading `path`.
    pub fn from_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => BumpError::FileNotFound(path),
            io::ErrorKind::PermissionDenied => BumpError::PermissionDenied(path),
            _ => BumpError::Io { path, source },
        }
    }

    /// Classifies an IO error raised while writing `path`.
    pub fn from_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::PermissionDenied => BumpError::PermissionDenied(path),
            _ => BumpError::Write { path, source },
        }
    }
}

pub type BumpResult<T> = Result<T, BumpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_read_classifies_missing_file() {
        let error = BumpError::from_read(
            "Package.swift",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(error, BumpError::FileNotFound(path) if path == PathBuf::from("Package.swift")));
    }

    #[test]
    fn from_read_classifies_permission_denied() {
        let error = BumpError::from_read(
            "Package.swift",
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(error, BumpError::PermissionDenied(_)));
    }

    #[test]
    fn from_read_keeps_other_errors() {
        let error = BumpError::from_read(
            "Package.swift",
            io::Error::new(io::ErrorKind::InvalidData, "not utf-8"),
        );
        assert!(matches!(error, BumpError::Io { .. }));
    }

    #[test]
    fn from_write_classifies_errors() {
        let denied = BumpError::from_write(
            "Package.swift",
            io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
        );
        assert!(matches!(denied, BumpError::PermissionDenied(_)));

        let other = BumpError::from_write(
            "Package.swift",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        );
        assert!(matches!(other, BumpError::Write { .. }));
    }

    #[test]
    fn pattern_not_found_names_the_field() {
        let error = BumpError::PatternNotFound {
            field: ManifestField::Checksum,
            path: PathBuf::from("Package.swift"),
        };
        assert_eq!(
            error.to_string(),
            "No checksum field matching the expected pattern in Package.swift"
        );
    }
}
