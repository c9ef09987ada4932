//! Upload domain types
//!
//! Value types passed between the workflow and the upload API:
//! the local file being sent, the server-side handle it becomes, and the
//! final location after a move.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::filename::extension_of;

/// The local file selected for upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTarget {
    /// Location of the file on the local filesystem
    path: PathBuf,
    /// Name sent to the server and offered as the default final filename
    display_name: String,
}

impl UploadTarget {
    /// Creates a new target for the file at `path`, shown as `display_name`
    pub fn new(path: impl Into<PathBuf>, display_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            display_name: display_name.into(),
        }
    }

    /// Creates a target whose display name is the file name of `path`
    ///
    /// Returns `None` if the path has no (UTF-8) file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_str()?.to_string();
        Some(Self::new(path, name))
    }

    /// Returns the local path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the display name
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the extension of the display name, if it has one
    pub fn extension(&self) -> Option<&str> {
        extension_of(&self.display_name)
    }
}

/// Server-side identifier of an uploaded file that has not been moved yet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemoteFile(String);

impl RemoteFile {
    /// Creates a new RemoteFile from the path reported by the server
    ///
    /// # Errors
    /// Returns `DomainError::InvalidRemotePath` if the path is empty or blank
    pub fn new(remote_path: impl Into<String>) -> Result<Self, DomainError> {
        let remote_path = remote_path.into();
        if remote_path.trim().is_empty() {
            return Err(DomainError::InvalidRemotePath(
                "remote path cannot be empty".to_string(),
            ));
        }
        Ok(Self(remote_path))
    }

    /// Returns the remote path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RemoteFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RemoteFile {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RemoteFile> for String {
    fn from(remote: RemoteFile) -> Self {
        remote.0
    }
}

/// Result of a successful move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedFile {
    /// Final path reported by the server
    pub moved_to: String,
}

/// Builds the `saved` value for a move: `<directory>/<filename>`
pub fn destination_path(directory: &str, filename: &str) -> String {
    format!("{}/{}", directory, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_target_from_path() {
        let target = UploadTarget::from_path("/tmp/photos/beach day.jpg").unwrap();
        assert_eq!(target.display_name(), "beach day.jpg");
        assert_eq!(target.extension(), Some("jpg"));
        assert_eq!(target.path(), Path::new("/tmp/photos/beach day.jpg"));
    }

    #[test]
    fn test_upload_target_from_path_without_name() {
        assert!(UploadTarget::from_path("/").is_none());
    }

    #[test]
    fn test_upload_target_without_extension() {
        let target = UploadTarget::new("/tmp/Makefile", "Makefile");
        assert_eq!(target.extension(), None);
    }

    #[test]
    fn test_remote_file_rejects_empty() {
        assert!(RemoteFile::new("").is_err());
        assert!(RemoteFile::new("   ").is_err());
        assert_eq!(RemoteFile::new("abc123.pdf").unwrap().as_str(), "abc123.pdf");
    }

    #[test]
    fn test_remote_file_serde_validates() {
        let remote: RemoteFile = serde_yaml::from_str("\"uploads/x.bin\"").unwrap();
        assert_eq!(remote.to_string(), "uploads/x.bin");
        assert!(serde_yaml::from_str::<RemoteFile>("\"\"").is_err());
    }

    #[test]
    fn test_destination_path() {
        assert_eq!(destination_path("pdf", "report.pdf"), "pdf/report.pdf");
    }
}
