//! Error types for writing the output tree.

use std::path::PathBuf;

use thiserror::Error;

/// Filesystem failure while regenerating the output tree.
///
/// Not recovered: the run aborts and the tree stays partially rebuilt.
#[derive(Debug, Error)]
pub enum ResyncError {
    /// Failed to delete a generated directory.
    #[error("Failed to remove '{}': {source}", path.display())]
    RemoveDir {
        /// Directory being removed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a generated directory or set its permissions.
    #[error("Failed to create '{}': {source}", path.display())]
    CreateDir {
        /// Directory being created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a generated file.
    #[error("Failed to write '{}': {source}", path.display())]
    WriteFile {
        /// File being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
