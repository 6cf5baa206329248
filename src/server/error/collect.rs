use std::path::PathBuf;
use thiserror::Error;

/// Failures of the static asset collection step.
#[derive(Error, Debug)]
pub enum CollectError {
    /// The build output directory does not exist or is not a directory.
    #[error("Source directory {0} does not exist or is not a directory")]
    MissingSource(PathBuf),

    /// The destination lies inside the source, so copying would recurse into itself.
    #[error("Destination {to} is inside source {from}")]
    DestinationInsideSource { from: PathBuf, to: PathBuf },

    /// Reading, creating or copying a path failed.
    #[error("Failed to copy {path}: {source}")]
    Io {
        /// Path being processed when the error occurred
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
