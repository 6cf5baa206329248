use std::path::{Path, PathBuf};

use tokio::fs;

use crate::server::error::{collect::CollectError, AppError};

/// Counts of what a collection run copied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectReport {
    pub files: u64,
    pub directories: u64,
    pub bytes: u64,
}

/// Copies compiled frontend assets into the shared static volume.
///
/// This is the whole job of the frontend container: copy the build output once and exit,
/// leaving the volume for the gateway to serve.
pub struct CollectStaticService {
    from: PathBuf,
    to: PathBuf,
}

impl CollectStaticService {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Recursively copies the contents of `from` into `to`.
    ///
    /// Directories are created as needed and existing files are overwritten. Symbolic links
    /// are skipped.
    ///
    /// # Returns
    /// - `Ok(CollectReport)` - Number of files, directories and bytes copied
    /// - `Err(CollectError::MissingSource)` - `from` is not a directory
    /// - `Err(CollectError::DestinationInsideSource)` - `to` is `from` or lies below it
    /// - `Err(CollectError::Io)` - A read, create or copy failed
    pub async fn run(&self) -> Result<CollectReport, AppError> {
        let from = self.source_dir().await?;
        let to = absolute(&self.to).await?;

        if to.starts_with(&from) {
            return Err(CollectError::DestinationInsideSource { from, to }.into());
        }

        fs::create_dir_all(&to).await.map_err(io_err(&to))?;

        let mut report = CollectReport::default();
        let mut pending = vec![(from, to)];

        while let Some((src_dir, dst_dir)) = pending.pop() {
            let mut entries = fs::read_dir(&src_dir).await.map_err(io_err(&src_dir))?;

            while let Some(entry) = entries.next_entry().await.map_err(io_err(&src_dir))? {
                let src = entry.path();
                let dst = dst_dir.join(entry.file_name());
                let file_type = entry.file_type().await.map_err(io_err(&src))?;

                if file_type.is_symlink() {
                    tracing::warn!("Skipping symbolic link {}", src.display());
                } else if file_type.is_dir() {
                    fs::create_dir_all(&dst).await.map_err(io_err(&dst))?;
                    report.directories += 1;
                    pending.push((src, dst));
                } else if file_type.is_file() {
                    report.bytes += fs::copy(&src, &dst).await.map_err(io_err(&src))?;
                    report.files += 1;
                } else {
                    tracing::warn!("Skipping special file {}", src.display());
                }
            }
        }

        tracing::info!(
            "Collected {} files ({} bytes) in {} directories into {}",
            report.files,
            report.bytes,
            report.directories,
            self.to.display()
        );

        Ok(report)
    }

    async fn source_dir(&self) -> Result<PathBuf, CollectError> {
        let missing = || CollectError::MissingSource(self.from.clone());

        let metadata = fs::metadata(&self.from).await.map_err(|_| missing())?;
        if !metadata.is_dir() {
            return Err(missing());
        }

        fs::canonicalize(&self.from).await.map_err(io_err(&self.from))
    }
}

/// Canonical form of `path`, resolving through the nearest existing ancestor when the path
/// itself has not been created yet.
async fn absolute(path: &Path) -> Result<PathBuf, CollectError> {
    if let Ok(canonical) = fs::canonicalize(path).await {
        return Ok(canonical);
    }

    let absolute = std::path::absolute(path).map_err(io_err(path))?;
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();

    while let Some(parent) = existing.parent() {
        if let Some(name) = existing.file_name() {
            missing.push(name.to_os_string());
        }
        existing = parent;
        if let Ok(mut canonical) = fs::canonicalize(existing).await {
            for name in missing.iter().rev() {
                canonical.push(name);
            }
            return Ok(canonical);
        }
    }

    Ok(absolute)
}

fn io_err(path: &Path) -> impl Fn(std::io::Error) -> CollectError + '_ {
    move |source| CollectError::Io {
        path: path.to_path_buf(),
        source,
    }
}
