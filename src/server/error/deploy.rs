use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    /// The env file every service reads is missing.
    ///
    /// Containers refuse to start when `env_file` points to a missing path, so this is
    /// reported before the stack is brought up.
    #[error("Required env file {0} does not exist")]
    MissingEnvFile(PathBuf),

    /// The env file path exists but is a directory or other non-regular file.
    #[error("Env file {0} is not a regular file")]
    EnvFileNotAFile(PathBuf),

    /// Serializing the compose document failed.
    #[error("Failed to render compose file: {0}")]
    Render(#[from] serde_yaml::Error),

    /// Writing a rendered file failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
