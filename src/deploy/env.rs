use std::path::Path;

use crate::server::error::deploy::DeployError;

/// Verifies the env file every service reads is present.
///
/// # Returns
/// - `Ok(())` - The path is a regular file
/// - `Err(DeployError::MissingEnvFile)` - Nothing exists at the path
/// - `Err(DeployError::EnvFileNotAFile)` - The path is a directory or special file
pub fn check_env_file(path: &Path) -> Result<(), DeployError> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => Ok(()),
        Ok(_) => Err(DeployError::EnvFileNotAFile(path.to_path_buf())),
        Err(_) => Err(DeployError::MissingEnvFile(path.to_path_buf())),
    }
}
