use tempfile::TempDir;

use crate::{deploy::env::check_env_file, server::error::deploy::DeployError};

/// Tests an existing env file passes.
#[test]
fn accepts_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".env");
    std::fs::write(&path, "POSTGRES_DB=foodgram\n").unwrap();

    assert!(check_env_file(&path).is_ok());
}

/// Tests a missing env file is reported.
#[test]
fn rejects_missing_file() {
    let dir = TempDir::new().unwrap();

    assert!(matches!(
        check_env_file(&dir.path().join(".env")),
        Err(DeployError::MissingEnvFile(_))
    ));
}

/// Tests a directory in place of the env file is reported.
#[test]
fn rejects_directory() {
    let dir = TempDir::new().unwrap();

    assert!(matches!(
        check_env_file(dir.path()),
        Err(DeployError::EnvFileNotAFile(_))
    ));
}
