use thiserror::Error;

/// Errors that can occur while setting up a test context.
#[derive(Error, Debug)]
pub enum TestError {
    /// Creating the temporary volume tree, writing a fixture file or binding the stub
    /// upstream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
