use std::{net::SocketAddr, path::PathBuf};

use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Test context holding the temporary volume tree and the stub upstream.
///
/// The directories live under a single temporary root that is removed when the context is
/// dropped; the stub upstream task is aborted at the same time.
pub struct TestContext {
    /// Temporary root owning every directory below.
    pub root: TempDir,

    /// Stand-in for the `static` volume.
    pub static_dir: PathBuf,

    /// Stand-in for the `media` volume.
    pub media_dir: PathBuf,

    /// Document root; documentation files live under `api/docs/` below it.
    pub docs_root: PathBuf,

    /// Address of the stub backend, when one was requested.
    pub upstream: Option<SocketAddr>,

    pub(crate) upstream_task: Option<JoinHandle<()>>,
}

impl TestContext {
    /// Base URL of the stub backend.
    ///
    /// # Panics
    /// When the context was built without `with_upstream()`.
    pub fn upstream_url(&self) -> String {
        let addr = self
            .upstream
            .expect("test context was built without an upstream");
        format!("http://{}", addr)
    }

    /// Directory the documentation files were written to.
    pub fn docs_dir(&self) -> PathBuf {
        self.docs_root.join("api").join("docs")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(task) = self.upstream_task.take() {
            task.abort();
        }
    }
}
