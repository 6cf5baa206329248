use std::path::Path;

use tempfile::TempDir;

use crate::{context::TestContext, error::TestError, fixture::site, upstream};

/// Builder for creating test contexts with populated volume directories.
///
/// Provides a fluent interface for configuring test environments. Files are queued with the
/// `with_*_file()` methods and written when `build()` is called.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_static_file("index.html", "<html></html>")
///     .with_upstream()
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    static_files: Vec<(String, Vec<u8>)>,
    media_files: Vec<(String, Vec<u8>)>,
    docs_files: Vec<(String, Vec<u8>)>,
    upstream: bool,
}

impl TestBuilder {
    /// Creates a new test builder with empty volumes and no upstream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a file for the static volume.
    ///
    /// # Arguments
    /// - `path` - Path relative to the static volume, e.g. `static/js/main.js`
    /// - `contents` - File contents
    pub fn with_static_file(mut self, path: &str, contents: impl AsRef<[u8]>) -> Self {
        self.static_files
            .push((path.to_string(), contents.as_ref().to_vec()));
        self
    }

    /// Queues a file for the media volume.
    pub fn with_media_file(mut self, path: &str, contents: impl AsRef<[u8]>) -> Self {
        self.media_files
            .push((path.to_string(), contents.as_ref().to_vec()));
        self
    }

    /// Queues a file for the documentation directory (`api/docs/` under the docs root).
    pub fn with_docs_file(mut self, path: &str, contents: impl AsRef<[u8]>) -> Self {
        self.docs_files
            .push((path.to_string(), contents.as_ref().to_vec()));
        self
    }

    /// Adds the files of a deployed Foodgram site.
    ///
    /// This convenience method queues:
    /// - `index.html` and the compiled bundle in the static volume
    /// - `redoc.html` and the OpenAPI schema in the docs directory
    /// - one recipe image in the media volume
    pub fn with_foodgram_site(self) -> Self {
        self.with_static_file("index.html", site::INDEX_HTML)
            .with_static_file(site::MAIN_JS_PATH, site::MAIN_JS)
            .with_docs_file("redoc.html", site::REDOC_HTML)
            .with_docs_file(site::OPENAPI_SCHEMA_PATH, site::OPENAPI_SCHEMA)
            .with_media_file(site::RECIPE_IMAGE_PATH, site::RECIPE_IMAGE)
    }

    /// Starts the stub backend when the context is built.
    pub fn with_upstream(mut self) -> Self {
        self.upstream = true;
        self
    }

    /// Builds the test context.
    ///
    /// Creates the temporary root with `static/`, `media/` and `html/api/docs/` below it,
    /// writes every queued file and spawns the stub upstream if requested.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Ready test environment
    /// - `Err(TestError::Io)` - Failed to create directories, write files or bind the upstream
    pub async fn build(self) -> Result<TestContext, TestError> {
        let root = TempDir::new()?;
        let static_dir = root.path().join("static");
        let media_dir = root.path().join("media");
        let docs_root = root.path().join("html");
        let docs_dir = docs_root.join("api").join("docs");

        for dir in [&static_dir, &media_dir, &docs_dir] {
            std::fs::create_dir_all(dir)?;
        }

        write_files(&static_dir, &self.static_files)?;
        write_files(&media_dir, &self.media_files)?;
        write_files(&docs_dir, &self.docs_files)?;

        let (upstream, upstream_task) = if self.upstream {
            let (addr, task) = upstream::spawn().await?;
            (Some(addr), Some(task))
        } else {
            (None, None)
        };

        Ok(TestContext {
            root,
            static_dir,
            media_dir,
            docs_root,
            upstream,
            upstream_task,
        })
    }
}

fn write_files(dir: &Path, files: &[(String, Vec<u8>)]) -> Result<(), TestError> {
    for (path, contents) in files {
        let target = dir.join(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(target, contents)?;
    }
    Ok(())
}
