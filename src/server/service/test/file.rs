use std::path::PathBuf;

use test_utils::{builder::TestBuilder, fixture::site};

use crate::server::{
    error::file::FileError,
    model::route::{Location, RouteTable, Target},
    service::file::{sanitize, FileService},
};

fn table(static_dir: PathBuf, media_dir: PathBuf, docs_root: PathBuf) -> RouteTable {
    RouteTable::new(vec![
        Location::new(
            "/api/docs/",
            Target::Docs {
                root: docs_root,
                index: "redoc.html".to_string(),
            },
        ),
        Location::new(
            "/media/",
            Target::Alias {
                dir: media_dir,
                fallback: None,
            },
        ),
        Location::new(
            "/",
            Target::Alias {
                dir: static_dir,
                fallback: Some("index.html".to_string()),
            },
        ),
    ])
}

/// Tests plain paths are decoded into relative paths.
#[test]
fn sanitizes_plain_paths() {
    assert_eq!(
        sanitize("recipes/images/cake.jpg").unwrap(),
        PathBuf::from("recipes/images/cake.jpg")
    );
    assert_eq!(sanitize("a%20b.png").unwrap(), PathBuf::from("a b.png"));
    assert_eq!(sanitize("./x//y/").unwrap(), PathBuf::from("x/y"));
    assert_eq!(sanitize("").unwrap(), PathBuf::new());
}

/// Tests traversal and malformed segments are rejected.
///
/// Expected: UnsafePath for `..` (raw and encoded), backslashes, NUL and invalid UTF-8
#[test]
fn rejects_unsafe_paths() {
    for path in ["../etc/passwd", "a/%2E%2E/b", "a\\b", "a%5C..", "nul%00", "%FF"] {
        assert!(
            matches!(sanitize(path), Err(FileError::UnsafePath(_))),
            "expected {} to be rejected",
            path
        );
    }
}

/// Tests a directory under an alias serves its index.html.
#[tokio::test]
async fn locates_directory_index() {
    let test = TestBuilder::new()
        .with_static_file("about/index.html", "about")
        .build()
        .await
        .unwrap();
    let routes = table(
        test.static_dir.clone(),
        test.media_dir.clone(),
        test.docs_root.clone(),
    );

    let route = routes.resolve("/about/").unwrap();
    let located = FileService::new(&route).locate().await.unwrap();

    assert_eq!(located, test.static_dir.join("about/index.html"));
}

/// Tests the docs location tries the file first, then redoc.html below it.
#[tokio::test]
async fn locates_docs_candidates_in_order() {
    let test = TestBuilder::new().with_foodgram_site().build().await.unwrap();
    let routes = table(
        test.static_dir.clone(),
        test.media_dir.clone(),
        test.docs_root.clone(),
    );

    let route = routes.resolve("/api/docs/").unwrap();
    assert_eq!(
        FileService::new(&route).locate().await.unwrap(),
        test.docs_dir().join("redoc.html")
    );

    let route = routes.resolve("/api/docs/openapi-schema.yml").unwrap();
    assert_eq!(
        FileService::new(&route).locate().await.unwrap(),
        test.docs_dir().join(site::OPENAPI_SCHEMA_PATH)
    );

    let route = routes.resolve("/api/docs/missing.json").unwrap();
    assert!(matches!(
        FileService::new(&route).locate().await,
        Err(FileError::NotFound(_))
    ));
}

/// Tests a path through an existing file is treated as missing, not as an I/O error.
#[tokio::test]
async fn file_used_as_directory_is_not_found() {
    let test = TestBuilder::new().with_foodgram_site().build().await.unwrap();
    let routes = table(
        test.static_dir.clone(),
        test.media_dir.clone(),
        test.docs_root.clone(),
    );

    let route = routes.resolve("/media/recipes/images/cake.jpg/large").unwrap();

    assert!(matches!(
        FileService::new(&route).locate().await,
        Err(FileError::NotFound(_))
    ));
}
