use super::*;

/// Tests each of the five locations resolves for a path under it.
///
/// Expected: the longest matching prefix for every sample path
#[test]
fn routes_every_prefix() {
    let table = foodgram_table();

    assert_eq!(prefix_of(&table, "/admin/login/").as_deref(), Some("/admin/"));
    assert_eq!(prefix_of(&table, "/api/recipes/1/").as_deref(), Some("/api/"));
    assert_eq!(prefix_of(&table, "/api/docs/").as_deref(), Some("/api/docs/"));
    assert_eq!(prefix_of(&table, "/media/foo.jpg").as_deref(), Some("/media/"));
    assert_eq!(prefix_of(&table, "/recipes/42").as_deref(), Some("/"));
}

/// Tests the docs location wins over the broader /api/ location.
///
/// Expected: /api/docs/ regardless of declaration order
#[test]
fn longest_prefix_wins_regardless_of_order() {
    let table = RouteTable::new(vec![
        Location::new(
            "/",
            Target::Alias {
                dir: PathBuf::from("/static"),
                fallback: None,
            },
        ),
        Location::new(
            "/api/",
            Target::Proxy {
                upstream: "http://backend:10000/api/".parse().unwrap(),
            },
        ),
        Location::new(
            "/api/docs/",
            Target::Docs {
                root: PathBuf::from("/docs"),
                index: "redoc.html".to_string(),
            },
        ),
    ]);

    assert_eq!(
        prefix_of(&table, "/api/docs/redoc.html").as_deref(),
        Some("/api/docs/")
    );
    assert_eq!(prefix_of(&table, "/api/docsx").as_deref(), Some("/api/"));
}

/// Tests the remainder is the path with the prefix removed.
#[test]
fn returns_remainder_after_prefix() {
    let table = foodgram_table();

    let matched = table.resolve("/media/recipes/images/cake.png").unwrap();
    assert_eq!(matched.remainder, "recipes/images/cake.png");
    assert_eq!(matched.path, "/media/recipes/images/cake.png");

    let matched = table.resolve("/api/").unwrap();
    assert_eq!(matched.remainder, "");
}

/// Tests prefixes match whole path segments only at their trailing slash.
///
/// Expected: `/mediafile` is a static path, `/admin` without slash is too
#[test]
fn prefix_requires_trailing_slash() {
    let table = foodgram_table();

    assert_eq!(prefix_of(&table, "/mediafile").as_deref(), Some("/"));
    assert_eq!(prefix_of(&table, "/admin").as_deref(), Some("/"));
}

/// Tests relative paths and a table without a root location never match.
#[test]
fn unmatched_paths_resolve_to_none() {
    let table = foodgram_table();
    assert!(table.resolve("relative/path").is_none());

    let table = RouteTable::new(vec![Location::new(
        "/media/",
        Target::Alias {
            dir: PathBuf::from("/media"),
            fallback: None,
        },
    )]);
    assert!(table.resolve("/index.html").is_none());
}

/// Tests proxy upstreams keep the backend host and carry the location path.
#[test]
fn proxies_point_at_backend() {
    let table = foodgram_table();

    let matched = table.resolve("/admin/").unwrap();
    match &matched.location.target {
        Target::Proxy { upstream } => {
            assert_eq!(upstream.as_str(), "http://backend:10000/admin/")
        }
        other => panic!("expected proxy target, got {:?}", other),
    }
}
