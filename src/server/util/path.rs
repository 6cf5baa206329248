use percent_encoding::percent_decode_str;

/// Resolves `.` and `..` segments of a request path and merges repeated slashes.
///
/// Segments are compared in their percent-decoded form, so `%2e%2e` climbs like `..`.
/// Every other segment is kept exactly as it was encoded. A trailing slash survives, and a
/// path ending in a dot segment gets one, matching how nginx normalizes URIs before it
/// picks a location.
///
/// # Returns
/// - `Some(String)` - Normalized path, always starting with `/`
/// - `None` - A `..` segment climbs above `/`
pub fn normalize_path(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    let mut trailing_slash = false;

    for segment in path.split('/') {
        trailing_slash = true;
        if segment.is_empty() {
            continue;
        }

        match percent_decode_str(segment).decode_utf8_lossy().as_ref() {
            "." => {}
            ".." => {
                segments.pop()?;
            }
            _ => {
                segments.push(segment);
                trailing_slash = false;
            }
        }
    }

    let mut normalized = format!("/{}", segments.join("/"));
    if trailing_slash && !segments.is_empty() {
        normalized.push('/');
    }
    Some(normalized)
}
