use super::*;

/// Tests proxied prefixes without their trailing slash redirect.
#[test]
fn redirects_bare_proxy_prefixes() {
    let table = foodgram_table();

    assert_eq!(table.slash_redirect("/admin").as_deref(), Some("/admin/"));
    assert_eq!(table.slash_redirect("/api").as_deref(), Some("/api/"));
}

/// Tests file locations and unrelated paths never redirect.
///
/// Expected: None for /media, /api/docs, / and paths already ending in a slash
#[test]
fn ignores_file_locations_and_other_paths() {
    let table = foodgram_table();

    assert_eq!(table.slash_redirect("/media"), None);
    assert_eq!(table.slash_redirect("/api/docs"), None);
    assert_eq!(table.slash_redirect(""), None);
    assert_eq!(table.slash_redirect("/admin/"), None);
    assert_eq!(table.slash_redirect("/administrator"), None);
}
