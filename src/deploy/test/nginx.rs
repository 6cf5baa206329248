use std::path::PathBuf;

use crate::{
    deploy::nginx::{render_nginx, NginxOptions},
    server::{config::Config, model::route::RouteTable},
};

fn rendered() -> String {
    let config = Config::from_lookup(|_| None).unwrap();
    let routes = RouteTable::foodgram(&config);
    render_nginx(
        &routes,
        &NginxOptions {
            listen_port: 80,
            client_max_body_size: config.max_body_size,
        },
    )
}

/// Tests the server block header.
#[test]
fn renders_listen_and_body_size() {
    let conf = rendered();

    assert!(conf.starts_with("server {\n    listen 80;\n"));
    assert!(conf.contains("    client_max_body_size 10M;\n"));
    assert!(conf.ends_with("}\n"));
}

/// Tests proxied locations keep the client Host and pass to the backend.
#[test]
fn renders_proxy_locations() {
    let conf = rendered();

    assert!(conf.contains(
        "    location /admin/ {\n        proxy_set_header Host $http_host;\n        proxy_pass http://backend:10000/admin/;\n    }\n"
    ));
    assert!(conf.contains("        proxy_pass http://backend:10000/api/;\n"));
}

/// Tests docs, media and static locations.
#[test]
fn renders_file_locations() {
    let conf = rendered();

    assert!(conf.contains(
        "    location /api/docs/ {\n        root /usr/share/nginx/html;\n        try_files $uri $uri/redoc.html;\n    }\n"
    ));
    assert!(conf.contains("    location /media/ {\n        alias /media/;\n    }\n"));
    assert!(conf.contains(
        "    location / {\n        alias /staticfiles/;\n        try_files $uri $uri/ /index.html;\n    }\n"
    ));
}

/// Tests one location block per route.
#[test]
fn renders_every_location_once() {
    let conf = rendered();

    assert_eq!(conf.matches("    location ").count(), 5);
}

/// Tests directory paths are normalised for root and alias directives.
#[test]
fn normalises_directory_slashes() {
    let mut config = Config::from_lookup(|_| None).unwrap();
    config.media_dir = PathBuf::from("/srv/media/");
    config.docs_root = PathBuf::from("/srv/html/");

    let conf = render_nginx(
        &RouteTable::foodgram(&config),
        &NginxOptions {
            listen_port: 8080,
            client_max_body_size: 1536,
        },
    );

    assert!(conf.contains("        alias /srv/media/;\n"));
    assert!(conf.contains("        root /srv/html;\n"));
    assert!(conf.contains("    client_max_body_size 1536;\n"));
    assert!(conf.contains("    listen 8080;\n"));
}
