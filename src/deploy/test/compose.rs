use manifest::prelude::{Stack, Variant};
use serde_yaml::Value;

use crate::deploy::compose::render_compose;

fn rendered(variant: Variant) -> Value {
    let yaml = render_compose(&Stack::foodgram(variant, "foodgram")).unwrap();
    serde_yaml::from_str(&yaml).unwrap()
}

/// Tests volumes precede services and both keep declaration order.
#[test]
fn keeps_declaration_order() {
    let yaml = render_compose(&Stack::foodgram(Variant::Production, "foodgram")).unwrap();

    let volumes = yaml.find("volumes:").unwrap();
    let services = yaml.find("services:").unwrap();
    assert!(volumes < services);

    let positions: Vec<usize> = ["  db:", "  backend:", "  frontend:", "  gateway:"]
        .iter()
        .map(|name| yaml.find(name).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

/// Tests the production variant references registry images.
///
/// Expected: `image` set and `build` absent for the application services
#[test]
fn production_uses_images() {
    let doc = rendered(Variant::Production);
    let backend = &doc["services"]["backend"];

    assert_eq!(backend["image"], "foodgram/foodgram_backend");
    assert!(backend.get("build").is_none());
    assert_eq!(backend["env_file"], ".env");
    assert_eq!(backend["depends_on"][0], "db");
}

/// Tests the local variant references build contexts.
#[test]
fn local_uses_build_contexts() {
    let doc = rendered(Variant::Local);
    let gateway = &doc["services"]["gateway"];

    assert_eq!(gateway["build"], "../gateway/");
    assert!(gateway.get("image").is_none());
}

/// Tests gateway ports and mounts are rendered in short syntax.
#[test]
fn renders_ports_and_mounts() {
    let doc = rendered(Variant::Production);
    let gateway = &doc["services"]["gateway"];

    assert_eq!(gateway["ports"][0], "10000:80");
    assert_eq!(gateway["volumes"][0], "static:/staticfiles");
    assert_eq!(gateway["volumes"][1], "media:/media");
    assert_eq!(
        gateway["volumes"][2],
        "../docs/:/usr/share/nginx/html/api/docs/"
    );
    assert_eq!(doc["services"]["db"]["volumes"][0], "pg_data:/var/lib/postgresql/data");
}

/// Tests the frontend step carries its copy command and no ports.
#[test]
fn renders_frontend_command() {
    let doc = rendered(Variant::Production);
    let frontend = &doc["services"]["frontend"];

    assert_eq!(frontend["command"], "cp -r /app/build/. /frontend_static/");
    assert!(frontend.get("ports").is_none());
    assert!(frontend.get("restart").is_none());
}

/// Tests the named volumes are declared at the top level.
#[test]
fn declares_named_volumes() {
    let doc = rendered(Variant::Local);
    let volumes = doc["volumes"].as_mapping().unwrap();

    let names: Vec<&str> = volumes.keys().filter_map(Value::as_str).collect();
    assert_eq!(names, vec!["pg_data", "static", "media"]);
}
