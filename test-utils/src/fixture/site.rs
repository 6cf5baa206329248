/// Single-page app entry point served for `/` and unknown frontend routes.
pub const INDEX_HTML: &str = "<!doctype html><html><body><div id=\"root\"></div></body></html>";

/// Compiled frontend bundle, relative to the static volume.
pub const MAIN_JS_PATH: &str = "static/js/main.js";
pub const MAIN_JS: &str = "console.log('foodgram');";

/// API documentation page, relative to `api/docs/` under the docs root.
pub const REDOC_HTML: &str =
    "<!doctype html><html><body><redoc spec-url=\"openapi-schema.yml\"></redoc></body></html>";

/// Schema loaded by the documentation page.
pub const OPENAPI_SCHEMA_PATH: &str = "openapi-schema.yml";
pub const OPENAPI_SCHEMA: &str = "openapi: 3.0.2\ninfo:\n  title: Foodgram\n";

/// Uploaded recipe image, relative to the media volume.
pub const RECIPE_IMAGE_PATH: &str = "recipes/images/cake.jpg";
pub const RECIPE_IMAGE: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
