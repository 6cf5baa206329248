use std::path::Path;

use crate::server::{
    model::route::{RouteTable, Target},
    util::parse::format_size,
};

/// Server-level settings of the rendered nginx configuration.
#[derive(Debug, Clone)]
pub struct NginxOptions {
    pub listen_port: u16,
    pub client_max_body_size: usize,
}

/// Renders the routing table as an nginx server block.
///
/// Each location becomes one `location` block in table order, so a gateway image built
/// on nginx routes exactly like the `serve` command.
pub fn render_nginx(routes: &RouteTable, options: &NginxOptions) -> String {
    let mut out = String::new();

    out.push_str("server {\n");
    out.push_str(&format!("    listen {};\n", options.listen_port));
    out.push_str("    server_tokens off;\n");
    out.push_str(&format!(
        "    client_max_body_size {};\n",
        format_size(options.client_max_body_size)
    ));

    for location in routes.locations() {
        out.push('\n');
        out.push_str(&format!("    location {} {{\n", location.prefix));

        match &location.target {
            Target::Proxy { upstream } => {
                out.push_str("        proxy_set_header Host $http_host;\n");
                out.push_str(&format!("        proxy_pass {};\n", upstream));
            }
            Target::Docs { root, index } => {
                out.push_str(&format!("        root {};\n", display_dir(root, false)));
                out.push_str(&format!("        try_files $uri $uri/{};\n", index));
            }
            Target::Alias { dir, fallback } => {
                out.push_str(&format!("        alias {};\n", display_dir(dir, true)));
                if let Some(fallback) = fallback {
                    out.push_str(&format!("        try_files $uri $uri/ /{};\n", fallback));
                }
            }
        }

        out.push_str("    }\n");
    }

    out.push_str("}\n");
    out
}

/// `alias` needs a trailing slash to pair with the location's; `root` must not have one.
fn display_dir(dir: &Path, trailing_slash: bool) -> String {
    let dir = dir.display().to_string();
    let trimmed = dir.trim_end_matches('/');

    if trailing_slash {
        format!("{}/", trimmed)
    } else if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}
