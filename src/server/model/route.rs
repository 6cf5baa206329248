//! Routing table domain models.
//!
//! A `RouteTable` maps path prefixes to targets the way nginx prefix locations do: the
//! longest matching prefix wins, independent of declaration order. The same table drives
//! the gateway handler and the rendered nginx configuration.

use std::path::PathBuf;

use url::Url;

use crate::server::config::Config;

/// What a location does with a matched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Forward to an upstream, replacing the matched prefix with the upstream URL's path.
    Proxy { upstream: Url },

    /// Serve `root` + full request path, falling back to `<that path>/<index>`.
    Docs { root: PathBuf, index: String },

    /// Serve `dir` + path remainder after the prefix.
    ///
    /// Directories serve their `index.html`. When nothing matches and `fallback` is set,
    /// `dir/<fallback>` is served instead.
    Alias {
        dir: PathBuf,
        fallback: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path prefix, starting and ending with `/`.
    pub prefix: String,
    pub target: Target,
}

impl Location {
    pub fn new(prefix: &str, target: Target) -> Self {
        Self {
            prefix: prefix.to_string(),
            target,
        }
    }
}

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub location: &'a Location,
    /// Full request path, still percent-encoded.
    pub path: String,
    /// Request path with the location prefix removed.
    pub remainder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    locations: Vec<Location>,
}

impl RouteTable {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    /// Builds the Foodgram gateway locations from configuration.
    ///
    /// # Arguments
    /// - `config` - Gateway configuration with backend URL and volume mount points
    ///
    /// # Returns
    /// - `RouteTable` with `/api/docs/`, `/admin/`, `/api/`, `/media/` and `/` locations
    pub fn foodgram(config: &Config) -> Self {
        let upstream = |path: &str| {
            let mut url = config.backend_url.clone();
            url.set_path(path);
            url
        };

        Self::new(vec![
            Location::new(
                "/api/docs/",
                Target::Docs {
                    root: config.docs_root.clone(),
                    index: "redoc.html".to_string(),
                },
            ),
            Location::new(
                "/admin/",
                Target::Proxy {
                    upstream: upstream("/admin/"),
                },
            ),
            Location::new(
                "/api/",
                Target::Proxy {
                    upstream: upstream("/api/"),
                },
            ),
            Location::new(
                "/media/",
                Target::Alias {
                    dir: config.media_dir.clone(),
                    fallback: None,
                },
            ),
            Location::new(
                "/",
                Target::Alias {
                    dir: config.static_dir.clone(),
                    fallback: Some("index.html".to_string()),
                },
            ),
        ])
    }

    /// Locations in declaration order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Finds the location with the longest prefix matching `path`.
    ///
    /// # Returns
    /// - `Some(RouteMatch)` - Matching location and the path remainder after its prefix
    /// - `None` - No prefix matches (only possible for paths not starting with `/` or a
    ///   table without a `/` location)
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_>> {
        let location = self
            .locations
            .iter()
            .filter(|l| path.starts_with(&l.prefix))
            .max_by_key(|l| l.prefix.len())?;

        Some(RouteMatch {
            location,
            path: path.to_string(),
            remainder: path[location.prefix.len()..].to_string(),
        })
    }

    /// Returns the canonical path when `path` names a proxied location without its
    /// trailing slash.
    ///
    /// `/admin` resolves to the static site otherwise; nginx answers it with a permanent
    /// redirect to `/admin/`, and so does the gateway.
    pub fn slash_redirect(&self, path: &str) -> Option<String> {
        self.locations
            .iter()
            .filter(|l| matches!(l.target, Target::Proxy { .. }))
            .find(|l| l.prefix.len() > 1 && l.prefix.strip_suffix('/') == Some(path))
            .map(|l| l.prefix.clone())
    }
}
