//! The complete Foodgram deployment.

use std::str::FromStr;

use thiserror::Error;

use crate::service::{ImageSource, Mount, PortBinding, Service};

/// Host port through which the whole stack is reached.
pub const PUBLISHED_PORT: u16 = 10000;
/// Port the gateway listens on inside its container.
pub const GATEWAY_CONTAINER_PORT: u16 = 80;
/// Port the backend application server listens on inside the container network.
pub const BACKEND_PORT: u16 = 10000;

pub const DB_SERVICE: &str = "db";
pub const BACKEND_SERVICE: &str = "backend";
pub const FRONTEND_SERVICE: &str = "frontend";
pub const GATEWAY_SERVICE: &str = "gateway";

pub const PG_DATA_VOLUME: &str = "pg_data";
pub const STATIC_VOLUME: &str = "static";
pub const MEDIA_VOLUME: &str = "media";

pub const ENV_FILE: &str = ".env";

/// Which manifest flavour to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Pulls prebuilt application images from a registry namespace.
    #[default]
    Production,
    /// Builds application images from the sibling source directories.
    Local,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown stack variant '{0}', expected 'production' or 'local'")]
pub struct VariantParseError(pub String);

impl FromStr for Variant {
    type Err = VariantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "local" | "dev" => Ok(Self::Local),
            _ => Err(VariantParseError(s.to_string())),
        }
    }
}

/// Services and named volumes of one deployment, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    pub name: String,
    pub services: Vec<Service>,
    pub volumes: Vec<String>,
}

impl Stack {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            services: Vec::new(),
            volumes: Vec::new(),
        }
    }

    pub fn volume(mut self, name: &str) -> Self {
        self.volumes.push(name.to_string());
        self
    }

    pub fn service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// Builds the four-service Foodgram stack.
    ///
    /// # Arguments
    /// - `variant` - Whether application images are pulled or built locally
    /// - `namespace` - Registry namespace for the production images, ignored for `Local`
    ///
    /// # Returns
    /// - `Stack` with `db`, `backend`, `frontend` and `gateway` services and the
    ///   `pg_data`, `static` and `media` volumes
    pub fn foodgram(variant: Variant, namespace: &str) -> Self {
        let source = |component: &str| match variant {
            Variant::Production => {
                ImageSource::Image(format!("{}/foodgram_{}", namespace, component))
            }
            Variant::Local => ImageSource::Build {
                context: format!("../{}/", component),
            },
        };

        let db = Service::new(DB_SERVICE, ImageSource::Image("postgres:13.10".to_string()))
            .env_file(ENV_FILE)
            .mount(Mount::volume(PG_DATA_VOLUME, "/var/lib/postgresql/data"))
            .data_dir("/var/lib/postgresql/data");

        let backend = Service::new(BACKEND_SERVICE, source("backend"))
            .env_file(ENV_FILE)
            .depends_on(DB_SERVICE)
            .mount(Mount::volume(STATIC_VOLUME, "/backend_static"))
            .mount(Mount::volume(MEDIA_VOLUME, "/app/media"));

        let frontend = Service::new(FRONTEND_SERVICE, source("frontend"))
            .env_file(ENV_FILE)
            .command("cp -r /app/build/. /frontend_static/")
            .mount(Mount::volume(STATIC_VOLUME, "/frontend_static"))
            .one_shot();

        let gateway = Service::new(GATEWAY_SERVICE, source("gateway"))
            .env_file(ENV_FILE)
            .depends_on(BACKEND_SERVICE)
            .publish(PUBLISHED_PORT, GATEWAY_CONTAINER_PORT)
            .mount(Mount::volume(STATIC_VOLUME, "/staticfiles"))
            .mount(Mount::volume(MEDIA_VOLUME, "/media"))
            .mount(Mount::bind("../docs/", "/usr/share/nginx/html/api/docs/"));

        Stack::new("foodgram")
            .volume(PG_DATA_VOLUME)
            .volume(STATIC_VOLUME)
            .volume(MEDIA_VOLUME)
            .service(db)
            .service(backend)
            .service(frontend)
            .service(gateway)
    }

    pub fn find_service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Every published port paired with the service that publishes it.
    pub fn published_ports(&self) -> Vec<(&str, PortBinding)> {
        self.services
            .iter()
            .flat_map(|s| s.ports.iter().map(move |p| (s.name.as_str(), *p)))
            .collect()
    }

    /// Env files referenced by any service, deduplicated in first-use order.
    pub fn env_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = Vec::new();
        for file in self.services.iter().filter_map(|s| s.env_file.as_deref()) {
            if !files.contains(&file) {
                files.push(file);
            }
        }
        files
    }
}
