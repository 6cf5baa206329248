use manifest::prelude::{ImageSource, Service, Stack};
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::server::error::deploy::DeployError;

/// One service entry as it appears in the compose file.
#[derive(Serialize)]
struct ComposeService<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    env_file: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    restart: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ports: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    volumes: Vec<String>,
}

impl<'a> From<&'a Service> for ComposeService<'a> {
    fn from(service: &'a Service) -> Self {
        let (image, build) = match &service.source {
            ImageSource::Image(tag) => (Some(tag.as_str()), None),
            ImageSource::Build { context } => (None, Some(context.as_str())),
        };

        Self {
            image,
            build,
            env_file: service.env_file.as_deref(),
            depends_on: service.depends_on.iter().map(String::as_str).collect(),
            command: service.command.as_deref(),
            restart: service.restart.map(|r| r.as_str()),
            ports: service.ports.iter().map(ToString::to_string).collect(),
            volumes: service.mounts.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Renders the stack as a compose file.
///
/// Volumes come first, then services, each in declaration order. Only fields that are set
/// are emitted.
///
/// # Returns
/// - `Ok(String)` - YAML document
/// - `Err(DeployError::Render)` - Serialization failed
pub fn render_compose(stack: &Stack) -> Result<String, DeployError> {
    let mut volumes = Mapping::new();
    for volume in &stack.volumes {
        volumes.insert(Value::String(volume.clone()), Value::Null);
    }

    let mut services = Mapping::new();
    for service in &stack.services {
        services.insert(
            Value::String(service.name.clone()),
            serde_yaml::to_value(ComposeService::from(service))?,
        );
    }

    let mut document = Mapping::new();
    document.insert(Value::from("volumes"), Value::Mapping(volumes));
    document.insert(Value::from("services"), Value::Mapping(services));

    Ok(serde_yaml::to_string(&document)?)
}
