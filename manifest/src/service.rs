//! Service declarations.
//!
//! A `Service` is one deployable container. Fields mirror what an orchestration manifest
//! declares for it, plus two pieces of metadata used only by the consistency checks:
//! `lifecycle` and `data_dir`.

use std::fmt;

/// Where a service's image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Prebuilt image pulled from a registry, e.g. `postgres:13.10`.
    Image(String),
    /// Image built from a local directory containing a Dockerfile.
    Build {
        /// Build context relative to the manifest.
        context: String,
    },
}

/// Origin of a mounted filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountSource {
    /// Named volume declared at the stack level.
    Volume(String),
    /// Host path bind-mounted into the container.
    Bind(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    pub source: MountSource,
    /// Absolute path inside the container.
    pub target: String,
    pub read_only: bool,
}

impl Mount {
    pub fn volume(name: &str, target: &str) -> Self {
        Self {
            source: MountSource::Volume(name.to_string()),
            target: target.to_string(),
            read_only: false,
        }
    }

    pub fn bind(path: &str, target: &str) -> Self {
        Self {
            source: MountSource::Bind(path.to_string()),
            target: target.to_string(),
            read_only: false,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Name of the backing volume, if this is a named volume mount.
    pub fn volume_name(&self) -> Option<&str> {
        match &self.source {
            MountSource::Volume(name) => Some(name),
            MountSource::Bind(_) => None,
        }
    }
}

/// Short-syntax rendering, `source:target[:ro]`.
impl fmt::Display for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            MountSource::Volume(name) => name,
            MountSource::Bind(path) => path,
        };
        write!(f, "{}:{}", source, self.target)?;
        if self.read_only {
            write!(f, ":ro")?;
        }
        Ok(())
    }
}

/// Host port published to a container port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortBinding {
    pub host: u16,
    pub container: u16,
}

impl fmt::Display for PortBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.container)
    }
}

/// Whether the container is expected to keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Long-running process (database, application server, proxy).
    Daemon,
    /// Runs a single command to completion and exits.
    OneShot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restart {
    No,
    Always,
    OnFailure,
    UnlessStopped,
}

impl Restart {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Always => "always",
            Self::OnFailure => "on-failure",
            Self::UnlessStopped => "unless-stopped",
        }
    }

    /// Whether the runtime would start the container again after a clean exit.
    pub fn restarts_on_success(&self) -> bool {
        matches!(self, Self::Always | Self::UnlessStopped)
    }
}

/// One container declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub source: ImageSource,
    pub env_file: Option<String>,
    pub depends_on: Vec<String>,
    pub mounts: Vec<Mount>,
    pub ports: Vec<PortBinding>,
    pub command: Option<String>,
    pub restart: Option<Restart>,
    pub lifecycle: Lifecycle,
    /// Directory holding state that has to survive container restarts.
    pub data_dir: Option<String>,
}

impl Service {
    /// Creates a long-running service with no mounts, ports or dependencies.
    pub fn new(name: &str, source: ImageSource) -> Self {
        Self {
            name: name.to_string(),
            source,
            env_file: None,
            depends_on: Vec::new(),
            mounts: Vec::new(),
            ports: Vec::new(),
            command: None,
            restart: None,
            lifecycle: Lifecycle::Daemon,
            data_dir: None,
        }
    }

    pub fn env_file(mut self, path: &str) -> Self {
        self.env_file = Some(path.to_string());
        self
    }

    pub fn depends_on(mut self, service: &str) -> Self {
        self.depends_on.push(service.to_string());
        self
    }

    pub fn mount(mut self, mount: Mount) -> Self {
        self.mounts.push(mount);
        self
    }

    pub fn publish(mut self, host: u16, container: u16) -> Self {
        self.ports.push(PortBinding { host, container });
        self
    }

    pub fn command(mut self, command: &str) -> Self {
        self.command = Some(command.to_string());
        self
    }

    pub fn restart(mut self, restart: Restart) -> Self {
        self.restart = Some(restart);
        self
    }

    pub fn one_shot(mut self) -> Self {
        self.lifecycle = Lifecycle::OneShot;
        self
    }

    pub fn data_dir(mut self, path: &str) -> Self {
        self.data_dir = Some(path.to_string());
        self
    }

    /// Names of every named volume this service mounts.
    pub fn volumes(&self) -> impl Iterator<Item = &str> {
        self.mounts.iter().filter_map(Mount::volume_name)
    }
}
